mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use log::debug;
use pasteboard_core::{PasteboardService, Session};
use std::process::ExitCode;
use std::time::Duration;

use cli::{Cli, Command};
use commands::Status;
use config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.clone())?;
    debug!("Loaded configuration: {:?}", config);

    let default_kind = config.default_kind()?;
    let session = Session::new(system_pasteboard()?);
    let mut stdout = std::io::stdout().lock();

    let status = match cli.command {
        Command::Get { kind, diff, output } => commands::get(
            &session,
            kind.unwrap_or(default_kind),
            diff,
            output.as_deref(),
            &mut stdout,
        )?,
        Command::Set { kind, text, input } => commands::set(
            &session,
            kind.unwrap_or(default_kind),
            text,
            input.as_deref(),
            &mut std::io::stdin().lock(),
        )?,
        Command::Files { diff } => commands::files(&session, diff, &mut stdout)?,
        Command::Kinds => commands::kinds(&session, &mut stdout)?,
        Command::Watch { kind, interval_ms } => {
            let millis = interval_ms.unwrap_or(config.watch.interval_ms).max(1);
            let kind = kind.unwrap_or(default_kind);
            commands::watch(&session, kind, Duration::from_millis(millis), &mut stdout).await?
        }
    };

    Ok(match status {
        Status::Done => ExitCode::SUCCESS,
        Status::Empty => ExitCode::FAILURE,
        Status::Contended => {
            eprintln!("pasteboard: another application replaced the pasteboard before the write");
            ExitCode::FAILURE
        }
    })
}

#[cfg(target_os = "macos")]
fn system_pasteboard() -> Result<Box<dyn PasteboardService>> {
    Ok(Box::new(pasteboard_macos::GeneralPasteboard::new()))
}

#[cfg(not(target_os = "macos"))]
fn system_pasteboard() -> Result<Box<dyn PasteboardService>> {
    anyhow::bail!("no native pasteboard backend for this platform")
}
