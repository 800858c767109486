use clap::{Parser, Subcommand};
use pasteboard_core::ContentKind;
use std::path::PathBuf;

/// Read and write the system pasteboard
#[derive(Debug, Parser)]
#[command(name = "pasteboard", version, about)]
pub struct Cli {
    /// Config file (default: ~/.config/pasteboard/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the pasteboard contents
    Get {
        /// Representation to read: text, rtf, html, tsv, pdf, png, tiff
        #[arg(short, long)]
        kind: Option<ContentKind>,

        /// Only print if the pasteboard changed since the last read
        #[arg(short, long)]
        diff: bool,

        /// Write the contents to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the pasteboard contents
    Set {
        /// Representation to publish
        #[arg(short, long)]
        kind: Option<ContentKind>,

        /// Text to copy; read from --input or stdin when omitted
        text: Option<String>,

        /// Read the contents from a file
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,
    },

    /// Print file URLs on the pasteboard, one per line
    Files {
        #[arg(short, long)]
        diff: bool,
    },

    /// List the representations currently on the pasteboard
    Kinds,

    /// Print each new pasteboard value until interrupted
    Watch {
        #[arg(short, long)]
        kind: Option<ContentKind>,

        /// Poll interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}
