//! CLI for the vkad album downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vkad_core::config;

use commands::{run_download, run_resolve, run_settings};

/// Top-level CLI for vkad.
#[derive(Debug, Parser)]
#[command(name = "vkad")]
#[command(about = "vkad: download every photo of a VK album at full size", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download all photos of an album into a new folder.
    Download {
        /// Album id (`owner_album`, `album_owner_album`) or album link.
        #[arg(allow_hyphen_values = true)]
        album: String,

        /// API access token (defaults to the one from the settings file).
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,

        /// Folder that will receive the album folder (defaults to the settings file, then home).
        #[arg(long, value_name = "DIR")]
        folder: Option<String>,

        /// Settings file (defaults to last_settings.cfg next to the executable).
        #[arg(long, value_name = "PATH")]
        settings: Option<PathBuf>,
    },

    /// Show the owner and album ids an album reference resolves to.
    Resolve {
        /// Album id or album link.
        #[arg(allow_hyphen_values = true)]
        album: String,
    },

    /// Show the stored settings (token masked).
    Settings {
        /// Settings file (defaults to last_settings.cfg next to the executable).
        #[arg(long, value_name = "PATH")]
        settings: Option<PathBuf>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Download {
                album,
                token,
                folder,
                settings,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_download(&cfg, &album, token, folder, settings)?;
            }
            CliCommand::Resolve { album } => run_resolve(&album)?,
            CliCommand::Settings { settings } => run_settings(settings)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
