use std::path::PathBuf;

use clap::Parser;

use crate::source::{DEFAULT_LOCATION, DocumentSource};

pub const DEFAULT_LOG_FILE: &str = "folio.log";

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(about = "Edit, preview and export JSON-driven personal site content")]
pub struct Cli {
    /// Path or http(s) URL of the site content document
    #[arg(default_value = DEFAULT_LOCATION)]
    pub source: String,

    /// Directory that receives the exported site-content.json
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Assistant chat endpoint; the chat view is disabled without one
    #[arg(long, env = "FOLIO_CHAT_ENDPOINT")]
    pub chat_endpoint: Option<String>,

    /// File that receives the log output
    #[arg(long, env = "FOLIO_LOG", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Load, collect and print the exported JSON instead of starting the editor
    #[arg(long)]
    pub print: bool,
}

/// Settings resolved once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub source: DocumentSource,
    pub out_dir: PathBuf,
    pub chat_endpoint: Option<String>,
    pub log_file: PathBuf,
    pub print: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let chat_endpoint = cli
            .chat_endpoint
            .map(|endpoint| endpoint.trim().to_string())
            .filter(|endpoint| !endpoint.is_empty());
        Self {
            source: DocumentSource::parse(&cli.source),
            out_dir: cli.out_dir,
            chat_endpoint,
            log_file: cli.log_file,
            print: cli.print,
        }
    }

    /// Parse the process arguments, with `.env` supplying missing variables.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_cli(Cli::parse())
    }
}
