pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::shape::Shape;

#[derive(Parser)]
#[command(name = "logoctl")]
#[command(about = "Logo Studio CLI - offline rendering and server checks")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Render a stored row (JSON file) in one of the response shapes")]
    Render {
        #[arg(help = "JSON file holding one logo or category row")]
        file: PathBuf,

        #[arg(long, default_value = "canonical", help = "canonical, legacy, mobile or mobile-structured")]
        shape: Shape,

        #[arg(long, help = "Language code; unsupported codes fall back to the default")]
        lang: Option<String>,

        #[arg(long, default_value = "logo", help = "Entity of the row: logo or category")]
        entity: String,

        #[arg(long, help = "JSON file holding the logo's layer rows")]
        layers: Option<PathBuf>,
    },

    #[command(about = "List supported languages")]
    Languages,

    #[command(about = "Check server health from the /health endpoint")]
    Health {
        #[arg(long, default_value = "http://localhost:3000", help = "Server base URL")]
        url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Render {
            file,
            shape,
            lang,
            entity,
            layers,
        } => commands::render::handle(&file, shape, lang.as_deref(), &entity, layers.as_deref()),
        Commands::Languages => commands::languages::handle(output_format),
        Commands::Health { url } => commands::health::handle(&url, output_format).await,
    }
}
