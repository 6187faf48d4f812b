// command line interface

use crate::output::Output;
use crate::train::{DATASET, TrainConfig, Trainer};
use crate::{Server, TextScorer, UrlScorer, validate_url};
use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shadowshield", about = "Score messages and urls for phishing risk")]
struct Cli {
    /// default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// start as http server
    Serve {
        /// port number
        #[arg(long, short, env = "SHADOWSHIELD_PORT", default_value = "8000")]
        port: u16,

        /// host to bind
        #[arg(long, env = "SHADOWSHIELD_HOST", default_value = "127.0.0.1")]
        host: String,
    },

    /// score a message
    Text {
        content: String,

        /// print the raw json result
        #[arg(long)]
        json: bool,
    },

    /// score a url
    Url {
        url: String,

        /// print the raw json result
        #[arg(long)]
        json: bool,
    },

    /// fit the example text classifier and save it
    Train {
        /// directory for the vectorizer and model files
        #[arg(long, short, default_value = "models")]
        out: PathBuf,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(&cli.log_level);

    match cli.command {
        Commands::Serve { port, host } => Ok(Server::run(&host, port).await?),

        Commands::Text { content, json } => {
            let result = TextScorer::score(&content);
            if json {
                Output::raw(&result)?;
            } else {
                Output::pretty(&content, &result);
            }
            Ok(())
        }

        Commands::Url { url, json } => {
            let url = validate_url(&url)?;
            let result = UrlScorer::score(url.as_str());
            if json {
                Output::raw(&result)?;
            } else {
                Output::pretty(url.as_str(), &result);
            }
            Ok(())
        }

        Commands::Train { out } => {
            let trained = Trainer::new(TrainConfig::default()).fit(&DATASET)?;
            println!("{}", trained.report);
            trained.save(&out)?;
            println!("\nsaved text model and vectorizer to {}", out.display());
            Ok(())
        }
    }
}
