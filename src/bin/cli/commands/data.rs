use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use flashdeck::models::Category;

use crate::client::FlashdeckClient;
use crate::output::{self, OutputConfig};

/// Whole-collection transfer commands
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Write the whole collection as JSON
    Export {
        /// Output file; prints to stdout when omitted
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace the whole collection from a JSON file
    Import {
        /// The file to read
        file: PathBuf,
    },
}

/// Executes a data command
pub async fn execute(
    client: &FlashdeckClient,
    cmd: DataCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        DataCommands::Export { output: None } => {
            let categories = client.export().await?;
            println!("{}", serde_json::to_string_pretty(&categories)?);
        }
        DataCommands::Export { output: Some(path) } => {
            let categories = client.export().await?;
            fs::write(&path, serde_json::to_string_pretty(&categories)?)?;
            output::print_success(
                &format!("Exported {} categories to {}", categories.len(), path.display()),
                config,
            );
        }
        DataCommands::Import { file } => {
            let content = fs::read_to_string(&file)?;
            let categories: Vec<Category> = serde_json::from_str(&content)?;
            let imported = client.import(&categories).await?;
            output::print_success(&format!("Imported {} categories", imported.len()), config);
        }
    }
    Ok(())
}
