use clap::Subcommand;

use crate::client::FlashdeckClient;
use crate::output::{self, OutputConfig};

/// Theme management commands
#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Create a theme in a category
    Create {
        /// The category ID
        category_id: i64,
        /// Name of the theme
        name: String,
    },
    /// Show a theme
    Get {
        /// The category ID
        category_id: i64,
        /// The theme ID
        theme_id: i64,
    },
    /// Rename a theme
    Rename {
        /// The category ID
        category_id: i64,
        /// The theme ID
        theme_id: i64,
        /// The new name
        name: String,
    },
    /// Delete a theme with its cards
    Delete {
        /// The category ID
        category_id: i64,
        /// The theme ID
        theme_id: i64,
    },
}

/// Executes a theme command
pub async fn execute(
    client: &FlashdeckClient,
    cmd: ThemeCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ThemeCommands::Create { category_id, name } => {
            let theme = client.create_theme(category_id, name).await?;
            output::print_theme(&theme, config);
        }
        ThemeCommands::Get { category_id, theme_id } => {
            let theme = client.get_theme(category_id, theme_id).await?;
            output::print_theme(&theme, config);
        }
        ThemeCommands::Rename { category_id, theme_id, name } => {
            let theme = client.rename_theme(category_id, theme_id, name).await?;
            output::print_theme(&theme, config);
        }
        ThemeCommands::Delete { category_id, theme_id } => {
            client.delete_theme(category_id, theme_id).await?;
            output::print_success(
                &format!("Deleted theme {} from category {}", theme_id, category_id),
                config,
            );
        }
    }
    Ok(())
}
