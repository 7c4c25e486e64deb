use clap::Subcommand;

use crate::client::FlashdeckClient;
use crate::output::{self, OutputConfig};

/// Category management commands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories
    List,
    /// Create a new category
    Create {
        /// Name of the category
        name: String,
    },
    /// Show a category and its themes
    Get {
        /// The category ID
        id: i64,
    },
    /// Rename a category
    Rename {
        /// The category ID
        id: i64,
        /// The new name
        name: String,
    },
    /// Delete a category with all of its themes and cards
    Delete {
        /// The category ID
        id: i64,
    },
    /// Select the current category
    Select {
        /// The category ID
        id: i64,
    },
    /// Show the current category
    Current,
}

/// Executes a category command
pub async fn execute(
    client: &FlashdeckClient,
    cmd: CategoryCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        CategoryCommands::List => {
            let categories = client.list_categories().await?;
            output::print_categories(&categories, config);
        }
        CategoryCommands::Create { name } => {
            let category = client.create_category(name).await?;
            output::print_category(&category, config);
        }
        CategoryCommands::Get { id } => {
            let category = client.get_category(id).await?;
            output::print_category(&category, config);
        }
        CategoryCommands::Rename { id, name } => {
            let category = client.rename_category(id, name).await?;
            output::print_category(&category, config);
        }
        CategoryCommands::Delete { id } => {
            client.delete_category(id).await?;
            output::print_success(&format!("Deleted category {}", id), config);
        }
        CategoryCommands::Select { id } => {
            let category = client.select_category(id).await?;
            output::print_category(&category, config);
        }
        CategoryCommands::Current => match client.current_category().await? {
            Some(category) => output::print_category(&category, config),
            None => output::print_success("No category selected", config),
        },
    }
    Ok(())
}
