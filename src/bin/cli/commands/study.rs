use clap::Subcommand;

use crate::client::FlashdeckClient;
use crate::output::{self, OutputConfig};

/// Study session commands
#[derive(Subcommand, Debug)]
pub enum StudyCommands {
    /// Start a session over the due cards of a theme
    Start {
        /// The category ID
        category_id: i64,
        /// The theme ID
        theme_id: i64,
    },
    /// Show the session and the current card
    Show,
    /// Turn the current card over
    Flip,
    /// Mark the current card as remembered
    Correct,
    /// Mark the current card as forgotten
    Wrong,
    /// Skip to the next card without answering
    Next,
    /// Abandon the session
    Stop,
}

/// Executes a study command
pub async fn execute(
    client: &FlashdeckClient,
    cmd: StudyCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = match cmd {
        StudyCommands::Start { category_id, theme_id } => client.start_session(category_id, theme_id).await?,
        StudyCommands::Show => client.get_session().await?,
        StudyCommands::Flip => client.flip().await?,
        StudyCommands::Correct => client.answer(true).await?,
        StudyCommands::Wrong => client.answer(false).await?,
        StudyCommands::Next => client.next_card().await?,
        StudyCommands::Stop => client.end_session().await?,
    };
    output::print_session(&view, config);
    Ok(())
}
