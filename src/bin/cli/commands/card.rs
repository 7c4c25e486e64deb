use clap::Subcommand;
use flashdeck::models::CardUpdate;

use crate::client::FlashdeckClient;
use crate::output::{self, OutputConfig};

/// Card management commands
#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// List the cards of a theme
    List {
        /// The category ID
        category_id: i64,
        /// The theme ID
        theme_id: i64,
        /// Only list cards that are due now
        #[clap(long)]
        due: bool,
    },
    /// Add a card to a theme
    Add {
        /// The category ID
        category_id: i64,
        /// The theme ID
        theme_id: i64,
        /// The question side
        #[clap(long)]
        recto: String,
        /// The answer side
        #[clap(long)]
        verso: String,
        /// Optional image reference
        #[clap(long)]
        image: Option<String>,
    },
    /// Edit a card
    Edit {
        /// The category ID
        category_id: i64,
        /// The theme ID
        theme_id: i64,
        /// The card ID
        card_id: i64,
        /// New question side
        #[clap(long)]
        recto: Option<String>,
        /// New answer side
        #[clap(long)]
        verso: Option<String>,
        /// New image reference
        #[clap(long, conflicts_with = "clear_image")]
        image: Option<String>,
        /// Remove the image
        #[clap(long)]
        clear_image: bool,
        /// Put the card back at this level
        #[clap(long)]
        level: Option<u32>,
    },
    /// Delete a card
    Delete {
        /// The category ID
        category_id: i64,
        /// The theme ID
        theme_id: i64,
        /// The card ID
        card_id: i64,
    },
}

/// Builds the partial update for `card edit`
fn build_update(
    recto: Option<String>,
    verso: Option<String>,
    image: Option<String>,
    clear_image: bool,
    level: Option<u32>,
) -> CardUpdate {
    let image = if clear_image { Some(None) } else { image.map(Some) };
    CardUpdate {
        image,
        recto,
        verso,
        level,
        next_review: None,
    }
}

/// Executes a card command
pub async fn execute(
    client: &FlashdeckClient,
    cmd: CardCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        CardCommands::List { category_id, theme_id, due } => {
            let cards = client.list_cards(category_id, theme_id, due).await?;
            output::print_cards(&cards, config);
        }
        CardCommands::Add { category_id, theme_id, recto, verso, image } => {
            let card = client.create_card(category_id, theme_id, recto, verso, image).await?;
            output::print_card(&card, config);
        }
        CardCommands::Edit {
            category_id,
            theme_id,
            card_id,
            recto,
            verso,
            image,
            clear_image,
            level,
        } => {
            let update = build_update(recto, verso, image, clear_image, level);
            if update == CardUpdate::default() {
                return Err("Nothing to change: pass at least one of --recto, --verso, --image, --clear-image or --level".into());
            }
            let card = client.update_card(category_id, theme_id, card_id, &update).await?;
            output::print_card(&card, config);
        }
        CardCommands::Delete { category_id, theme_id, card_id } => {
            client.delete_card(category_id, theme_id, card_id).await?;
            output::print_success(&format!("Deleted card {}", card_id), config);
        }
    }
    Ok(())
}
