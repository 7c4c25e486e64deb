use clap::ValueEnum;
use flashdeck::dto::SessionView;
use flashdeck::models::{Card, Category, Theme};
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just IDs or counts)
    pub quiet: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode output: {}", e),
    }
}

/// Prints a list of categories in the specified format
pub fn print_categories(categories: &[Category], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if categories.is_empty() {
                if !config.quiet {
                    println!("No categories found.");
                }
                return;
            }
            if config.quiet {
                for category in categories {
                    println!("{}", category.get_id());
                }
                return;
            }
            let max_name = categories.iter().map(|c| c.get_name().len()).max().unwrap_or(4).max(4);
            println!("{:>4}  {:<name_w$}  {:>6}  {:>5}", "ID", "NAME", "THEMES", "CARDS", name_w = max_name);
            for category in categories {
                println!(
                    "{:>4}  {:<name_w$}  {:>6}  {:>5}",
                    category.get_id(),
                    category.get_name(),
                    category.get_themes().len(),
                    category.card_count(),
                    name_w = max_name,
                );
            }
        }
        OutputFormat::Json => print_json(categories),
    }
}

/// Prints a single category and its themes in the specified format
pub fn print_category(category: &Category, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", category.get_id());
                return;
            }
            println!("ID:     {}", category.get_id());
            println!("Name:   {}", category.get_name());
            println!("Cards:  {}", category.card_count());
            if category.get_themes().is_empty() {
                println!("Themes: none");
                return;
            }
            println!("Themes:");
            for theme in category.get_themes() {
                println!("  {:>4}  {} ({} cards)", theme.get_id(), theme.get_name(), theme.get_cards().len());
            }
        }
        OutputFormat::Json => print_json(category),
    }
}

/// Prints a single theme and its cards in the specified format
pub fn print_theme(theme: &Theme, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", theme.get_id());
                return;
            }
            println!("ID:    {}", theme.get_id());
            println!("Name:  {}", theme.get_name());
            println!("Cards: {}", theme.get_cards().len());
        }
        OutputFormat::Json => print_json(theme),
    }
}

/// Prints a list of cards in the specified format
pub fn print_cards(cards: &[Card], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if cards.is_empty() {
                if !config.quiet {
                    println!("No cards found.");
                }
                return;
            }
            if config.quiet {
                for card in cards {
                    println!("{}", card.get_id());
                }
                return;
            }
            let max_recto = cards.iter().map(|c| c.get_recto().len()).max().unwrap_or(5).max(5);
            println!(
                "{:>4}  {:>5}  {:<16}  {:<recto_w$}  VERSO",
                "ID",
                "LEVEL",
                "NEXT REVIEW",
                "RECTO",
                recto_w = max_recto,
            );
            for card in cards {
                println!(
                    "{:>4}  {:>5}  {:<16}  {:<recto_w$}  {}",
                    card.get_id(),
                    card.get_level(),
                    card.get_next_review().format("%Y-%m-%d %H:%M"),
                    card.get_recto(),
                    card.get_verso(),
                    recto_w = max_recto,
                );
            }
        }
        OutputFormat::Json => print_json(cards),
    }
}

/// Prints a single card in the specified format
pub fn print_card(card: &Card, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", card.get_id());
                return;
            }
            println!("ID:          {}", card.get_id());
            println!("Recto:       {}", card.get_recto());
            println!("Verso:       {}", card.get_verso());
            match card.get_image() {
                Some(image) => println!("Image:       {}", image),
                None => println!("Image:       none"),
            }
            println!("Level:       {}", card.get_level());
            println!("Next Review: {}", card.get_next_review());
        }
        OutputFormat::Json => print_json(card),
    }
}

/// Prints the study session, showing the side of the current card that is up
pub fn print_session(view: &SessionView, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", view.remaining);
                return;
            }
            let (Some(category_id), Some(theme_id)) = (view.category_id, view.theme_id) else {
                println!("No study session in progress.");
                return;
            };
            println!("Session: category {}, theme {} ({} remaining)", category_id, theme_id, view.remaining);
            match &view.current_card {
                Some(card) if view.recto => println!("[{}] {}", card.get_id(), card.get_recto()),
                Some(card) => println!("[{}] {}", card.get_id(), card.get_verso()),
                None if view.remaining == 0 => println!("All due cards reviewed."),
                None => println!("No card selected. Use `study next` to return to the first card."),
            }
        }
        OutputFormat::Json => print_json(view),
    }
}

/// Prints a success message
pub fn print_success(message: &str, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if !config.quiet {
                println!("{}", message);
            }
        }
        OutputFormat::Json => print_json(&serde_json::json!({"status": "ok", "message": message})),
    }
}
