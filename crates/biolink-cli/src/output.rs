//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use biolink_core::{LinkItem, Settings};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single link
    pub fn print_link(&self, link: &LinkItem) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", link.id);
                println!("Title:   {}", link.title);
                println!("URL:     {}", link.url);
                println!(
                    "Visible: {}",
                    if link.hidden { "no (hidden)" } else { "yes" }
                );
            }
            OutputFormat::Json => print_json(link),
            OutputFormat::Quiet => {
                println!("{}", link.id);
            }
        }
    }

    /// Print the link list in stored order
    pub fn print_links(&self, links: &[LinkItem]) {
        match self.format {
            OutputFormat::Human => {
                if links.is_empty() {
                    println!("No links found.");
                    return;
                }
                for (position, link) in links.iter().enumerate() {
                    let marker = if link.hidden { " (hidden)" } else { "" };
                    println!(
                        "{:>2}. {} | {}{} | {}",
                        position + 1,
                        short_id(&link.id),
                        truncate(&link.title, 35),
                        marker,
                        truncate(&link.url, 45)
                    );
                }
                let hidden = links.iter().filter(|l| l.hidden).count();
                println!("\n{} link(s), {} hidden", links.len(), hidden);
            }
            OutputFormat::Json => print_json(links),
            OutputFormat::Quiet => {
                for link in links {
                    println!("{}", link.id);
                }
            }
        }
    }

    /// Print the page settings
    pub fn print_settings(&self, settings: &Settings) {
        match self.format {
            OutputFormat::Human => {
                println!("Title:         {}", settings.title);
                println!("Subtitle:      {}", settings.subtitle);
                if settings.profile_image.is_empty() {
                    println!(
                        "Profile image: (not set, using {})",
                        settings.profile_image_or_placeholder()
                    );
                } else {
                    println!("Profile image: {}", settings.profile_image);
                }
            }
            OutputFormat::Json => print_json(settings),
            OutputFormat::Quiet => {
                println!("{}", settings.title);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// First 8 characters of an id, enough to address it with a prefix
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
