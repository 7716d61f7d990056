//! Display utilities for the perso CLI

use colored::Colorize;
use std::fmt::Display;

/// A formatted section title
pub struct SectionTitle<'a>(pub &'a str);

impl Display for SectionTitle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\n{}", self.0.bold().underline())
    }
}

/// Format a section header
pub const fn section_title(title: &str) -> SectionTitle<'_> {
    SectionTitle(title)
}

/// Format a success message
pub fn success(message: &str) -> String {
    format!("✅ {}", message.green().bold())
}

/// Format a warning message
pub fn warning(message: &str) -> String {
    format!("⚠️  {}", message.yellow().bold())
}

/// Format an error message
pub fn failure(message: &str) -> String {
    format!("❌ {}", message.red().bold())
}
