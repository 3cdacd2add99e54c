//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Card
//!
//! ```text
//! Card
//!     Name: Amina Noor
//!     Template: Emerald Green (emerald)
//!     Message: "May your heart be filled with peace and joy"
//!     Share: https://cards.example.com/?name=Amina%2520Noor&template=emerald
//!
//! Files
//!     page → out/index.html
//!     state → out/card.json
//!     card → out/Skaka-Ramadan-Card-Amina Noor.png
//!
//! Toasts
//!     [info] Preparing your card...
//!     [success] Card downloaded successfully!
//! ```
//!
//! ## Templates
//!
//! ```text
//! 001 elegant  Elegant Blue
//!     Accent: #d4af37
//!     Pattern: islamic-a
//! ```
//!
//! # Architecture
//!
//! Each listing has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::app::App;
use crate::messages;
use crate::notify::Toast;
use crate::templates::{self, PatternKind};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as a zero-padded 3-digit string.
fn format_index(pos: usize) -> String {
    format!("{:03}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn pattern_label(pattern: PatternKind) -> &'static str {
    match pattern {
        PatternKind::IslamicA => "islamic-a",
        PatternKind::IslamicB => "islamic-b",
        PatternKind::Stars => "stars",
        PatternKind::Geometric => "geometric",
    }
}

// ============================================================================
// Card
// ============================================================================

/// Files written by a CLI run.
#[derive(Debug, Clone, Copy, Default)]
pub struct WrittenFiles<'a> {
    pub page: Option<&'a Path>,
    pub state: Option<&'a Path>,
    pub card: Option<&'a Path>,
}

pub fn format_card_output(app: &App, files: WrittenFiles) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Card".to_string());
    match app.card() {
        Some(card) => {
            lines.push(format!("{}Name: {}", indent(1), card.name));
            lines.push(format!(
                "{}Template: {} ({})",
                indent(1),
                card.template.name,
                card.template.id
            ));
            lines.push(format!("{}Message: \"{}\"", indent(1), card.message));
            lines.push(format!("{}Share: {}", indent(1), app.share_url()));
        }
        None => lines.push(format!("{}(no card generated)", indent(1))),
    }

    let written = [("page", files.page), ("state", files.state), ("card", files.card)];
    if written.iter().any(|(_, path)| path.is_some()) {
        lines.push(String::new());
        lines.push("Files".to_string());
        for (label, path) in written {
            if let Some(path) = path {
                lines.push(format!("{}{} → {}", indent(1), label, path.display()));
            }
        }
    }

    let toasts = format_toasts(app.toast_history());
    if !toasts.is_empty() {
        lines.push(String::new());
        lines.push("Toasts".to_string());
        lines.extend(toasts);
    }
    lines
}

pub fn print_card_output(app: &App, files: WrittenFiles) {
    for line in format_card_output(app, files) {
        println!("{}", line);
    }
}

pub fn format_toasts(toasts: &[Toast]) -> Vec<String> {
    toasts
        .iter()
        .map(|toast| format!("{}[{}] {}", indent(1), toast.severity, toast.message))
        .collect()
}

// ============================================================================
// Registry listings
// ============================================================================

pub fn format_templates() -> Vec<String> {
    let mut lines = Vec::new();
    for (i, template) in templates::all().iter().enumerate() {
        lines.push(format!(
            "{} {}  {}",
            format_index(i + 1),
            template.id,
            template.name
        ));
        lines.push(format!("{}Accent: {}", indent(1), template.accent));
        lines.push(format!(
            "{}Pattern: {}",
            indent(1),
            pattern_label(template.pattern)
        ));
    }
    lines
}

pub fn print_templates() {
    for line in format_templates() {
        println!("{}", line);
    }
}

pub fn format_messages() -> Vec<String> {
    messages::all()
        .iter()
        .enumerate()
        .map(|(i, message)| format!("{} {}", format_index(i + 1), message))
        .collect()
}

pub fn print_messages() {
    for line in format_messages() {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::path::PathBuf;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    #[test]
    fn templates_listing() {
        let lines = format_templates();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "001 elegant  Elegant Blue");
        assert_eq!(lines[1], "    Accent: #d4af37");
        assert_eq!(lines[2], "    Pattern: islamic-a");
        assert_eq!(lines[9], "004 warm  Warm Gold");
    }

    #[test]
    fn messages_listing() {
        let lines = format_messages();
        assert_eq!(lines.len(), messages::all().len());
        assert_eq!(lines[0], format!("001 {}", messages::first()));
    }

    #[test]
    fn card_output_before_generation() {
        let app = test_app("https://cards.example.com/");
        let lines = format_card_output(&app, WrittenFiles::default());
        assert_eq!(lines, vec!["Card", "    (no card generated)"]);
    }

    #[test]
    fn card_output_lists_card_files_and_toasts() {
        let mut app = test_app("https://cards.example.com/");
        app.set_name("Amina");
        app.select_template("emerald");
        app.generate().unwrap();
        app.run_until_idle();
        let mut sink = MemorySink::default();
        app.download(&MockRasterizer::new(), &mut sink).unwrap();

        let page = PathBuf::from("out/index.html");
        let card = PathBuf::from("out/Skaka-Ramadan-Card-Amina.png");
        let lines = format_card_output(
            &app,
            WrittenFiles {
                page: Some(&page),
                state: None,
                card: Some(&card),
            },
        );

        assert_eq!(lines[1], "    Name: Amina");
        assert_eq!(lines[2], "    Template: Emerald Green (emerald)");
        assert_eq!(
            lines[4],
            "    Share: https://cards.example.com/?name=Amina&template=emerald"
        );
        assert!(lines.contains(&"    page → out/index.html".to_string()));
        assert!(lines.contains(&"    card → out/Skaka-Ramadan-Card-Amina.png".to_string()));
        assert_eq!(
            &lines[lines.len() - 2..],
            &[
                "    [info] Preparing your card...".to_string(),
                "    [success] Card downloaded successfully!".to_string(),
            ]
        );
    }
}
