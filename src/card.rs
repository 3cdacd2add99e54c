//! Card renderer.
//!
//! [`render_card`] is a pure function of the recipient name, the template,
//! the message and the school name. It produces a fixed-layout 400×500 SVG
//! document. The same markup is inlined into the HTML page preview and
//! handed to the [export pipeline](crate::export) for rasterization, so what
//! the user sees is exactly what gets downloaded.
//!
//! ## Layout (top to bottom)
//!
//! ```text
//! ┌──────────────────────────────┐
//! │╭        [school badge]      ╮│  corner ornaments
//! │            ( ☾ )             │  moon glyph
//! │       RAMADAN MUBARAK        │
//! │         رمضان مبارك          │  bilingual headline
//! │       Blessed Ramadan        │
//! │         ──────────           │  divider
//! │       Warm Wishes To         │
//! │            Amina             │  recipient
//! │   “May Allah accept your…”   │  quoted message (wrapped)
//! │ ♦  Every good wish for you ♦ │  lantern ornaments
//! │╰                            ╯│
//! └──────────────────────────────┘
//! ```
//!
//! Markup is generated with maud. Every SVG element gets an explicit
//! (possibly empty) body so the output is well-formed XML for `usvg`.

use crate::random::{RandomSource, SystemRandom};
use crate::templates::{PatternKind, Template};
use maud::{Markup, html};

pub const CARD_WIDTH: u32 = 400;
pub const CARD_HEIGHT: u32 = 500;

const CENTER_X: u32 = CARD_WIDTH / 2;
const FONT_STACK: &str = "'Noto Sans', 'Noto Naskh Arabic', 'DejaVu Sans', sans-serif";

/// Seed for the star-field pattern. Fixed so rendering stays pure.
const STAR_FIELD_SEED: u64 = 0x52_41_4d_41_44_41_4e;
const STAR_FIELD_COUNT: usize = 20;

/// Message lines wrap at this many characters.
const MESSAGE_WRAP: usize = 46;

const MOON_PATH: &str = "M12 3a9 9 0 1 0 9 9c0-.46-.04-.92-.1-1.36a5.389 5.389 0 0 1-4.4 2.26 5.403 5.403 0 0 1-3.14-9.8c-.44-.06-.9-.1-1.36-.1z";
const LANTERN_PATH: &str =
    "M20 0 L25 10 L30 25 C30 35 25 45 20 50 C15 45 10 35 10 25 L15 10 Z";
const STAR_POINTS: &str = "12,2 15,9 22,9 17,14 19,21 12,17 5,21 7,14 2,9 9,9";

/// Everything the card depends on.
#[derive(Debug, Clone, Copy)]
pub struct CardView<'a> {
    pub name: &'a str,
    pub template: &'a Template,
    pub message: &'a str,
    pub school: &'a str,
}

/// Render the card as a standalone SVG element.
pub fn render_card(view: &CardView) -> Markup {
    let t = view.template;
    let accent = t.accent;
    let name = view.name.trim();
    let name_size = name_font_size(name);
    let message_lines = wrap_words(view.message, MESSAGE_WRAP);
    let badge_width = badge_width(view.school);
    let badge_x = (CARD_WIDTH as f64 - badge_width) / 2.0;
    // message block is anchored so its last line sits at a fixed baseline
    let message_top = 424.0 - 14.0 * (message_lines.len().saturating_sub(1)) as f64;

    html! {
        svg xmlns="http://www.w3.org/2000/svg"
            width=(CARD_WIDTH) height=(CARD_HEIGHT)
            viewBox={ "0 0 " (CARD_WIDTH) " " (CARD_HEIGHT) }
            font-family=(FONT_STACK)
            data-template=(t.id) {
            defs {
                linearGradient id="card-bg" x1="0" y1="0" x2="1" y2="1" {
                    stop offset="0%" stop-color=(t.background.start) {}
                    stop offset="50%" stop-color=(t.background.middle) {}
                    stop offset="100%" stop-color=(t.background.end) {}
                }
                filter id="card-glow" x="-50%" y="-50%" width="200%" height="200%" {
                    feGaussianBlur stdDeviation="40" {}
                }
                clipPath id="card-clip" {
                    rect width=(CARD_WIDTH) height=(CARD_HEIGHT) rx="24" {}
                }
                (pattern_defs(t))
            }
            g clip-path="url(#card-clip)" {
                rect width=(CARD_WIDTH) height=(CARD_HEIGHT) fill="url(#card-bg)" {}
                (pattern_layer(t))

                // top glow
                circle cx=(CENTER_X) cy="0" r="128" fill=(accent) opacity="0.3"
                    filter="url(#card-glow)" {}

                // header badge
                g.badge {
                    rect x=(badge_x) y="36" width=(badge_width) height="32" rx="16"
                        fill=(accent) fill-opacity="0.08" {}
                    text x=(CENTER_X) y="57" text-anchor="middle" font-size="13"
                        font-weight="600" fill=(accent) { (view.school) }
                }

                // moon
                g.moon {
                    circle cx=(CENTER_X) cy="130" r="48" fill=(accent) fill-opacity="0.125" {}
                    g transform="translate(172 102) scale(2.3333)" fill=(accent) {
                        path d=(MOON_PATH) {}
                        circle cx="17" cy="7" r="1" {}
                        circle cx="19" cy="10" r="0.5" {}
                    }
                }

                // greeting
                text x=(CENTER_X) y="208" text-anchor="middle" font-size="13"
                    letter-spacing="2.6" fill=(accent) { "RAMADAN MUBARAK" }
                text.headline x=(CENTER_X) y="250" text-anchor="middle" font-size="36"
                    font-weight="700" fill=(accent) direction="rtl" { "رمضان مبارك" }
                text x=(CENTER_X) y="278" text-anchor="middle" font-size="15"
                    fill="#ffffff" fill-opacity="0.7" { "Blessed Ramadan" }

                rect.divider x="136" y="296" width="128" height="2" fill=(accent) {}

                // recipient
                text x=(CENTER_X) y="328" text-anchor="middle" font-size="13"
                    fill="#ffffff" fill-opacity="0.6" { "Warm Wishes To" }
                text.recipient x=(CENTER_X) y="362" text-anchor="middle" font-size=(name_size)
                    font-weight="700" fill=(accent) { (name) }

                // message
                text.message x=(CENTER_X) y=(message_top) text-anchor="middle" font-size="11"
                    font-style="italic" fill="#ffffff" fill-opacity="0.6" {
                    @for (i, line) in message_lines.iter().enumerate() {
                        @let dy = if i == 0 { 0 } else { 14 };
                        tspan x=(CENTER_X) dy=(dy) {
                            @if i == 0 { "\u{201C}" }
                            (line)
                            @if i + 1 == message_lines.len() { "\u{201D}" }
                        }
                    }
                }
                text x=(CENTER_X) y="452" text-anchor="middle" font-size="11"
                    fill="#ffffff" fill-opacity="0.5" { "Every good wish for you" }

                // lantern ornaments
                g opacity="0.2" fill=(accent) {
                    g transform="translate(32 404) scale(0.8)" { (lantern_ornament(accent)) }
                    g transform="translate(368 404) scale(-0.8 0.8)" { (lantern_ornament(accent)) }
                }

                // corner ornaments
                g fill="none" stroke=(accent) stroke-width="2" opacity="0.3" {
                    path d="M16 80 V32 A16 16 0 0 1 32 16 H80" {}
                    path d="M320 16 H368 A16 16 0 0 1 384 32 V80" {}
                    path d="M16 420 V468 A16 16 0 0 0 32 484 H80" {}
                    path d="M384 420 V468 A16 16 0 0 1 368 484 H320" {}
                }
            }
        }
    }
}

/// The card as an SVG document string.
pub fn render_card_svg(view: &CardView) -> String {
    render_card(view).into_string()
}

fn lantern_ornament(accent: &str) -> Markup {
    html! {
        path d=(LANTERN_PATH) {}
        circle cx="20" cy="35" r="8" fill="none" stroke=(accent) stroke-width="2" {}
    }
}

fn pattern_defs(t: &Template) -> Markup {
    html! {
        @match t.pattern {
            PatternKind::IslamicA | PatternKind::IslamicB => {
                pattern id="card-pattern" x="0" y="0" width="60" height="60"
                    patternUnits="userSpaceOnUse" {
                    path d="M30 0 L60 30 L30 60 L0 30 Z" fill="none" stroke=(t.accent)
                        stroke-width="1" {}
                    circle cx="30" cy="30" r="10" fill="none" stroke=(t.accent)
                        stroke-width="1" {}
                }
            }
            PatternKind::Geometric => {
                pattern id="card-pattern" x="0" y="0" width="20" height="20"
                    patternUnits="userSpaceOnUse" {
                    path d="M0 20 L20 0" stroke=(t.accent) stroke-width="1" {}
                }
            }
            PatternKind::Stars => {}
        }
    }
}

fn pattern_layer(t: &Template) -> Markup {
    let opacity = t.pattern.opacity();
    html! {
        @match t.pattern {
            PatternKind::Stars => {
                g.pattern opacity=(opacity) fill=(t.accent) {
                    @for (x, y) in star_field() {
                        polygon points=(STAR_POINTS)
                            transform={ "translate(" (x) " " (y) ") scale(0.5)" } {}
                    }
                }
            }
            _ => {
                rect.pattern width=(CARD_WIDTH) height=(CARD_HEIGHT) fill="url(#card-pattern)"
                    opacity=(opacity) {}
            }
        }
    }
}

/// Star positions for the `Stars` pattern, in card units.
fn star_field() -> Vec<(f64, f64)> {
    let mut rng = SystemRandom::seeded(STAR_FIELD_SEED);
    (0..STAR_FIELD_COUNT)
        .map(|_| {
            let x = (rng.in_range(0.0, 100.0) * CARD_WIDTH as f64 / 100.0).round();
            let y = (rng.in_range(0.0, 100.0) * CARD_HEIGHT as f64 / 100.0).round();
            (x, y)
        })
        .collect()
}

/// Long names shrink so they stay inside the card.
fn name_font_size(name: &str) -> u32 {
    let len = name.chars().count() as u32;
    if len <= 18 {
        24
    } else {
        (24 * 18 / len).max(14)
    }
}

fn badge_width(school: &str) -> f64 {
    let estimate = school.chars().count() as f64 * 7.2 + 40.0;
    estimate.clamp(120.0, 360.0)
}

/// Greedy word wrap at `max` characters. Words longer than `max` get a line
/// of their own.
fn wrap_words(text: &str, max: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = current.chars().count() + word.chars().count() + 1;
        if !current.is_empty() && needed > max {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    fn view<'a>(name: &'a str, template: &'a Template, message: &'a str) -> CardView<'a> {
        CardView {
            name,
            template,
            message,
            school: "Skaka International School",
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        for t in templates::all() {
            let v = view("Amina", t, "Ramadan Mubarak to you and your family");
            assert_eq!(render_card_svg(&v), render_card_svg(&v));
        }
    }

    #[test]
    fn contains_card_text() {
        let t = templates::find("emerald").unwrap();
        let svg = render_card_svg(&view("Amina", t, "May this Ramadan be the best one yet"));
        assert!(svg.contains(">Amina<"));
        assert!(svg.contains("May this Ramadan be the best one yet"));
        assert!(svg.contains("RAMADAN MUBARAK"));
        assert!(svg.contains("رمضان مبارك"));
        assert!(svg.contains("Blessed Ramadan"));
        assert!(svg.contains("Skaka International School"));
        assert!(svg.contains(r#"data-template="emerald""#));
    }

    #[test]
    fn colored_by_template() {
        let t = templates::find("warm").unwrap();
        let svg = render_card_svg(&view("Omar", t, "x"));
        assert!(svg.contains(r##"fill="#f4a830""##));
        assert!(svg.contains(r##"stop-color="#2a1f0a""##));
        assert!(!svg.contains("#d4af37"));
    }

    #[test]
    fn name_is_trimmed_and_escaped() {
        let t = templates::default_template();
        let svg = render_card_svg(&view("  <Sara & Co>  ", t, "x"));
        assert!(svg.contains(">&lt;Sara &amp; Co&gt;<"));
        assert!(!svg.contains("<Sara"));
    }

    #[test]
    fn pattern_markup_follows_kind() {
        let stars = render_card_svg(&view("Ali", templates::find("emerald").unwrap(), "x"));
        assert_eq!(stars.matches("<polygon").count(), STAR_FIELD_COUNT);
        assert!(!stars.contains("card-pattern"));

        let lattice = render_card_svg(&view("Ali", templates::find("royal").unwrap(), "x"));
        assert!(lattice.contains(r#"id="card-pattern""#));
        assert!(lattice.contains("M30 0 L60 30"));

        let hatch = render_card_svg(&view("Ali", templates::find("warm").unwrap(), "x"));
        assert!(hatch.contains("M0 20 L20 0"));
    }

    #[test]
    fn every_element_is_closed() {
        let svg = render_card_svg(&view("Ali", templates::find("elegant").unwrap(), "x"));
        assert_eq!(svg.matches("<rect").count(), svg.matches("</rect>").count());
        assert_eq!(svg.matches("<circle").count(), svg.matches("</circle>").count());
        assert_eq!(svg.matches("<path").count(), svg.matches("</path>").count());
    }

    #[test]
    fn svg_parses_with_usvg() {
        for t in templates::all() {
            let svg = render_card_svg(&view("Amina", t, crate::messages::first()));
            let tree = usvg::Tree::from_str(&svg, &usvg::Options::default());
            assert!(tree.is_ok(), "template {} produced invalid svg", t.id);
        }
    }

    #[test]
    fn long_names_shrink() {
        assert_eq!(name_font_size("Amina"), 24);
        assert_eq!(name_font_size(&"x".repeat(18)), 24);
        assert_eq!(name_font_size(&"x".repeat(27)), 16);
        assert_eq!(name_font_size(&"x".repeat(100)), 14);
    }

    #[test]
    fn wrap_words_breaks_on_width() {
        assert_eq!(wrap_words("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap_words("short", 46), vec!["short"]);
        assert_eq!(wrap_words("", 10), vec![""]);
        assert_eq!(wrap_words("unbreakable word", 5), vec!["unbreakable", "word"]);
    }

    #[test]
    fn message_quotes_wrap_the_whole_text() {
        let t = templates::default_template();
        let long = "Wishing you a month of blessings and forgiveness and many more good days";
        let svg = render_card_svg(&view("Ali", t, long));
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert_eq!(svg.matches('\u{201C}').count(), 1);
        assert_eq!(svg.matches('\u{201D}').count(), 1);
    }
}
