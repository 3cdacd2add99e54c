//! HTML snapshot of the app, rendered with Maud.
//!
//! The page is a static picture of one moment of an [`App`]: whatever step,
//! toast, overlays and music state the controller holds when
//! [`render_page`] is called. There is no script; animations are CSS
//! keyframes driven by the per-particle delays and durations.
//!
//! ## Layout
//!
//! - **Header**: school banner, title, tagline
//! - **Input step**: name field, template picker, live card preview
//! - **Result step**: the finished card, download/reset controls, share link
//! - **Overlays**: floating lanterns and twinkling stars, while a batch is live
//! - **Toast**: the visible notification, if any
//! - **Music**: play prompt, pause button and the looping embed
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time. Template colors are
//! applied inline since they vary per card.

use crate::app::{App, Step};
use crate::card::{self, CardView};
use crate::music::MusicPlayer;
use crate::notify::{Severity, Toast};
use crate::overlay::{Lantern, Star};
use crate::templates::{self, Template};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../static/style.css");

pub const PAGE_TITLE: &str = "Ramadan Greeting Card";

/// Name shown on the preview card until something is typed.
const PREVIEW_PLACEHOLDER: &str = "Your Name";

const LANTERN_BODY: &str =
    "M20 40 C20 28 24 24 32 24 C40 24 44 28 44 40 L44 72 C44 80 40 88 32 88 C24 88 20 80 20 72 Z";
const SPARKLE: &str = "M12 2 L14 8 L20 10 L14 12 L12 18 L10 12 L4 10 L10 8 Z";

/// Render the whole page for the app's current state.
pub fn render_page(app: &App) -> Markup {
    let content = html! {
        (site_header(app.school()))
        main.steps {
            @match app.step() {
                Step::Input => (input_step(app)),
                Step::Result => (result_step(app)),
            }
        }
        (site_footer(app.school()))
        @if !app.lanterns().is_empty() {
            (lantern_layer(app.lanterns()))
        }
        @if !app.stars().is_empty() {
            (star_layer(app.stars()))
        }
        @if let Some(toast) = app.toast() {
            (toast_view(toast))
        }
        (music_widget(app.music()))
    };
    base_document(PAGE_TITLE, content)
}

pub fn render_page_html(app: &App) -> String {
    render_page(app).into_string()
}

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(school: &str) -> Markup {
    html! {
        header.site-header {
            div.school-banner {
                h2 { (school) }
                p { "Excellence in Education" }
            }
            h1 { "🌙 " (PAGE_TITLE) " ⭐" }
            p.tagline {
                "Create a beautiful personalized Ramadan greeting card and share it with your friends and family"
            }
        }
    }
}

fn input_step(app: &App) -> Markup {
    let trimmed = app.name().trim();
    let preview = CardView {
        name: if trimmed.is_empty() { PREVIEW_PLACEHOLDER } else { trimmed },
        template: app.template(),
        message: app.message(),
        school: app.school(),
    };
    html! {
        section.step.step-input {
            div.panel {
                h2 { "Create Your Card" }
                label for="name" { "Your Name" }
                input #name type="text" name="name" value=(app.name())
                    placeholder="Enter your name here...";
                label { "Choose Design Style" }
                div.template-picker {
                    @for template in templates::all() {
                        (template_option(template, template.id == app.template().id))
                    }
                }
                button.generate type="button" { "✨ Generate Card 🌙" }
            }
            div.panel.preview {
                h2 { "Card Preview" }
                div.card-frame.is-preview {
                    (card::render_card(&preview))
                }
            }
        }
    }
}

fn template_option(template: &Template, selected: bool) -> Markup {
    html! {
        div.template-option.selected[selected] data-template=(template.id) {
            div.swatch style=(format!("background: {}", template.background.to_css())) {
                div.accent-dot style=(format!("background-color: {}", template.accent)) {}
            }
            span { (template.name) }
        }
    }
}

fn result_step(app: &App) -> Markup {
    html! {
        section.step.step-result {
            @if let Some(view) = app.card_view() {
                div.card-frame {
                    (card::render_card(&view))
                }
            }
            div.actions {
                button.download type="button" disabled[app.is_downloading()] {
                    "📥 "
                    @if app.is_downloading() { "Downloading..." } @else { "Download Card" }
                }
                button.reset type="button" { "🔄 Create New Card" }
            }
            div.share {
                p { "💡 Share your beautiful Ramadan card with friends and family!" }
                a.share-link href=(app.share_url().as_str()) { (app.share_url().as_str()) }
            }
        }
    }
}

fn site_footer(school: &str) -> Markup {
    html! {
        footer.site-footer {
            span { "Made with ❤️ for Ramadan 1446H" }
            span { (school) " - Ramadan Mubarak" }
        }
    }
}

fn lantern_layer(lanterns: &[Lantern]) -> Markup {
    html! {
        div.overlay.lanterns aria-hidden="true" {
            @for lantern in lanterns {
                div.lantern style=(format!(
                    "left: {:.2}%; width: {:.1}px; animation-delay: {:.2}s; animation-duration: {:.2}s",
                    lantern.x, lantern.size, lantern.delay, lantern.duration
                )) {
                    svg viewBox="0 0 64 96" fill="none" {
                        path d=(LANTERN_BODY) fill="#f7c948" stroke="#ffd700" stroke-width="2" {}
                        rect x="26" y="16" width="12" height="8" rx="2" fill="#ffd700" {}
                        path d="M24 16 C24 8 40 8 40 16" stroke="#ffd700" stroke-width="2" fill="none" {}
                        ellipse cx="32" cy="50" rx="10" ry="12" fill="#fff8dc" opacity="0.4" {}
                    }
                }
            }
        }
    }
}

fn star_layer(stars: &[Star]) -> Markup {
    html! {
        div.overlay.stars aria-hidden="true" {
            @for star in stars {
                div.sparkle style=(format!(
                    "left: {:.2}%; top: {:.2}%; animation-delay: {:.2}s",
                    star.x, star.y, star.delay
                )) {
                    svg width="24" height="24" viewBox="0 0 24 24" {
                        path d=(SPARKLE) fill="#ffd700" {}
                    }
                }
            }
        }
    }
}

fn toast_view(toast: &Toast) -> Markup {
    let icon = match toast.severity {
        Severity::Success => "✅",
        Severity::Error => "❌",
        Severity::Info => "⏳",
    };
    html! {
        div class=(format!("toast toast-{}", toast.severity)) role="status" {
            p { (icon) " " (toast.message) }
        }
    }
}

fn music_widget(music: &MusicPlayer) -> Markup {
    html! {
        @if music.prompt_shown() {
            div.music-prompt {
                div.music-icon { "🎵" }
                div {
                    p.music-title { "Play Background Music" }
                    p.music-subtitle { "Beautiful Ramadan Nasheed" }
                }
                button.music-play type="button" { "▶ Play" }
                button.music-dismiss type="button" aria-label="Dismiss" { "✕" }
            }
        }
        @if let Some(src) = music.embed_url() {
            button.music-playing type="button" aria-label="Pause music" { "🎵" }
            iframe.music-embed src=(src) allow="autoplay" title="Background music" {}
        }
    }
}
