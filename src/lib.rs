//! # Ramadan Card
//!
//! A personalized Ramadan greeting-card generator. Enter a name, pick one of
//! four designs, and get a card carrying a randomly chosen greeting. Cards
//! are shareable through a link and downloadable as a PNG.
//!
//! # Architecture: Headless App, Pure Renderers
//!
//! The app is a state machine with no UI runtime behind it. Everything a
//! browser page would show is derived from [`app::App`] by pure functions:
//!
//! ```text
//! App state ──▶ card::render_card   ──▶ SVG card  ──▶ export ──▶ PNG
//!          ├──▶ page::render_page   ──▶ HTML snapshot
//!          └──▶ share (URL query)   ──▶ shareable link
//! ```
//!
//! Time is virtual. The step transition, overlay lifetimes and toast
//! dismissal are tasks in a [`timers::Timers`] queue that only moves when the
//! caller advances it, so a test can walk through the whole choreography
//! without sleeping.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Wizard controller: name validation, generation, download, reset, URL sync |
//! | [`card`] | Pure `(name, template, message) → SVG` card renderer using Maud |
//! | [`page`] | Full HTML snapshot of the app |
//! | [`export`] | SVG → PNG via `resvg`, frame cache, download sinks |
//! | [`share`] | Card ⇄ URL query projection (`?name=…&template=…`) |
//! | [`templates`] | The four static designs |
//! | [`messages`] | The greeting pool |
//! | [`overlay`] | Lantern and star particle batches with self-expiry |
//! | [`notify`] | Single-slot toast with auto-dismiss |
//! | [`music`] | Background music play/pause state |
//! | [`timers`] | Virtual-time task queue with cancellation handles |
//! | [`random`] | Injectable randomness |
//! | [`naming`] | Download file names |
//! | [`config`] | `config.toml` loading, validation, merging over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## SVG Card, Rasterized in Rust
//!
//! The card is SVG built with [Maud](https://maud.lambda.xyz/) rather than a
//! screenshot of styled HTML. The same markup is inlined in the page and fed
//! to `resvg` for the download, so the PNG always matches what the page shows
//! and no browser is needed to produce it.
//!
//! ## Explicit Randomness
//!
//! Message picks and particle layouts draw from a [`random::RandomSource`].
//! The CLI uses the OS-seeded generator (or `--seed`); tests script exact
//! values.

pub mod app;
pub mod card;
pub mod config;
pub mod export;
pub mod messages;
pub mod music;
pub mod naming;
pub mod notify;
pub mod output;
pub mod overlay;
pub mod page;
pub mod random;
pub mod share;
pub mod templates;
pub mod timers;

#[cfg(test)]
pub(crate) mod test_helpers;
