//! Application controller: the two-step card wizard.
//!
//! [`App`] owns every piece of mutable state: the wizard [`Step`], the name
//! being typed, the selected template, the current message, the toast slot,
//! both celebration overlays, the music player and the page URL. Delayed
//! effects are tasks in the app's own [`Timers`] queue and only run when the
//! caller moves virtual time with [`App::advance`] or [`App::run_until_idle`].
//!
//! ```text
//!            generate() ok            +transition delay
//!   Input ──────────────────▶ pending ─────────────────▶ Result
//!     ▲                                                    │
//!     └──────────────────────── reset() ───────────────────┘
//! ```
//!
//! The URL mirrors the committed card: a commit writes `name` and `template`,
//! a reset strips them. Opening a URL that already carries a name
//! ([`App::mount`]) skips straight to the transition.
//!
//! Downloads are split into [`App::begin_download`] and
//! [`App::complete_download`] so the rasterization can happen outside the
//! controller. Only one job may be outstanding at a time.

use crate::card::{self, CardView};
use crate::config::CardConfig;
use crate::export::{DownloadSink, ExportError, ExportOptions, RasterImage, Rasterizer};
use crate::messages;
use crate::music::MusicPlayer;
use crate::naming;
use crate::notify::{Toast, ToastExpired, ToastSlot};
use crate::overlay::{BatchExpired, Lantern, Overlay, OverlayKind, Star};
use crate::random::RandomSource;
use crate::share::{self, LinkIssue};
use crate::templates::{self, Template};
use crate::timers::{TimerId, Timers};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

/// Shortest accepted name after trimming, in UTF-16 code units (the length a
/// browser reports), so a single astral character such as an emoji passes.
pub const MIN_NAME_UNITS: usize = 2;

pub const PREPARING_MESSAGE: &str = "Preparing your card...";
pub const DOWNLOADED_MESSAGE: &str = "Card downloaded successfully!";
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Error downloading card";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Input,
    Result,
}

/// Why a name was refused. The display text is the toast shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    #[error("Please enter your name first")]
    Empty,
    #[error("Name is too short")]
    TooShort,
}

/// Trim `name` and check it is long enough to put on a card.
pub fn validate_name(name: &str) -> Result<&str, NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.encode_utf16().count() < MIN_NAME_UNITS {
        return Err(NameError::TooShort);
    }
    Ok(trimmed)
}

/// The card produced by a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardState {
    pub name: String,
    pub template: &'static Template,
    pub message: &'static str,
}

/// Serializable view of the whole app at one instant.
#[derive(Debug, Serialize)]
pub struct AppSnapshot<'a> {
    pub step: Step,
    pub name: &'a str,
    pub template: &'static Template,
    pub message: &'static str,
    pub card: Option<&'a CardState>,
    pub share_url: &'a str,
    pub toast: Option<&'a Toast>,
    pub toasts: &'a [Toast],
    pub lanterns: &'a [Lantern],
    pub stars: &'a [Star],
    pub music: &'a MusicPlayer,
    pub downloading: bool,
    /// Virtual time in milliseconds.
    pub now_ms: u64,
}

/// An export that has been started but not yet resolved.
///
/// Only [`App::begin_download`] creates one.
#[derive(Debug, Clone)]
pub struct ExportJob {
    svg: String,
    filename: String,
    options: ExportOptions,
}

impl ExportJob {
    /// Card markup to rasterize.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }
}

/// A step transition waiting for its delay.
#[derive(Debug)]
struct Commit {
    name: String,
    template: &'static Template,
    /// Write the card into the URL (generation) or leave it (shared link).
    sync_url: bool,
    /// Start the overlays on arrival (shared link) rather than on request.
    celebrate: bool,
}

#[derive(Debug)]
enum Task {
    Commit(Commit),
    Toast(ToastExpired),
    Overlay(BatchExpired),
}

impl From<ToastExpired> for Task {
    fn from(event: ToastExpired) -> Self {
        Task::Toast(event)
    }
}

impl From<BatchExpired> for Task {
    fn from(event: BatchExpired) -> Self {
        Task::Overlay(event)
    }
}

pub struct App {
    step: Step,
    name: String,
    template: &'static Template,
    message: &'static str,
    card: Option<CardState>,
    celebrating: bool,
    url: Url,

    school: String,
    file_prefix: String,
    transition_delay: Duration,
    export_options: ExportOptions,

    toast: ToastSlot,
    lanterns: Overlay<Lantern>,
    stars: Overlay<Star>,
    music: MusicPlayer,
    downloading: bool,
    mounted: bool,

    pending: Option<TimerId>,
    timers: Timers<Task>,
    rng: Box<dyn RandomSource>,
}

impl App {
    /// A fresh app at `url`. Nothing is read from the URL until [`mount`](Self::mount).
    pub fn new(config: &CardConfig, url: Url, rng: Box<dyn RandomSource>) -> Self {
        let timing = &config.timing;
        Self {
            step: Step::Input,
            name: String::new(),
            template: templates::default_template(),
            message: messages::first(),
            card: None,
            celebrating: false,
            url,
            school: config.branding.school.clone(),
            file_prefix: config.branding.file_prefix.clone(),
            transition_delay: timing.transition_delay(),
            export_options: ExportOptions::from_config(&config.export),
            toast: ToastSlot::new(timing.toast()),
            lanterns: Overlay::new(config.overlays.lantern_count, timing.lanterns()),
            stars: Overlay::new(config.overlays.star_count, timing.stars()),
            music: MusicPlayer::new(),
            downloading: false,
            mounted: false,
            pending: None,
            timers: Timers::new(),
            rng,
        }
    }

    /// Adopt a card carried by the URL, if any, and schedule the transition
    /// to its result. Only the first call has an effect.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        let shared = match share::inspect(&self.url) {
            Ok(Some(shared)) => shared,
            Ok(None) => return,
            Err(LinkIssue::Undecodable(raw)) => {
                warn!(raw = %raw, "ignoring undecodable name in link");
                return;
            }
            Err(LinkIssue::Blank) => {
                warn!("ignoring blank name in link");
                return;
            }
        };
        let name = shared.name.trim().to_string();
        self.name = shared.name;
        if let Some(id) = shared.template.as_deref() {
            match templates::find(id) {
                Some(template) => self.template = template,
                None => warn!(template = id, "unknown template in link, keeping default"),
            }
        }
        self.message = messages::pick(self.rng.as_mut());
        info!(name = %name, template = self.template.id, "opening shared card");

        self.schedule_commit(Commit {
            name,
            template: self.template,
            sync_url: false,
            celebrate: true,
        });
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Select a template by id. Unknown ids leave the selection alone.
    pub fn select_template(&mut self, id: &str) -> bool {
        match templates::find(id) {
            Some(template) => {
                self.template = template;
                true
            }
            None => {
                debug!(template = id, "unknown template id");
                false
            }
        }
    }

    /// Validate the name and, if it passes, roll a message, start the
    /// celebration and schedule the move to the result step.
    ///
    /// A refused name is reported with an error toast; state is untouched.
    pub fn generate(&mut self) -> Result<(), NameError> {
        let name = match validate_name(&self.name) {
            Ok(name) => name.to_string(),
            Err(reason) => {
                debug!(%reason, "generation refused");
                self.show_toast(Toast::error(reason.to_string()));
                return Err(reason);
            }
        };

        self.message = messages::pick(self.rng.as_mut());
        self.celebrate();
        self.schedule_commit(Commit {
            name,
            template: self.template,
            sync_url: true,
            celebrate: false,
        });
        Ok(())
    }

    /// Start an export of the current card.
    ///
    /// Returns `None` without side effects when a job is already outstanding
    /// or there is no card on screen.
    pub fn begin_download(&mut self) -> Option<ExportJob> {
        if self.downloading {
            debug!("download already in progress");
            return None;
        }
        let view = self.card_view()?;
        let job = ExportJob {
            svg: card::render_card_svg(&view),
            filename: naming::download_filename(&self.file_prefix, view.name),
            options: self.export_options,
        };

        self.downloading = true;
        self.show_toast(Toast::info(PREPARING_MESSAGE));
        info!(file = %job.filename, "download started");
        Some(job)
    }

    /// Resolve `job` with the rasterizer's `result`, saving the PNG through
    /// `sink`. The in-progress flag is cleared whatever happens.
    pub fn complete_download(
        &mut self,
        job: ExportJob,
        result: Result<RasterImage, ExportError>,
        sink: &mut dyn DownloadSink,
    ) -> Option<PathBuf> {
        let saved = result.and_then(|image| {
            sink.save(&job.filename, &image.png)
                .map_err(ExportError::from)
        });
        self.downloading = false;

        match saved {
            Ok(path) => {
                info!(path = %path.display(), "card downloaded");
                self.show_toast(Toast::success(DOWNLOADED_MESSAGE));
                Some(path)
            }
            Err(err) => {
                error!(file = %job.filename, error = %err, "download failed");
                self.show_toast(Toast::error(DOWNLOAD_FAILED_MESSAGE));
                None
            }
        }
    }

    /// Export and save the current card in one go.
    pub fn download(
        &mut self,
        rasterizer: &dyn Rasterizer,
        sink: &mut dyn DownloadSink,
    ) -> Option<PathBuf> {
        let job = self.begin_download()?;
        let result = rasterizer.rasterize(job.svg(), job.options());
        self.complete_download(job, result, sink)
    }

    /// Back to an empty input step. Cancels a pending transition and strips
    /// the card from the URL.
    pub fn reset(&mut self) {
        if let Some(timer) = self.pending.take() {
            self.timers.cancel(timer);
            debug!("pending transition cancelled");
        }
        let from = self.step;
        self.step = Step::Input;
        self.name.clear();
        self.message = messages::first();
        self.card = None;
        share::clear(&mut self.url);
        info!(from = ?from, "reset to input");
    }

    /// Move virtual time forward by `by`, running every task that falls due.
    pub fn advance(&mut self, by: Duration) {
        let until = self.timers.now() + by;
        while let Some((timer, task)) = self.timers.pop_due(until) {
            debug!(?timer, at_ms = self.timers.now().as_millis() as u64, "timer fired");
            self.fire(task);
        }
        self.timers.advance_to(until);
    }

    /// Run until no task is pending. Returns the virtual time reached.
    pub fn run_until_idle(&mut self) -> Duration {
        while let Some(deadline) = self.timers.next_deadline() {
            let by = deadline.saturating_sub(self.timers.now());
            self.advance(by);
        }
        self.timers.now()
    }

    /// Cancel every pending effect. Nothing scheduled before this call will
    /// ever run.
    pub fn dispose(&mut self) {
        self.pending = None;
        self.toast.dismiss(&mut self.timers);
        self.lanterns.dispose(&mut self.timers);
        self.stars.dispose(&mut self.timers);
        let cancelled = self.timers.clear();
        debug!(cancelled, "app disposed");
    }

    pub fn dismiss_toast(&mut self) {
        self.toast.dismiss(&mut self.timers);
    }

    /// Returns whether music is now playing.
    pub fn toggle_music(&mut self) -> bool {
        let playing = self.music.toggle();
        debug!(playing, "music toggled");
        playing
    }

    pub fn dismiss_music_prompt(&mut self) {
        self.music.dismiss_prompt();
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// The name as typed (untrimmed).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &'static Template {
        self.template
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn card(&self) -> Option<&CardState> {
        self.card.as_ref()
    }

    /// The card as the renderer sees it, while one is on screen.
    pub fn card_view(&self) -> Option<CardView<'_>> {
        if self.step != Step::Result {
            return None;
        }
        self.card.as_ref().map(|card| CardView {
            name: &card.name,
            template: card.template,
            message: card.message,
            school: &self.school,
        })
    }

    pub fn school(&self) -> &str {
        &self.school
    }

    /// Whether the celebration has been started at least once.
    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.current()
    }

    /// Every toast shown so far, oldest first.
    pub fn toast_history(&self) -> &[Toast] {
        self.toast.history()
    }

    pub fn lanterns(&self) -> &[Lantern] {
        self.lanterns.particles()
    }

    pub fn stars(&self) -> &[Star] {
        self.stars.particles()
    }

    pub fn music(&self) -> &MusicPlayer {
        &self.music
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    pub fn is_transition_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// The page URL, carrying the committed card.
    pub fn share_url(&self) -> &Url {
        &self.url
    }

    pub fn snapshot(&self) -> AppSnapshot<'_> {
        AppSnapshot {
            step: self.step,
            name: &self.name,
            template: self.template,
            message: self.message,
            card: self.card.as_ref(),
            share_url: self.url.as_str(),
            toast: self.toast.current(),
            toasts: self.toast.history(),
            lanterns: self.lanterns.particles(),
            stars: self.stars.particles(),
            music: &self.music,
            downloading: self.downloading,
            now_ms: self.timers.now().as_millis() as u64,
        }
    }

    fn show_toast(&mut self, toast: Toast) {
        debug!(severity = %toast.severity, message = %toast.message, "toast");
        self.toast.show(toast, &mut self.timers);
    }

    fn celebrate(&mut self) {
        self.celebrating = true;
        self.lanterns.activate(self.rng.as_mut(), &mut self.timers);
        self.stars.activate(self.rng.as_mut(), &mut self.timers);
    }

    fn schedule_commit(&mut self, commit: Commit) {
        if let Some(timer) = self.pending.take() {
            self.timers.cancel(timer);
            debug!("replacing pending transition");
        }
        let delay = self.transition_delay;
        self.pending = Some(self.timers.schedule(delay, Task::Commit(commit)));
        debug!(delay_ms = delay.as_millis() as u64, "transition scheduled");
    }

    fn fire(&mut self, task: Task) {
        match task {
            Task::Commit(commit) => self.commit(commit),
            Task::Toast(event) => {
                if self.toast.expire(event) {
                    debug!("toast expired");
                }
            }
            Task::Overlay(event) => {
                let cleared = match event.kind {
                    OverlayKind::Lanterns => self.lanterns.expire(event),
                    OverlayKind::Stars => self.stars.expire(event),
                };
                if cleared {
                    debug!(kind = ?event.kind, "overlay batch expired");
                }
            }
        }
    }

    fn commit(&mut self, commit: Commit) {
        self.pending = None;
        if commit.sync_url {
            share::write(&mut self.url, &commit.name, commit.template.id);
        }
        info!(
            name = %commit.name,
            template = commit.template.id,
            "step -> result"
        );
        self.step = Step::Result;
        self.card = Some(CardState {
            name: commit.name,
            template: commit.template,
            message: self.message,
        });
        if commit.celebrate {
            self.celebrate();
        }
    }
}
