//! Background music: the play/pause state of a muted nasheed embed.
//!
//! The prompt is offered once. Playing or dismissing it hides it for good;
//! pausing afterwards leaves only the (re-)play control.

use serde::Serialize;

/// Video embedded while music is playing.
pub const EMBED_VIDEO_ID: &str = "MFMFVupioMY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MusicPlayer {
    playing: bool,
    prompt_visible: bool,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self {
            playing: false,
            prompt_visible: true,
        }
    }
}

impl MusicPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self) {
        self.playing = true;
        self.prompt_visible = false;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Returns the new playing state.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
        self.playing
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt_visible = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The "Play Background Music" prompt is only offered while idle.
    pub fn prompt_shown(&self) -> bool {
        self.prompt_visible && !self.playing
    }

    /// Embed source, present only while playing.
    pub fn embed_url(&self) -> Option<String> {
        self.playing.then(|| {
            format!(
                "https://www.youtube.com/embed/{id}?autoplay=1&loop=1&playlist={id}",
                id = EMBED_VIDEO_ID
            )
        })
    }
}
