//! Shared test utilities for the ramadan-card test suite.
//!
//! Provides app builders with scripted randomness, an in-memory download
//! sink, and re-exports the recording rasterizer mock.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut app = test_app("https://cards.example.com/?name=Amina");
//! app.mount();
//! app.run_until_idle();
//!
//! let mut sink = MemorySink::default();
//! app.download(&MockRasterizer::new(), &mut sink);
//! assert_eq!(sink.filenames(), vec!["Skaka-Ramadan-Card-Amina.png"]);
//! ```

use std::path::PathBuf;
use url::Url;

use crate::app::App;
use crate::config::CardConfig;
use crate::export::{DownloadSink, SinkError};
use crate::random::SequenceRandom;

pub use crate::export::backend::tests::MockRasterizer;

// =========================================================================
// App builders
// =========================================================================

/// Default-config app at `url` whose randomness always yields `0.0`.
pub fn test_app(url: &str) -> App {
    test_app_with(url, vec![0.0])
}

/// Default-config app at `url` replaying `values` as its random sequence.
pub fn test_app_with(url: &str, values: Vec<f64>) -> App {
    App::new(
        &CardConfig::default(),
        Url::parse(url).unwrap(),
        Box::new(SequenceRandom::new(values)),
    )
}

pub fn test_app_with_config(url: &str, config: CardConfig) -> App {
    App::new(
        &config,
        Url::parse(url).unwrap(),
        Box::new(SequenceRandom::constant(0.0)),
    )
}

// =========================================================================
// Download sink
// =========================================================================

/// Keeps downloads in memory. Set `fail` to make every save error.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub saved: Vec<(String, Vec<u8>)>,
    pub fail: bool,
}

impl MemorySink {
    pub fn failing() -> Self {
        Self {
            saved: Vec::new(),
            fail: true,
        }
    }

    pub fn filenames(&self) -> Vec<&str> {
        self.saved.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SinkError> {
        if self.fail {
            return Err(SinkError::Write {
                path: PathBuf::from(filename),
                source: std::io::Error::other("disk full"),
            });
        }
        self.saved.push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}
