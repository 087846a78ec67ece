//! # External Links
//!
//! Hands recipe URLs to the host platform's default opener. The string is
//! passed through untouched: no scheme check, no normalization.

use std::fmt;

use log::{info, warn};

#[derive(Debug)]
pub struct OpenError {
    pub url: String,
    pub source: std::io::Error,
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not open {}: {}", self.url, self.source)
    }
}

impl std::error::Error for OpenError {}

/// Something that can open a URL outside the application.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

/// Opens links with the system browser via the `open` crate.
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        info!("Opening external link: {}", url);
        open::that(url).map_err(|source| {
            warn!("Failed to open {}: {}", url, source);
            OpenError {
                url: url.to_string(),
                source,
            }
        })
    }
}
