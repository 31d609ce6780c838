//! Archival of resolved URLs
//!
//! This module handles:
//! - Choosing which resolved URLs to archive by status code
//! - Submitting them to a web archive
//! - Capturing screenshots through an external renderer

mod screenshot;
mod select;
mod submit;

pub use screenshot::{
    capture_all, screenshot_path, CommandScreenshotter, ScreenshotOutcome, ScreenshotService,
};
pub use select::{select_for_archival, ArchivePolicy, ArchiveSelection};
pub use submit::{save_url, submit_all, ArchiveOutcome, Archiver, WebArchiver};
