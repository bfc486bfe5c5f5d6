#![warn(
    clippy::pedantic,
    clippy::single_char_lifetime_names,
    clippy::std_instead_of_core
)]
#![allow(clippy::enum_glob_use, clippy::missing_errors_doc)]

//! Reads savegame files produced by Gamebryo/Creation engine titles —
//! Oblivion, Skyrim (original and Special Edition), Fallout 3/New Vegas,
//! and Fallout 4 — into a single game-agnostic [`SaveSummary`].
//!
//! Each title has its own field order, string convention, and screenshot
//! layout; [`parse`] probes the file's magic string and dispatches to the
//! matching parser. Screenshots and plugin lists are skipped entirely when
//! `quick` is set, for callers that only need metadata.

mod compression;
mod encoding;
mod error;
mod fallout3;
mod fallout4;
mod format;
mod image;
mod io;
mod oblivion;
mod reader;
mod skyrim;
mod time;
mod worker;

use std::path::Path;

pub use error::{Error, Result};
pub use worker::parse_async;

use encoding::determine_encoding;
use format::Format;
use io::FileSource;
use reader::Reader;

/// A game-agnostic summary of a single savegame file.
///
/// Every field is populated from the file's own data except `file_name`,
/// which is the path the caller supplied to [`parse`]. In quick mode
/// (`quick == true`), `screenshot`, `screenshot_width`, and
/// `screenshot_height` stay at their defaults; every other field is still
/// fully populated, including `plugins` for Fallout 4 — that format's
/// plugin-list read is not gated on `quick` (see `fallout4.rs`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub file_name: String,
    pub character_name: String,
    pub character_level: u16,
    pub location: String,
    pub save_number: u32,
    pub play_time: String,
    pub creation_time: u32,
    pub plugins: Vec<String>,
    pub screenshot_width: u32,
    pub screenshot_height: u32,
    pub screenshot: Vec<u8>,
}

impl SaveSummary {
    /// Copies `min(dest.len(), self.screenshot.len())` bytes of the decoded
    /// RGBA8 screenshot into `dest` and returns the number of bytes copied.
    pub fn copy_screenshot_into(&self, dest: &mut [u8]) -> usize {
        let len = dest.len().min(self.screenshot.len());
        dest[..len].copy_from_slice(&self.screenshot[..len]);
        len
    }
}

/// Parses the savegame at `path` synchronously, on the calling thread.
///
/// `quick` skips the screenshot and plugin-list subsections (Fallout 4's
/// plugin list is the one documented exception — see [`SaveSummary`]).
pub fn parse(path: impl AsRef<Path>, quick: bool) -> Result<SaveSummary> {
    let path = path.as_ref();
    let encoding = determine_encoding(path);
    let source = FileSource::open(path)?;
    let mut reader = Reader::new(Box::new(source), encoding);

    let format = format::guess_format(&mut reader)?;
    let mut summary = match format {
        Format::Oblivion => oblivion::parse(&mut reader, quick)?,
        Format::Skyrim => skyrim::parse(&mut reader, quick)?,
        Format::Fallout3 => fallout3::parse(&mut reader, quick)?,
        Format::Fallout4 => fallout4::parse(&mut reader, quick)?,
    };

    summary.file_name = path.display().to_string();

    if summary.creation_time == 0 {
        if let Ok(modified) = std::fs::metadata(path).and_then(|m| m.modified()) {
            if let Ok(elapsed) = modified.duration_since(std::time::UNIX_EPOCH) {
                summary.creation_time = elapsed.as_secs() as u32;
            }
        }
    }

    Ok(summary)
}
