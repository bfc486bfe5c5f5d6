use std::path::PathBuf;

/// Every failure mode this crate can surface while parsing a savegame.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to {syscall} \"{}\"", path.display())]
    Io {
        syscall: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file does not match any known savegame format")]
    InvalidHeader,

    #[error("invalid data at offset {offset}: {message}")]
    DataInvalid { offset: u64, message: String },

    #[error("unexpected end of file at \"{offset}\" ({op} of \"{len}\" bytes)")]
    Truncated {
        offset: u64,
        len: usize,
        op: &'static str,
    },

    #[error("failed to allocate a {width}x{height} screenshot buffer")]
    ImageAllocation { width: u32, height: u32 },

    #[error("failed to decode string under the configured encoding")]
    Decode,
}

pub type Result<T> = core::result::Result<T, Error>;
