use flate2::write::ZlibDecoder;
use std::io::Write as _;

use crate::error::{Error, Result};

/// Compression codec tag read from a savegame header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Compression {
    Zlib,
    Lz4,
}

impl Compression {
    pub(crate) fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            1 => Some(Self::Zlib),
            2 => Some(Self::Lz4),
            _ => None,
        }
    }
}

/// Decompresses `compressed` into a buffer of exactly `uncompressed_len`
/// bytes, the way `tes4/file.rs` does for zlib and `fo4/chunk.rs` does for
/// LZ4 — both single-shot, no streaming.
pub(crate) fn decompress(
    codec: Compression,
    compressed: &[u8],
    uncompressed_len: usize,
    offset: u64,
) -> Result<Vec<u8>> {
    match codec {
        Compression::Zlib => decompress_zlib(compressed, uncompressed_len, offset),
        Compression::Lz4 => decompress_lz4(compressed, uncompressed_len, offset),
    }
}

fn decompress_zlib(compressed: &[u8], uncompressed_len: usize, offset: u64) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(Vec::with_capacity(uncompressed_len));
    decoder.write_all(compressed).map_err(|_| Error::DataInvalid {
        offset,
        message: "zlib stream is corrupt or truncated".to_owned(),
    })?;
    decoder.finish().map_err(|_| Error::DataInvalid {
        offset,
        message: "zlib stream is corrupt or truncated".to_owned(),
    })
}

fn decompress_lz4(compressed: &[u8], uncompressed_len: usize, offset: u64) -> Result<Vec<u8>> {
    let mut dst = vec![0u8; uncompressed_len];
    let written = lzzzz::lz4::decompress(compressed, &mut dst[..]).map_err(|_| Error::DataInvalid {
        offset,
        message: "lz4 stream is corrupt or truncated".to_owned(),
    })?;
    if written != uncompressed_len {
        return Err(Error::DataInvalid {
            offset,
            message: format!(
                "lz4 stream decompressed to {written} bytes, expected {uncompressed_len}"
            ),
        });
    }
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_maps_to_codec() {
        assert_eq!(Compression::from_tag(1), Some(Compression::Zlib));
        assert_eq!(Compression::from_tag(2), Some(Compression::Lz4));
        assert_eq!(Compression::from_tag(0), None);
        assert_eq!(Compression::from_tag(3), None);
    }
}
