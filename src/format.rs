use crate::error::{Error, Result};
use crate::reader::Reader;

/// Which parser handles a savegame, selected by probing its magic string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Format {
    Oblivion,
    Skyrim,
    Fallout3,
    Fallout4,
}

const MAGICS: &[(&[u8], Format)] = &[
    (b"TES4SAVEGAME", Format::Oblivion),
    (b"TESV_SAVEGAME", Format::Skyrim),
    (b"FO3SAVEGAME", Format::Fallout3),
    (b"FO4_SAVEGAME", Format::Fallout4),
];

/// Probes the fixed-order magic table and leaves the reader positioned
/// immediately after the matched magic.
pub(crate) fn guess_format(reader: &mut Reader) -> Result<Format> {
    for (magic, format) in MAGICS {
        if reader.check_header(magic)? {
            // `check_header` seeks to 0 and reads the magic, which already
            // leaves the reader positioned immediately after it.
            return Ok(*format);
        }
    }
    Err(Error::InvalidHeader)
}
