//! Fallout 3 and Fallout: New Vegas.
//!
//! Both titles share one magic and one version number, so they can only
//! be told apart by scanning ahead for the field-marker byte: New Vegas
//! carries four extra bytes here that Fallout 3 does not.

use crate::error::Result;
use crate::image;
use crate::reader::Reader;
use crate::SaveSummary;

const FIELD_MARKER: u8 = b'|';

pub(crate) fn parse(reader: &mut Reader, quick: bool) -> Result<SaveSummary> {
    reader.read_u32()?; // header size
    reader.read_u32()?; // version, always 0x30, untrusted/unused
    reader.read_u8()?; // delimiter

    disambiguate(reader)?;

    reader.has_field_markers = true;

    let dimensions_offset = reader.position();
    let width = reader.read_u32()?;
    let height = reader.read_u32()?;
    let save_number = reader.read_u32()?;
    let character_name = reader.read_string()?;
    reader.read_string()?; // discarded
    let character_level = reader.read_i32()? as u16;
    let location = reader.read_string()?;
    let play_time = reader.read_string()?;

    let (screenshot_width, screenshot_height, screenshot) = if quick {
        (0, 0, Vec::new())
    } else {
        let pixels = image::read_image(reader, width, height, false, dimensions_offset)?;
        (width, height, pixels)
    };

    let plugins = if quick {
        Vec::new()
    } else {
        reader.skip_bytes(5)?; // unknown byte + plugin-data size
        let count = reader.read_u8()?;
        let mut plugins = Vec::with_capacity(count as usize);
        for _ in 0..count {
            plugins.push(reader.read_plugin_name()?);
        }
        plugins
    };

    Ok(SaveSummary {
        file_name: String::new(),
        character_name,
        character_level,
        location,
        save_number,
        play_time,
        creation_time: 0,
        plugins,
        screenshot_width,
        screenshot_height,
        screenshot,
    })
}

/// Scans forward byte-by-byte, outside the field-marker machinery, until
/// it finds `|`. A count of 5 means this is New Vegas, which has a
/// 4-byte field here Fallout 3 lacks; rewind, skip those 4 bytes, and
/// repeat the scan once more, now expecting Fallout 3's layout (count 4).
fn disambiguate(reader: &mut Reader) -> Result<()> {
    let start = reader.position();
    let count = scan_to_marker(reader)?;
    if count == 5 {
        reader.seek_to(start)?;
        reader.skip_bytes(4)?;
        scan_to_marker(reader)?;
    }
    Ok(())
}

fn scan_to_marker(reader: &mut Reader) -> Result<usize> {
    let mut count = 0;
    loop {
        let byte = reader.read_u8_raw()?;
        count += 1;
        if byte == FIELD_MARKER {
            return Ok(count);
        }
    }
}
