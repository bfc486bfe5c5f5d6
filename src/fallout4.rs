//! Fallout 4.
//!
//! Structurally the closest to Skyrim's original-release layout, but the
//! screenshot is always RGBA with its own embedded dimensions, there is no
//! mid-stream compression, and the light-plugin gate moves to a later
//! `form_version`.

use crate::error::Result;
use crate::image;
use crate::reader::Reader;
use crate::time::filetime_to_epoch_seconds;
use crate::SaveSummary;

const LIGHT_PLUGIN_FORM_VERSION: u8 = 0x44;

pub(crate) fn parse(reader: &mut Reader, quick: bool) -> Result<SaveSummary> {
    reader.read_u32()?; // header size
    reader.read_u32()?; // header version

    let save_number = reader.read_u32()?;
    let character_name = reader.read_string()?;
    let character_level = reader.read_u32()? as u16;
    let location = reader.read_string()?;
    let play_time = reader.read_string()?;
    reader.read_string()?; // race, unused

    reader.read_u16()?; // gender
    reader.read_f32()?; // experience
    reader.read_f32()?; // experience required for next level

    let creation_time = filetime_to_epoch_seconds(reader.read_u64()?);

    let (screenshot_width, screenshot_height, screenshot) = if quick {
        (0, 0, Vec::new())
    } else {
        image::read_image_embedded(reader, true)?
    };

    // Unlike the other three formats, Fallout 4's plugin-list subsection is
    // not gated on `quick` in the upstream parser this crate is modeled on;
    // preserved here rather than "fixed" to match the other formats.
    let form_version = reader.read_u8()?;
    reader.read_string()?; // game version, unused
    reader.read_u32()?; // plugin-info size, unused

    let count = reader.read_u8()?;
    let mut plugins = Vec::with_capacity(count as usize);
    for _ in 0..count {
        plugins.push(reader.read_plugin_name()?);
    }

    if form_version >= LIGHT_PLUGIN_FORM_VERSION {
        let light_count = reader.read_u16()?;
        for _ in 0..light_count {
            plugins.push(reader.read_plugin_name()?);
        }
    }

    Ok(SaveSummary {
        file_name: String::new(),
        character_name,
        character_level,
        location,
        save_number,
        play_time,
        creation_time,
        plugins,
        screenshot_width,
        screenshot_height,
        screenshot,
    })
}
