//! The Elder Scrolls V: Skyrim, original release and Special Edition.
//!
//! Both subformats share the header layout; they diverge at the
//! screenshot block, where Special Edition (`version >= 0x0C`) adds
//! explicit dimensions and a mid-stream compressed body. Light plugins
//! (`form_version >= 0x4E`) are appended to the same plugin list rather
//! than kept separate, since nothing downstream needs to tell them apart.

use crate::error::Result;
use crate::image;
use crate::reader::Reader;
use crate::time::filetime_to_epoch_seconds;
use crate::SaveSummary;

const SPECIAL_EDITION_VERSION: u32 = 0x0C;
const LIGHT_PLUGIN_FORM_VERSION: u8 = 0x4E;

pub(crate) fn parse(reader: &mut Reader, quick: bool) -> Result<SaveSummary> {
    reader.read_u32()?; // header size

    let version = reader.read_u32()?;
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

    let mut screenshot_width = 0;
    let mut screenshot_height = 0;
    let mut screenshot = Vec::new();

    if !quick {
        if version < SPECIAL_EDITION_VERSION {
            let (w, h, pixels) = image::read_image_embedded(reader, false)?;
            screenshot_width = w;
            screenshot_height = h;
            screenshot = pixels;
        } else {
            let dimensions_offset = reader.position();
            let width = reader.read_u32()?;
            let height = reader.read_u32()?;
            let compression_format = reader.read_u16()?;
            screenshot = image::read_image(reader, width, height, true, dimensions_offset)?;
            screenshot_width = width;
            screenshot_height = height;

            let uncompressed_len = reader.read_u32()? as usize;
            let compressed_len = reader.read_u32()? as usize;
            reader.set_compression(compression_format, compressed_len, uncompressed_len)?;
        }
    }

    let plugins = if quick {
        Vec::new()
    } else {
        let form_version = reader.read_u8()?;
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

        plugins
    };

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
