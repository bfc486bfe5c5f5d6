//! The Elder Scrolls IV: Oblivion.
//!
//! The oldest of the four formats: `bzstring`-only, no field markers, no
//! compression, and a screenshot block with no embedded dimensions —
//! Oblivion never wrote width/height into the save itself.

use crate::error::Result;
use crate::image;
use crate::reader::Reader;
use crate::time::WinSystemTime;
use crate::SaveSummary;

pub(crate) fn parse(reader: &mut Reader, quick: bool) -> Result<SaveSummary> {
    reader.bz_string = true;

    reader.read_u8()?; // major version
    reader.read_u8()?; // minor version
    reader.skip_bytes(16)?; // exe mtime, unused
    reader.read_u32()?; // header version
    reader.read_u32()?; // header size

    let save_number = reader.read_u32()?;
    let character_name = reader.read_string()?;
    let character_level = reader.read_u16()?;
    let location = reader.read_string()?;

    let game_days = reader.read_f32()?;
    reader.read_u32()?; // game ticks, unused
    let play_time = format_playtime(game_days);

    let creation_time = read_creation_time(reader)?;

    let (screenshot_width, screenshot_height, screenshot) = if quick {
        (0, 0, Vec::new())
    } else {
        reader.read_u32()?; // screenshot byte size, untrusted, unused
        let (w, h, pixels) = image::read_image_embedded(reader, false)?;
        (w, h, pixels)
    };

    let plugins = if quick {
        Vec::new()
    } else {
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
        creation_time,
        plugins,
        screenshot_width,
        screenshot_height,
        screenshot,
    })
}

fn read_creation_time(reader: &mut Reader) -> Result<u32> {
    let time = WinSystemTime {
        year: reader.read_u16()?,
        month: reader.read_u16()?,
        day_of_week: reader.read_u16()?,
        day: reader.read_u16()?,
        hour: reader.read_u16()?,
        minute: reader.read_u16()?,
        second: reader.read_u16()?,
        millisecond: reader.read_u16()?,
    };
    Ok(time.to_epoch_seconds())
}

/// Synthesizes `"D days, H hours"` from a fractional in-game day count.
/// Both components are truncated toward zero, not rounded.
fn format_playtime(game_days: f32) -> String {
    let whole_days = game_days.trunc() as i64;
    let hours = ((game_days as f64 * 24.0) % 24.0).trunc() as i64;
    format!("{whole_days} days, {hours} hours")
}
