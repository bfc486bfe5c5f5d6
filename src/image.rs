use crate::error::{Error, Result};
use crate::reader::Reader;

const MAX_DIMENSION: u32 = 2000;

fn validate_dimensions(width: u32, height: u32, offset: u64) -> Result<()> {
    if width >= MAX_DIMENSION || height >= MAX_DIMENSION {
        return Err(Error::DataInvalid {
            offset,
            message: format!("screenshot dimensions {width}x{height} are out of range"),
        });
    }
    Ok(())
}

fn alloc_buffer(len: usize, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::ImageAllocation { width, height })?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Reads a `width * height` block of raw pixels, 3 bytes per pixel (RGB)
/// or 4 (RGBA), and returns it as RGBA8, expanding RGB with an opaque
/// alpha channel.
///
/// `dimensions_offset` is the byte offset of the `width` field itself —
/// callers that read `width`/`height` (and, for Skyrim SE, a
/// `compression_format` in between) ahead of calling this function must
/// capture that offset *before* doing so, so a bad dimension is reported
/// at the field that actually declared it rather than wherever the reader
/// happens to be once this function runs.
pub(crate) fn read_image(
    reader: &mut Reader,
    width: u32,
    height: u32,
    alpha: bool,
    dimensions_offset: u64,
) -> Result<Vec<u8>> {
    validate_dimensions(width, height, dimensions_offset)?;

    let pixels = (width as usize) * (height as usize);
    let bpp = if alpha { 4 } else { 3 };
    let raw_len = pixels * bpp;
    let mut raw = alloc_buffer(raw_len, width, height)?;
    reader.read_into(&mut raw)?;

    if alpha {
        return Ok(raw);
    }

    let mut rgba = alloc_buffer(pixels * 4, width, height)?;
    for (src, dst) in raw.chunks_exact(3).zip(rgba.chunks_exact_mut(4)) {
        dst[..3].copy_from_slice(src);
        dst[3] = 0xFF;
    }
    Ok(rgba)
}

/// Reads a `u32` width and height immediately before the pixel block,
/// then delegates to [`read_image`]. The offset captured for a bad
/// dimension is that of the `width` field, read before either `u32`.
pub(crate) fn read_image_embedded(reader: &mut Reader, alpha: bool) -> Result<(u32, u32, Vec<u8>)> {
    let dimensions_offset = reader.position();
    let width = reader.read_u32()?;
    let height = reader.read_u32()?;
    let pixels = read_image(reader, width, height, alpha, dimensions_offset)?;
    Ok((width, height, pixels))
}
