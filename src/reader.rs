use std::io::SeekFrom;

use crate::compression::{decompress, Compression};
use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::io::{ByteSource, MemorySource};

const FIELD_MARKER: u8 = b'|';

/// A stateful cursor over the active [`ByteSource`].
///
/// The active source is swapped in place by [`Reader::set_compression`]
/// when a format transitions from uncompressed to compressed mid-file;
/// every read goes through `self.source`, so the swap is observed
/// uniformly by the rest of the parser.
pub(crate) struct Reader {
    source: Box<dyn ByteSource>,
    encoding: Encoding,
    /// `true` for the `bzstring` convention (u8 length, trailing NUL
    /// stripped); `false` for `wstring` (u16 length, no terminator).
    pub(crate) bz_string: bool,
    /// When set, every primitive and non-empty string read is followed by
    /// a mandatory `|` byte.
    pub(crate) has_field_markers: bool,
}

impl Reader {
    pub(crate) fn new(source: Box<dyn ByteSource>, encoding: Encoding) -> Self {
        Self {
            source,
            encoding,
            bz_string: false,
            has_field_markers: false,
        }
    }

    pub(crate) fn position(&self) -> u64 {
        self.source.tell()
    }

    fn consume_marker(&mut self) -> Result<()> {
        if !self.has_field_markers {
            return Ok(());
        }
        let mut byte = [0u8; 1];
        let offset = self.position();
        self.read_into(&mut byte)?;
        if byte[0] != FIELD_MARKER {
            return Err(Error::DataInvalid {
                offset,
                message: format!("expected field marker '|', got {:#04x}", byte[0]),
            });
        }
        Ok(())
    }

    pub(crate) fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let offset = self.position();
        let len = buf.len();
        self.source.read(buf).map_err(|_| {
            self.source.clear();
            let _ = self.source.seek(SeekFrom::End(0));
            Error::Truncated {
                offset,
                len,
                op: "read",
            }
        })
    }

    /// Reads one byte with no field-marker check, for scans that happen
    /// outside the normal typed-read machinery (the Fallout 3/New Vegas
    /// disambiguation scan).
    pub(crate) fn read_u8_raw(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_into(&mut buf)?;
        Ok(buf[0])
    }

    pub(crate) fn seek_to(&mut self, pos: u64) -> Result<()> {
        self.source.seek(SeekFrom::Start(pos)).map_err(|_| Error::Truncated {
            offset: pos,
            len: 0,
            op: "seek",
        })
    }

    pub(crate) fn skip_bytes(&mut self, n: u64) -> Result<()> {
        let offset = self.position();
        self.source.seek(SeekFrom::Current(n as i64)).map_err(|_| Error::Truncated {
            offset,
            len: n as usize,
            op: "skip",
        })
    }

    pub(crate) fn check_header(&mut self, magic: &[u8]) -> Result<bool> {
        self.source.seek(SeekFrom::Start(0)).map_err(|_| Error::Truncated {
            offset: 0,
            len: magic.len(),
            op: "seek",
        })?;
        let mut buf = vec![0u8; magic.len()];
        match self.read_into(&mut buf) {
            Ok(()) => Ok(buf == magic),
            Err(Error::Truncated { .. }) => {
                self.source.clear();
                let _ = self.source.seek(SeekFrom::Start(0));
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_into(&mut buf)?;
        self.consume_marker()?;
        Ok(buf[0])
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_into(&mut buf)?;
        self.consume_marker()?;
        Ok(u16::from_le_bytes(buf))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_into(&mut buf)?;
        self.consume_marker()?;
        Ok(u32::from_le_bytes(buf))
    }

    pub(crate) fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_into(&mut buf)?;
        self.consume_marker()?;
        Ok(u64::from_le_bytes(buf))
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_into(&mut buf)?;
        self.consume_marker()?;
        Ok(i32::from_le_bytes(buf))
    }

    pub(crate) fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.read_into(&mut buf)?;
        self.consume_marker()?;
        Ok(f32::from_le_bytes(buf))
    }

    /// Raw length-prefixed read: 1-byte length, then that many bytes
    /// verbatim. No terminator handling, no decode.
    pub(crate) fn read_bstring(&mut self) -> Result<Vec<u8>> {
        let mut len_buf = [0u8; 1];
        self.read_into(&mut len_buf)?;
        let len = len_buf[0] as usize;
        let mut buf = vec![0u8; len];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Reads a string per the currently configured convention (`bzstring`
    /// or `wstring`) and decodes it under this reader's encoding.
    pub(crate) fn read_string(&mut self) -> Result<String> {
        self.read_string_bounded(None)
    }

    /// Reads a string the same way [`Reader::read_string`] does, but
    /// additionally rejects a raw (pre-decode) length over 256 bytes —
    /// the bound this crate's plugin names are held to.
    pub(crate) fn read_plugin_name(&mut self) -> Result<String> {
        self.read_string_bounded(Some(256))
    }

    fn read_string_bounded(&mut self, max_len: Option<usize>) -> Result<String> {
        let offset = self.position();

        let len = if self.bz_string {
            let mut buf = [0u8; 1];
            self.read_into(&mut buf)?;
            buf[0] as usize
        } else {
            let mut buf = [0u8; 2];
            self.read_into(&mut buf)?;
            u16::from_le_bytes(buf) as usize
        };

        if let Some(max_len) = max_len {
            if len > max_len {
                return Err(Error::DataInvalid {
                    offset,
                    message: format!("plugin name length {len} exceeds {max_len} bytes"),
                });
            }
        }

        if len == 0 {
            return Ok(String::new());
        }

        let mut payload = vec![0u8; len];
        self.read_into(&mut payload)?;

        let payload = if self.bz_string {
            // drop the trailing NUL
            payload.pop();
            payload
        } else {
            payload
        };

        self.consume_marker()?;
        self.encoding.decode(&payload)
    }

    /// Installs a decompression adapter as the active source. Every read
    /// issued after this call observes the decompressed buffer.
    pub(crate) fn set_compression(
        &mut self,
        tag: u16,
        compressed_len: usize,
        uncompressed_len: usize,
    ) -> Result<()> {
        let Some(codec) = Compression::from_tag(tag) else {
            // Unrecognized codec: leave the stream untouched. The next
            // read against the still-compressed bytes reports its own
            // truncation/invalid-data error.
            return Ok(());
        };
        let offset = self.position();
        let mut compressed = vec![0u8; compressed_len];
        self.read_into(&mut compressed)?;
        let decompressed = decompress(codec, &compressed, uncompressed_len, offset)?;
        self.source = Box::new(MemorySource::new(decompressed));
        Ok(())
    }
}
