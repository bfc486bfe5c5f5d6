use memmap2::{Mmap, MmapOptions};
use std::{fs::File, io::SeekFrom, path::Path};

use crate::error::{Error, Result};

/// A seekable, readable byte stream with C-stream-style sticky failure.
///
/// Once a bounds-checked `read`/`seek` fails, the source remembers it and
/// fails every subsequent `read`/`seek` until [`ByteSource::clear`] is
/// called, mirroring a `std::ios`-style fail bit.
pub(crate) trait ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<()>;
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<()>;
    fn tell(&self) -> u64;
    fn clear(&mut self);
}

enum Backing {
    Mapped(Mmap),
    Empty,
}

impl Backing {
    fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Empty => &[],
        }
    }
}

/// A memory-mapped file. Zero-length files are represented without a
/// mapping since mapping zero bytes is not portable.
pub(crate) struct FileSource {
    backing: Backing,
    pos: u64,
    failed: bool,
}

impl FileSource {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            syscall: "open",
            path: path.to_path_buf(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| Error::Io {
                syscall: "stat",
                path: path.to_path_buf(),
                source,
            })?
            .len();
        let backing = if len == 0 {
            Backing::Empty
        } else {
            let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(|source| Error::Io {
                syscall: "mmap",
                path: path.to_path_buf(),
                source,
            })?;
            Backing::Mapped(mmap)
        };
        Ok(Self {
            backing,
            pos: 0,
            failed: false,
        })
    }
}

impl ByteSource for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<()> {
        if self.failed {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        let bytes = self.backing.as_bytes();
        let start = self.pos as usize;
        let stop = start + buf.len();
        if stop > bytes.len() {
            self.failed = true;
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.copy_from_slice(&bytes[start..stop]);
        self.pos = stop as u64;
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<()> {
        if self.failed {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        let len = self.backing.as_bytes().len() as u64;
        let target = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(delta) => (len as i64).checked_add(delta).map(|v| v as u64),
            SeekFrom::Current(delta) => (self.pos as i64).checked_add(delta).map(|v| v as u64),
        };
        match target {
            Some(p) if p <= len => {
                self.pos = p;
                Ok(())
            }
            _ => {
                self.failed = true;
                Err(std::io::ErrorKind::UnexpectedEof.into())
            }
        }
    }

    fn tell(&self) -> u64 {
        self.pos
    }

    fn clear(&mut self) {
        self.failed = false;
    }
}

/// An owned in-memory buffer, used to back a decompressed region.
pub(crate) struct MemorySource {
    buf: Vec<u8>,
    pos: u64,
    failed: bool,
}

impl MemorySource {
    pub(crate) fn new(buf: Vec<u8>) -> Self {
        Self {
            buf,
            pos: 0,
            failed: false,
        }
    }
}

impl ByteSource for MemorySource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<()> {
        if self.failed {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        let start = self.pos as usize;
        let stop = start + buf.len();
        if stop > self.buf.len() {
            self.failed = true;
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.copy_from_slice(&self.buf[start..stop]);
        self.pos = stop as u64;
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<()> {
        if self.failed {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        let len = self.buf.len() as u64;
        let target = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(delta) => (len as i64).checked_add(delta).map(|v| v as u64),
            SeekFrom::Current(delta) => (self.pos as i64).checked_add(delta).map(|v| v as u64),
        };
        match target {
            Some(p) if p <= len => {
                self.pos = p;
                Ok(())
            }
            _ => {
                self.failed = true;
                Err(std::io::ErrorKind::UnexpectedEof.into())
            }
        }
    }

    fn tell(&self) -> u64 {
        self.pos
    }

    fn clear(&mut self) {
        self.failed = false;
    }
}
