//! Forward-only little-endian byte cursor.
//!
//! The decoder never seeks backwards, so a source only has to hand out bytes
//! in order. [`SliceSource`] covers data already in memory and
//! [`ReaderSource`] adapts any [`std::io::Read`].

use std::io::{self, Read};

use crate::error::{DecodeError, DecodeResult};

/// Why a source could not supply the requested bytes.
#[derive(Debug)]
pub enum SourceError {
    /// The source ran dry after supplying `available` of the requested bytes.
    Exhausted { available: usize },
    /// The underlying reader failed.
    Io(io::Error),
}

/// Sequential supply of bytes.
pub trait ByteSource {
    /// Fill `buf` completely with the next bytes of the source.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError>;

    /// Advance past the next `n` bytes without handing them out.
    fn skip(&mut self, n: usize) -> Result<(), SourceError>;

    /// Number of bytes left, if the source knows it.
    ///
    /// Only used to reject absurd counts before allocating; a streamed source
    /// may return `None`.
    fn remaining(&self) -> Option<usize> {
        None
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        (**self).read_exact(buf)
    }

    fn skip(&mut self, n: usize) -> Result<(), SourceError> {
        (**self).skip(n)
    }

    fn remaining(&self) -> Option<usize> {
        (**self).remaining()
    }
}

/// Byte source over an in-memory slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], SourceError> {
        let available = self.data.len() - self.pos;
        if n > available {
            self.pos = self.data.len();
            return Err(SourceError::Exhausted { available });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        buf.copy_from_slice(self.take(buf.len())?);
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), SourceError> {
        self.take(n).map(|_| ())
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.data.len() - self.pos)
    }
}

/// Byte source over a streamed reader.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => return Err(SourceError::Exhausted { available: filled }),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(SourceError::Io(e)),
            }
        }
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), SourceError> {
        let mut limited = (&mut self.reader).take(n as u64);
        let copied = io::copy(&mut limited, &mut io::sink()).map_err(SourceError::Io)?;
        // `copied` never exceeds `n`, which is a usize.
        let copied = usize::try_from(copied).unwrap_or(n);
        if copied < n {
            return Err(SourceError::Exhausted { available: copied });
        }
        Ok(())
    }
}

/// Little-endian reader that tracks how many bytes it has consumed.
#[derive(Debug)]
pub struct ByteCursor<S> {
    source: S,
    position: u64,
}

impl<S: ByteSource> ByteCursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes left in the source, if known.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        self.source.remaining()
    }

    fn fail(&self, needed: usize, err: SourceError) -> DecodeError {
        match err {
            SourceError::Exhausted { available } => DecodeError::TruncatedInput {
                offset: self.position,
                needed,
                available,
            },
            SourceError::Io(e) => DecodeError::Io(e),
        }
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut buf = [0u8; N];
        if let Err(e) = self.source.read_exact(&mut buf) {
            return Err(self.fail(N, e));
        }
        self.position += N as u64;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_i16(&mut self) -> DecodeResult<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Advance past `n` bytes without interpreting them.
    pub fn skip(&mut self, n: usize) -> DecodeResult<()> {
        if let Err(e) = self.source.skip(n) {
            return Err(self.fail(n, e));
        }
        self.position += n as u64;
        Ok(())
    }
}
