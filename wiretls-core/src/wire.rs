//! Wire-format primitives: bounded reader and length-prefixing writer.
//!
//! Every variable-length TLS vector declares its size in bytes (not
//! elements) in a big-endian prefix. The [`Reader`] enforces that declared
//! lengths are multiples of the element size and never extend past the
//! parent frame; the [`Writer`] produces the symmetric encoding, patching
//! nested prefixes in place after their region is written.

use bytes::{BufMut, BytesMut};

use crate::error::{Error, Result};

/// Read cursor over an immutable byte slice.
///
/// All accessors fail with [`Error::Decode`] on truncation rather than
/// panicking; bounds errors short-circuit upward through `?`.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over `buf` with the cursor at the start.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Whether any bytes remain.
    pub fn has_remaining(&self) -> bool {
        self.offset < self.buf.len()
    }

    /// Number of unread bytes.
    pub fn remaining_bytes(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Position of the cursor from the start of the slice.
    pub fn read_so_far(&self) -> usize {
        self.offset
    }

    /// Skip `n` bytes.
    pub fn discard_next(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    /// Read a single byte.
    pub fn get_byte(&mut self) -> Result<u8> {
        let bytes = self.take(1)?;
        Ok(bytes[0])
    }

    /// Read a big-endian u16.
    pub fn get_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a big-endian 24-bit integer.
    pub fn get_u24(&mut self) -> Result<u32> {
        let bytes = self.take(3)?;
        Ok(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Read a big-endian u32.
    pub fn get_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read `n` raw bytes.
    pub fn get_fixed(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(self.take(n)?.to_vec())
    }

    /// Read a vector of single bytes behind a length prefix of
    /// `len_bytes` bytes, bounds-checking the element count.
    pub fn get_range_u8(
        &mut self,
        len_bytes: usize,
        min_elems: usize,
        max_elems: usize,
    ) -> Result<Vec<u8>> {
        let len = self.read_length_prefix(len_bytes, 1, min_elems, max_elems)?;
        self.get_fixed(len)
    }

    /// Read a vector of big-endian u16 elements behind a length prefix of
    /// `len_bytes` bytes. The declared byte length must be even.
    pub fn get_range_u16(
        &mut self,
        len_bytes: usize,
        min_elems: usize,
        max_elems: usize,
    ) -> Result<Vec<u16>> {
        let byte_len = self.read_length_prefix(len_bytes, 2, min_elems, max_elems)?;
        let mut elems = Vec::with_capacity(byte_len / 2);
        for _ in 0..byte_len / 2 {
            elems.push(self.get_u16()?);
        }
        Ok(elems)
    }

    /// Read a length-prefixed byte string and validate it as UTF-8.
    pub fn get_string(
        &mut self,
        len_bytes: usize,
        min_len: usize,
        max_len: usize,
    ) -> Result<String> {
        let bytes = self.get_range_u8(len_bytes, min_len, max_len)?;
        String::from_utf8(bytes).map_err(|_| Error::decode("Invalid UTF-8 in string field"))
    }

    // Reads a length prefix and validates the declared byte length against
    // the element size, the element-count bounds and the parent frame.
    fn read_length_prefix(
        &mut self,
        len_bytes: usize,
        elem_size: usize,
        min_elems: usize,
        max_elems: usize,
    ) -> Result<usize> {
        let byte_len = match len_bytes {
            1 => usize::from(self.get_byte()?),
            2 => usize::from(self.get_u16()?),
            3 => self.get_u24()? as usize,
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "Unsupported length prefix size: {}",
                    len_bytes
                )))
            },
        };

        if byte_len % elem_size != 0 {
            return Err(Error::decode("Length field not a multiple of element size"));
        }

        let elems = byte_len / elem_size;
        if elems < min_elems || elems > max_elems {
            return Err(Error::decode(format!(
                "Vector of {} elements outside expected range {}..={}",
                elems, min_elems, max_elems
            )));
        }

        if byte_len > self.remaining_bytes() {
            return Err(Error::decode("Declared length extends past end of buffer"));
        }

        Ok(byte_len)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining_bytes() {
            return Err(Error::decode("Unexpected end of buffer"));
        }
        let slice = &self.buf[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }
}

/// Growable output buffer with big-endian appenders and in-place length
/// prefix patching.
#[derive(Debug, Default)]
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single byte.
    pub fn put_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Append a big-endian u16.
    pub fn put_u16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    /// Append a big-endian 24-bit integer. The value must fit.
    pub fn put_u24(&mut self, value: u32) {
        debug_assert!(value < (1 << 24));
        self.buf.put_slice(&value.to_be_bytes()[1..]);
    }

    /// Append a big-endian u32.
    pub fn put_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    /// Append raw bytes.
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Append a length prefix of `len_bytes` bytes followed by `payload`.
    pub fn append_length_value(&mut self, payload: &[u8], len_bytes: usize) -> Result<()> {
        self.length_prefixed(len_bytes, |w| {
            w.put_slice(payload);
            Ok(())
        })
    }

    /// Reserve a `len_bytes` prefix, run `body`, then patch the prefix
    /// with the number of bytes the body wrote.
    pub fn length_prefixed<F>(&mut self, len_bytes: usize, body: F) -> Result<()>
    where
        F: FnOnce(&mut Writer) -> Result<()>,
    {
        let prefix_at = self.buf.len();
        for _ in 0..len_bytes {
            self.buf.put_u8(0);
        }

        body(self)?;

        let written = self.buf.len() - prefix_at - len_bytes;
        let max = match len_bytes {
            1 => 0xFF,
            2 => 0xFFFF,
            3 => 0xFF_FFFF,
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "Unsupported length prefix size: {}",
                    len_bytes
                )))
            },
        };
        if written > max {
            return Err(Error::InvalidArgument(format!(
                "Payload of {} bytes overflows {}-byte length prefix",
                written, len_bytes
            )));
        }

        let be = (written as u32).to_be_bytes();
        self.buf[prefix_at..prefix_at + len_bytes].copy_from_slice(&be[4 - len_bytes..]);
        Ok(())
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish and return the accumulated bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}
