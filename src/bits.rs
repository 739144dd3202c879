//! Bit-level output for JPEG entropy-coded data.
//!
//! Bits are packed MSB first. Every completed byte goes into a fixed-size
//! staging buffer, which is handed to the destination whenever it fills and
//! once more when the writer is finished.

use std::io::Write;

use crate::error::{Error, Result};

/// Default size of the staging buffer, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// A bit writer that packs bits MSB first and applies JPEG byte stuffing.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    sink: W,
    buffer: Vec<u8>,
    capacity: usize,
    current_byte: u8,
    bit_position: u8, // Counts from 8 down to 0
    bytes_flushed: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new bit writer with the default staging buffer size.
    pub fn new(sink: W) -> Result<Self> {
        Self::with_capacity(sink, DEFAULT_BUFFER_SIZE)
    }

    /// Create a new bit writer whose staging buffer holds `capacity` bytes.
    pub fn with_capacity(sink: W, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidBufferSize);
        }
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| Error::AllocationFailure { bytes: capacity })?;

        Ok(Self {
            sink,
            buffer,
            capacity,
            current_byte: 0,
            bit_position: 8,
            bytes_flushed: 0,
        })
    }

    /// Append the low `num_bits` bits of `value`, most significant first.
    #[inline]
    pub fn write_bits(&mut self, value: u32, num_bits: u8) -> Result<()> {
        debug_assert!(num_bits <= 32);

        let mut remaining = num_bits;

        while remaining > 0 {
            let space = self.bit_position;
            let to_write = remaining.min(space);

            // Take the top `to_write` of the remaining bits
            let shift = remaining - to_write;
            let mask = (1u32 << to_write) - 1;
            let bits = ((value >> shift) & mask) as u8;

            self.bit_position -= to_write;
            self.current_byte |= bits << self.bit_position;
            remaining -= to_write;

            if self.bit_position == 0 {
                self.emit_stuffed()?;
            }
        }

        Ok(())
    }

    /// Pad the partial byte with 1s and emit it.
    ///
    /// Does nothing when the writer is already byte-aligned.
    pub fn flush_alignment(&mut self) -> Result<()> {
        if self.bit_position < 8 {
            self.current_byte |= (1u8 << self.bit_position) - 1;
            self.emit_stuffed()?;
        }
        Ok(())
    }

    /// Write one raw byte. Header bytes are never stuffed.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        debug_assert!(self.is_aligned(), "Must be byte-aligned");
        self.push(byte)
    }

    /// Write a 16-bit value in big-endian order.
    pub fn write_word(&mut self, word: u16) -> Result<()> {
        let [hi, lo] = word.to_be_bytes();
        self.write_byte(hi)?;
        self.write_byte(lo)
    }

    /// Must be byte-aligned.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Write a marker: 0xFF followed by the marker code.
    pub fn write_marker(&mut self, code: u8) -> Result<()> {
        self.write_byte(0xFF)?;
        self.write_byte(code)
    }

    /// Hand any staged bytes to the destination and return it.
    ///
    /// A partial bit accumulator is not padded here; call
    /// [`flush_alignment`](Self::flush_alignment) first.
    pub fn finish(mut self) -> Result<W> {
        self.flush_buffer()?;
        self.sink.flush().map_err(Error::SinkWriteFailure)?;
        Ok(self.sink)
    }

    /// Total bytes produced so far, staged or already handed off.
    pub fn len(&self) -> u64 {
        self.bytes_flushed + self.buffer.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.is_aligned()
    }

    pub fn is_aligned(&self) -> bool {
        self.bit_position == 8
    }

    /// Emit the accumulated byte, following 0xFF with a 0x00 stuffing byte.
    #[inline]
    fn emit_stuffed(&mut self) -> Result<()> {
        let byte = self.current_byte;
        self.current_byte = 0;
        self.bit_position = 8;
        self.push(byte)?;
        if byte == 0xFF {
            self.push(0x00)?;
        }
        Ok(())
    }

    #[inline]
    fn push(&mut self, byte: u8) -> Result<()> {
        self.buffer.push(byte);
        if self.buffer.len() == self.capacity {
            self.flush_buffer()?;
        }
        Ok(())
    }

    fn flush_buffer(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.sink
            .write_all(&self.buffer)
            .map_err(Error::SinkWriteFailure)?;
        self.bytes_flushed += self.buffer.len() as u64;
        self.buffer.clear();
        Ok(())
    }
}
