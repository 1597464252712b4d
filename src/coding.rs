//! Bit-level stream primitives: LEB128 varints, a bit writer/reader pair and
//! Elias gamma codes.
//!
//! Bits are packed most-significant-first within each byte. The writer pads
//! the final partial byte with zero bits; the matching reader discards those
//! padding bits via [`BitReader::align_to_byte`].

use std::io::{self, Read, Write};

/// Writes `value` as an LEB128 varint.
pub fn write_varuint<W: Write>(sink: &mut W, mut value: u64) -> io::Result<()> {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            return sink.write_all(&[byte]);
        }
        sink.write_all(&[byte | 0x80])?;
    }
}

/// Reads an LEB128 varint.
pub fn read_varuint<R: Read>(src: &mut R) -> io::Result<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let mut byte = [0u8; 1];
        src.read_exact(&mut byte)?;
        let chunk = u64::from(byte[0] & 0x7f);
        // The 10th byte carries bit 63 only; anything above it would be
        // shifted out silently.
        if shift == 63 && chunk > 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "varuint overflows 64 bits",
            ));
        }
        value |= chunk << shift;
        if byte[0] & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
        if shift > 63 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "varuint longer than 64 bits",
            ));
        }
    }
}

/// Packs bits into bytes, most significant bit first.
pub struct BitWriter<'a, W: Write> {
    sink: &'a mut W,
    buf: u8,
    filled: u8,
}

impl<'a, W: Write> BitWriter<'a, W> {
    pub fn new(sink: &'a mut W) -> Self {
        BitWriter {
            sink,
            buf: 0,
            filled: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.buf |= (bit as u8) << (7 - self.filled);
        self.filled += 1;
        if self.filled == 8 {
            self.sink.write_all(&[self.buf])?;
            self.buf = 0;
            self.filled = 0;
        }
        Ok(())
    }

    /// Writes the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, count: u32) -> io::Result<()> {
        debug_assert!(count <= 64);
        for i in (0..count).rev() {
            self.write_bit((value >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// Pads the trailing partial byte with zero bits and writes it out.
    /// Must be called before the underlying sink is used again.
    pub fn finish(mut self) -> io::Result<()> {
        if self.filled > 0 {
            self.sink.write_all(&[self.buf])?;
            self.buf = 0;
            self.filled = 0;
        }
        Ok(())
    }
}

/// Mirror image of [`BitWriter`]. Consumes whole bytes from the source;
/// `bits_read` counts the bits handed out so far.
pub struct BitReader<'a, R: Read> {
    src: &'a mut R,
    buf: u8,
    remaining: u8,
    bits_read: u64,
}

impl<'a, R: Read> BitReader<'a, R> {
    pub fn new(src: &'a mut R) -> Self {
        BitReader {
            src,
            buf: 0,
            remaining: 0,
            bits_read: 0,
        }
    }

    pub fn read_bit(&mut self) -> io::Result<bool> {
        if self.remaining == 0 {
            let mut byte = [0u8; 1];
            self.src.read_exact(&mut byte)?;
            self.buf = byte[0];
            self.remaining = 8;
        }
        self.remaining -= 1;
        self.bits_read += 1;
        Ok((self.buf >> self.remaining) & 1 == 1)
    }

    /// Reads `count` bits, most significant first.
    pub fn read_bits(&mut self, count: u32) -> io::Result<u64> {
        debug_assert!(count <= 64);
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Discards padding bits up to the next whole-byte boundary. The buffered
    /// byte was already consumed from the source, so this touches no stream
    /// state beyond the accounting.
    pub fn align_to_byte(&mut self) {
        self.bits_read += u64::from(self.remaining);
        self.remaining = 0;
    }
}

/// Writes `value >= 1` as an Elias gamma code: a unary run of N zeros followed
/// by the N+1 significant bits of the value. Small values cost few bits and no
/// value is capped.
pub fn write_gamma<W: Write>(writer: &mut BitWriter<'_, W>, value: u64) -> io::Result<()> {
    debug_assert!(value >= 1, "gamma codes start at 1");
    let n = 63 - value.leading_zeros();
    for _ in 0..n {
        writer.write_bit(false)?;
    }
    writer.write_bits(value, n + 1)
}

/// Reads an Elias gamma code written by [`write_gamma`].
pub fn read_gamma<R: Read>(reader: &mut BitReader<'_, R>) -> io::Result<u64> {
    let mut n = 0u32;
    while !reader.read_bit()? {
        n += 1;
        if n > 63 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "gamma prefix longer than 64 bits",
            ));
        }
    }
    if n == 0 {
        return Ok(1);
    }
    Ok((1u64 << n) | reader.read_bits(n)?)
}
