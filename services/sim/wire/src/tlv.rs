//! Type-Length-Value primitives.
//!
//! NDN packets are nested TLV elements. This module provides the varnum
//! codec and a borrowed element reader used by the packet decoders.

use crate::error::WireError;
use bytes::{Buf, BufMut, BytesMut};

/// Assigned TLV type numbers used by this crate
#[repr(u64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlvType {
    /// Interest packet
    Interest = 0x05,
    /// Data packet
    Data = 0x06,
    /// Name
    Name = 0x07,
    /// Generic name component
    GenericComponent = 0x08,
    /// CanBePrefix flag element
    CanBePrefix = 0x21,
    /// MustBeFresh flag element
    MustBeFresh = 0x12,
    /// Interest nonce
    Nonce = 0x0A,
    /// Interest lifetime (ms)
    InterestLifetime = 0x0C,
    /// Interest hop limit
    HopLimit = 0x22,
    /// Data MetaInfo
    MetaInfo = 0x14,
    /// Data freshness period (ms)
    FreshnessPeriod = 0x19,
    /// Data content
    Content = 0x15,
}

/// One decoded TLV element borrowing its value from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    /// TLV type number
    pub typ: u64,
    /// Element value bytes
    pub value: &'a [u8],
}

impl<'a> Tlv<'a> {
    /// Interpret the value as a big-endian non-negative integer
    pub fn as_uint(&self) -> Result<u64, WireError> {
        match self.value.len() {
            1 => Ok(self.value[0] as u64),
            2 => Ok(u16::from_be_bytes([self.value[0], self.value[1]]) as u64),
            4 => {
                let mut b = [0u8; 4];
                b.copy_from_slice(self.value);
                Ok(u32::from_be_bytes(b) as u64)
            }
            8 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(self.value);
                Ok(u64::from_be_bytes(b))
            }
            _ => Err(WireError::Range("nonNegativeInteger")),
        }
    }
}

/// Write a variable-size number (type or length)
pub fn write_varnum(buf: &mut BytesMut, n: u64) {
    if n < 253 {
        buf.put_u8(n as u8);
    } else if n <= u16::MAX as u64 {
        buf.put_u8(0xFD);
        buf.put_u16(n as u16);
    } else if n <= u32::MAX as u64 {
        buf.put_u8(0xFE);
        buf.put_u32(n as u32);
    } else {
        buf.put_u8(0xFF);
        buf.put_u64(n);
    }
}

/// Read a variable-size number, advancing the cursor
pub fn read_varnum(input: &mut &[u8]) -> Result<u64, WireError> {
    if input.is_empty() {
        return Err(WireError::Incomplete);
    }
    let first = input[0];
    match first {
        0..=252 => {
            input.advance(1);
            Ok(first as u64)
        }
        0xFD => {
            if input.len() < 3 {
                return Err(WireError::Incomplete);
            }
            input.advance(1);
            Ok(input.get_u16() as u64)
        }
        0xFE => {
            if input.len() < 5 {
                return Err(WireError::Incomplete);
            }
            input.advance(1);
            Ok(input.get_u32() as u64)
        }
        0xFF => {
            if input.len() < 9 {
                return Err(WireError::Incomplete);
            }
            input.advance(1);
            Ok(input.get_u64())
        }
    }
}

/// Write one TLV element (type, length, value)
pub fn write_tlv(buf: &mut BytesMut, typ: u64, value: &[u8]) {
    write_varnum(buf, typ);
    write_varnum(buf, value.len() as u64);
    buf.put_slice(value);
}

/// Read one TLV element, advancing the cursor past it
pub fn read_tlv<'a>(input: &mut &'a [u8]) -> Result<Tlv<'a>, WireError> {
    let typ = read_varnum(input)?;
    let len = read_varnum(input)? as usize;
    if input.len() < len {
        return Err(WireError::Incomplete);
    }
    let (value, rest) = input.split_at(len);
    *input = rest;
    Ok(Tlv { typ, value })
}

/// Encode a non-negative integer using the shortest of 1/2/4/8 bytes
pub fn write_uint_value(buf: &mut BytesMut, typ: u64, n: u64) {
    write_varnum(buf, typ);
    if n <= u8::MAX as u64 {
        write_varnum(buf, 1);
        buf.put_u8(n as u8);
    } else if n <= u16::MAX as u64 {
        write_varnum(buf, 2);
        buf.put_u16(n as u16);
    } else if n <= u32::MAX as u64 {
        write_varnum(buf, 4);
        buf.put_u32(n as u32);
    } else {
        write_varnum(buf, 8);
        buf.put_u64(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip_varnum(n: u64) {
        let mut buf = BytesMut::new();
        write_varnum(&mut buf, n);
        let mut slice: &[u8] = &buf;
        assert_eq!(read_varnum(&mut slice).unwrap(), n);
        assert!(slice.is_empty());
    }

    #[test]
    fn test_varnum_boundaries() {
        for n in [0, 1, 252, 253, 254, 0xFFFF, 0x1_0000, u32::MAX as u64, u64::MAX] {
            roundtrip_varnum(n);
        }
    }

    #[test]
    fn test_varnum_sizes() {
        let mut buf = BytesMut::new();
        write_varnum(&mut buf, 252);
        assert_eq!(buf.len(), 1);

        let mut buf = BytesMut::new();
        write_varnum(&mut buf, 253);
        assert_eq!(buf.len(), 3);

        let mut buf = BytesMut::new();
        write_varnum(&mut buf, 0x1_0000);
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn test_tlv_roundtrip() {
        let mut buf = BytesMut::new();
        write_tlv(&mut buf, 0x08, b"hello");

        let mut slice: &[u8] = &buf;
        let tlv = read_tlv(&mut slice).unwrap();
        assert_eq!(tlv.typ, 0x08);
        assert_eq!(tlv.value, b"hello");
        assert!(slice.is_empty());
    }

    #[test]
    fn test_tlv_incomplete() {
        let mut buf = BytesMut::new();
        write_tlv(&mut buf, 0x08, b"hello");
        let truncated = &buf[..buf.len() - 2];

        let mut slice: &[u8] = truncated;
        assert!(matches!(read_tlv(&mut slice), Err(WireError::Incomplete)));
    }

    #[test]
    fn test_uint_value() {
        let mut buf = BytesMut::new();
        write_uint_value(&mut buf, 0x0C, 3000);

        let mut slice: &[u8] = &buf;
        let tlv = read_tlv(&mut slice).unwrap();
        assert_eq!(tlv.typ, 0x0C);
        assert_eq!(tlv.as_uint().unwrap(), 3000);
    }
}
