//! Interest and Data packets.

use crate::error::WireError;
use crate::name::Name;
use crate::tlv::{read_tlv, write_tlv, write_uint_value, TlvType};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// Default Interest lifetime when none is specified (ms)
pub const DEFAULT_INTEREST_LIFETIME_MS: u64 = 4000;

/// Default hop limit for new Interests
pub const DEFAULT_HOP_LIMIT: u8 = 32;

bitflags::bitflags! {
    /// Interest selector flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct InterestFlags: u8 {
        /// The Interest name may be a prefix of the Data name
        const CAN_BE_PREFIX = 0b0000_0001;
        /// Cached Data must be fresh to satisfy this Interest
        const MUST_BE_FRESH = 0b0000_0010;
    }
}

/// Interest packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    /// Requested name
    pub name: Name,
    /// Random nonce for duplicate detection
    pub nonce: u32,
    /// Lifetime in milliseconds
    pub lifetime_ms: u64,
    /// Remaining hop budget
    pub hop_limit: u8,
    /// Selector flags
    pub flags: InterestFlags,
}

impl Interest {
    /// Create an Interest for a name with default lifetime and a fresh nonce
    pub fn new(name: Name) -> Self {
        Self {
            name,
            nonce: rand::random(),
            lifetime_ms: DEFAULT_INTEREST_LIFETIME_MS,
            hop_limit: DEFAULT_HOP_LIMIT,
            flags: InterestFlags::empty(),
        }
    }

    /// Set the Interest lifetime in milliseconds
    pub fn with_lifetime(mut self, lifetime_ms: u64) -> Self {
        self.lifetime_ms = lifetime_ms;
        self
    }

    /// Set selector flags
    pub fn with_flags(mut self, flags: InterestFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Return a copy with the hop limit decremented, or None if exhausted
    pub fn decrement_hop_limit(&self) -> Option<Self> {
        if self.hop_limit == 0 {
            return None;
        }
        let mut next = self.clone();
        next.hop_limit -= 1;
        Some(next)
    }

    /// Encode into wire format
    pub fn encode(&self) -> Bytes {
        let mut inner = BytesMut::new();
        self.name.encode_to(&mut inner);
        if self.flags.contains(InterestFlags::CAN_BE_PREFIX) {
            write_tlv(&mut inner, TlvType::CanBePrefix as u64, &[]);
        }
        if self.flags.contains(InterestFlags::MUST_BE_FRESH) {
            write_tlv(&mut inner, TlvType::MustBeFresh as u64, &[]);
        }
        let mut nonce = BytesMut::with_capacity(4);
        nonce.put_u32(self.nonce);
        write_tlv(&mut inner, TlvType::Nonce as u64, &nonce);
        write_uint_value(&mut inner, TlvType::InterestLifetime as u64, self.lifetime_ms);
        write_tlv(&mut inner, TlvType::HopLimit as u64, &[self.hop_limit]);

        let mut buf = BytesMut::new();
        write_tlv(&mut buf, TlvType::Interest as u64, &inner);
        buf.freeze()
    }

    /// Decode from wire format (one complete Interest element)
    pub fn decode(mut input: &[u8]) -> Result<Self, WireError> {
        let outer = read_tlv(&mut input)?;
        if outer.typ != TlvType::Interest as u64 {
            return Err(WireError::Type(outer.typ));
        }
        if !input.is_empty() {
            return Err(WireError::Trailing);
        }

        let mut value = outer.value;
        let mut name = None;
        let mut nonce = None;
        let mut lifetime_ms = DEFAULT_INTEREST_LIFETIME_MS;
        let mut hop_limit = DEFAULT_HOP_LIMIT;
        let mut flags = InterestFlags::empty();

        while !value.is_empty() {
            let tlv = read_tlv(&mut value)?;
            match tlv.typ {
                t if t == TlvType::Name as u64 => name = Some(Name::decode_value(tlv.value)?),
                t if t == TlvType::CanBePrefix as u64 => flags |= InterestFlags::CAN_BE_PREFIX,
                t if t == TlvType::MustBeFresh as u64 => flags |= InterestFlags::MUST_BE_FRESH,
                t if t == TlvType::Nonce as u64 => {
                    if tlv.value.len() != 4 {
                        return Err(WireError::Range("Nonce"));
                    }
                    let mut b = [0u8; 4];
                    b.copy_from_slice(tlv.value);
                    nonce = Some(u32::from_be_bytes(b));
                }
                t if t == TlvType::InterestLifetime as u64 => lifetime_ms = tlv.as_uint()?,
                t if t == TlvType::HopLimit as u64 => {
                    if tlv.value.len() != 1 {
                        return Err(WireError::Range("HopLimit"));
                    }
                    hop_limit = tlv.value[0];
                }
                // Non-critical unknown elements are skipped
                _ => {}
            }
        }

        Ok(Self {
            name: name.ok_or(WireError::MissingField("Name"))?,
            nonce: nonce.ok_or(WireError::MissingField("Nonce"))?,
            lifetime_ms,
            hop_limit,
            flags,
        })
    }
}

/// Data packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    /// Packet name
    pub name: Name,
    /// Content payload
    pub content: Bytes,
    /// Freshness period in milliseconds (0 = never fresh)
    pub freshness_ms: u64,
}

impl Data {
    /// Create a Data packet for a name
    pub fn new(name: Name, content: impl Into<Bytes>) -> Self {
        Self {
            name,
            content: content.into(),
            freshness_ms: 0,
        }
    }

    /// Set the freshness period in milliseconds
    pub fn with_freshness(mut self, freshness_ms: u64) -> Self {
        self.freshness_ms = freshness_ms;
        self
    }

    /// Whether this Data can satisfy an Interest
    pub fn can_satisfy(&self, interest: &Interest) -> bool {
        if interest.flags.contains(InterestFlags::CAN_BE_PREFIX) {
            interest.name.is_prefix_of(&self.name)
        } else {
            interest.name == self.name
        }
    }

    /// Encode into wire format
    pub fn encode(&self) -> Bytes {
        let mut inner = BytesMut::new();
        self.name.encode_to(&mut inner);
        if self.freshness_ms > 0 {
            let mut meta = BytesMut::new();
            write_uint_value(&mut meta, TlvType::FreshnessPeriod as u64, self.freshness_ms);
            write_tlv(&mut inner, TlvType::MetaInfo as u64, &meta);
        }
        write_tlv(&mut inner, TlvType::Content as u64, &self.content);

        let mut buf = BytesMut::new();
        write_tlv(&mut buf, TlvType::Data as u64, &inner);
        buf.freeze()
    }

    /// Decode from wire format (one complete Data element)
    pub fn decode(mut input: &[u8]) -> Result<Self, WireError> {
        let outer = read_tlv(&mut input)?;
        if outer.typ != TlvType::Data as u64 {
            return Err(WireError::Type(outer.typ));
        }
        if !input.is_empty() {
            return Err(WireError::Trailing);
        }

        let mut value = outer.value;
        let mut name = None;
        let mut content = Bytes::new();
        let mut freshness_ms = 0;

        while !value.is_empty() {
            let tlv = read_tlv(&mut value)?;
            match tlv.typ {
                t if t == TlvType::Name as u64 => name = Some(Name::decode_value(tlv.value)?),
                t if t == TlvType::MetaInfo as u64 => {
                    let mut meta = tlv.value;
                    while !meta.is_empty() {
                        let field = read_tlv(&mut meta)?;
                        if field.typ == TlvType::FreshnessPeriod as u64 {
                            freshness_ms = field.as_uint()?;
                        }
                    }
                }
                t if t == TlvType::Content as u64 => {
                    content = Bytes::copy_from_slice(tlv.value);
                }
                _ => {}
            }
        }

        Ok(Self {
            name: name.ok_or(WireError::MissingField("Name"))?,
            content,
            freshness_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_roundtrip() {
        let interest = Interest::new("/ndn/A/ping/99".parse().unwrap())
            .with_lifetime(3000)
            .with_flags(InterestFlags::CAN_BE_PREFIX | InterestFlags::MUST_BE_FRESH);

        let wire = interest.encode();
        let decoded = Interest::decode(&wire).unwrap();
        assert_eq!(decoded, interest);
    }

    #[test]
    fn test_data_roundtrip() {
        let data = Data::new("/ndn/A/cert".parse().unwrap(), &b"certbytes"[..])
            .with_freshness(60_000);

        let wire = data.encode();
        let decoded = Data::decode(&wire).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_decode_wrong_type() {
        let data = Data::new("/x".parse().unwrap(), &b""[..]);
        let wire = data.encode();
        assert!(matches!(
            Interest::decode(&wire),
            Err(WireError::Type(t)) if t == TlvType::Data as u64
        ));
    }

    #[test]
    fn test_decode_truncated() {
        let interest = Interest::new("/ndn/A".parse().unwrap());
        let wire = interest.encode();
        assert!(matches!(
            Interest::decode(&wire[..wire.len() - 3]),
            Err(WireError::Incomplete)
        ));
    }

    #[test]
    fn test_can_satisfy() {
        let data = Data::new("/ndn/A/ping/7".parse().unwrap(), &b"pong"[..]);

        let exact = Interest::new("/ndn/A/ping/7".parse().unwrap());
        assert!(data.can_satisfy(&exact));

        let prefix = Interest::new("/ndn/A/ping".parse().unwrap())
            .with_flags(InterestFlags::CAN_BE_PREFIX);
        assert!(data.can_satisfy(&prefix));

        let prefix_no_flag = Interest::new("/ndn/A/ping".parse().unwrap());
        assert!(!data.can_satisfy(&prefix_no_flag));
    }

    #[test]
    fn test_hop_limit_exhaustion() {
        let mut interest = Interest::new("/x".parse().unwrap());
        interest.hop_limit = 1;

        let next = interest.decrement_hop_limit().unwrap();
        assert_eq!(next.hop_limit, 0);
        assert!(next.decrement_hop_limit().is_none());
    }
}
