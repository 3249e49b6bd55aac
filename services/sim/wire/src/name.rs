//! Hierarchical NDN names.

use crate::error::WireError;
use crate::tlv::{read_tlv, write_tlv, TlvType};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// One name component (generic, UTF-8 text)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Component(String);

impl Component {
    /// Create a component from text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Component text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hierarchical name, an ordered sequence of components.
///
/// The URI form is `/a/b/c`; the root name prints as `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name {
    components: SmallVec<[Component; 4]>,
}

impl Name {
    /// The empty (root) name
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a name from components
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Self {
        Self {
            components: components.into_iter().collect(),
        }
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the name has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over components
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Component at an index
    pub fn get(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    /// Return a new name with one component appended
    pub fn append(&self, component: impl Into<String>) -> Self {
        let mut components = self.components.clone();
        components.push(Component::new(component));
        Self { components }
    }

    /// Return a new name with all of `suffix`'s components appended
    pub fn join(&self, suffix: &Name) -> Self {
        let mut components = self.components.clone();
        components.extend(suffix.components.iter().cloned());
        Self { components }
    }

    /// Whether this name is a prefix of `other` (every name is a prefix of itself)
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| a == b)
    }

    /// Encode as a Name TLV element
    pub fn encode_to(&self, buf: &mut BytesMut) {
        let mut inner = BytesMut::new();
        for comp in &self.components {
            write_tlv(&mut inner, TlvType::GenericComponent as u64, comp.as_str().as_bytes());
        }
        write_tlv(buf, TlvType::Name as u64, &inner);
    }

    /// Decode from the value bytes of a Name TLV element
    pub fn decode_value(mut value: &[u8]) -> Result<Self, WireError> {
        let mut components = SmallVec::new();
        while !value.is_empty() {
            let tlv = read_tlv(&mut value)?;
            if tlv.typ != TlvType::GenericComponent as u64 {
                return Err(WireError::Component);
            }
            let text = std::str::from_utf8(tlv.value).map_err(|_| WireError::Component)?;
            components.push(Component::new(text));
        }
        Ok(Self { components })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return write!(f, "/");
        }
        for comp in &self.components {
            write!(f, "/{}", comp)?;
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = WireError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        let trimmed = uri.trim();
        if !trimmed.starts_with('/') {
            return Err(WireError::Uri(uri.to_string()));
        }
        let components: SmallVec<[Component; 4]> = trimmed
            .split('/')
            .filter(|c| !c.is_empty())
            .map(Component::new)
            .collect();
        Ok(Self { components })
    }
}

impl Serialize for Name {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        uri.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_roundtrip() {
        let name: Name = "/ndn/A/ping/12345".parse().unwrap();
        assert_eq!(name.len(), 4);
        assert_eq!(name.to_string(), "/ndn/A/ping/12345");

        let root: Name = "/".parse().unwrap();
        assert!(root.is_empty());
        assert_eq!(root.to_string(), "/");
    }

    #[test]
    fn test_uri_rejects_relative() {
        assert!("ndn/A".parse::<Name>().is_err());
    }

    #[test]
    fn test_prefix_match() {
        let prefix: Name = "/ndn/A".parse().unwrap();
        let name: Name = "/ndn/A/ping/1".parse().unwrap();
        let other: Name = "/ndn/B/ping/1".parse().unwrap();

        assert!(prefix.is_prefix_of(&name));
        assert!(prefix.is_prefix_of(&prefix));
        assert!(!prefix.is_prefix_of(&other));
        assert!(!name.is_prefix_of(&prefix));
    }

    #[test]
    fn test_append_join() {
        let base: Name = "/ndn".parse().unwrap();
        let appended = base.append("A");
        assert_eq!(appended.to_string(), "/ndn/A");

        let suffix: Name = "/ping/7".parse().unwrap();
        assert_eq!(appended.join(&suffix).to_string(), "/ndn/A/ping/7");
    }

    #[test]
    fn test_tlv_roundtrip() {
        let name: Name = "/ndn/multicast/test".parse().unwrap();
        let mut buf = BytesMut::new();
        name.encode_to(&mut buf);

        let mut slice: &[u8] = &buf;
        let tlv = read_tlv(&mut slice).unwrap();
        assert_eq!(tlv.typ, TlvType::Name as u64);
        let decoded = Name::decode_value(tlv.value).unwrap();
        assert_eq!(decoded, name);
    }

    #[test]
    fn test_ordering_deterministic() {
        let mut names: Vec<Name> = ["/b", "/a/z", "/a", "/a/b"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        names.sort();
        let uris: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        assert_eq!(uris, vec!["/a", "/a/b", "/a/z", "/b"]);
    }
}
