#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::ModelError;

/// A deterministic rule identifier.
///
/// Derived from the ruleset name and rule name, so re-importing the same file
/// yields the same id. Rendered as lowercase hex. Not a security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId([u8; 16]);

impl RuleId {
    pub fn derive(ruleset_name: &str, rule_name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(ruleset_name.as_bytes());
        hasher.update(rule_name.as_bytes());
        Self::from_first_16_bytes_of_sha256(hasher.finalize().into())
    }

    pub fn from_first_16_bytes_of_sha256(digest: [u8; 32]) -> Self {
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for RuleId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| ModelError::InvalidRuleId(s.to_string()))?;
        let out: [u8; 16] = bytes
            .try_into()
            .map_err(|_| ModelError::InvalidRuleId(s.to_string()))?;
        Ok(Self(out))
    }
}

impl serde::Serialize for RuleId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for RuleId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_stable() {
        let a = RuleId::derive("rules/apt.yar", "Trojan_APIHook_Win32");
        let b = RuleId::derive("rules/apt.yar", "Trojan_APIHook_Win32");
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 32);
    }

    #[test]
    fn derive_hashes_the_concatenation() {
        // Only the concatenated text matters.
        assert_eq!(RuleId::derive("ab", "c"), RuleId::derive("a", "bc"));
        assert_ne!(RuleId::derive("a", "b"), RuleId::derive("a", "c"));
    }

    #[test]
    fn parses_own_hex() {
        let id = RuleId::derive("x", "y");
        let parsed: RuleId = id.to_hex().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("abc".parse::<RuleId>().is_err());
        assert!("zz".repeat(16).parse::<RuleId>().is_err());
    }
}
