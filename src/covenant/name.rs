// Name-auction consensus core: name-state machine, block assembler and
// authoritative resolver for a naming blockchain.
// Written in 2026 by
//     Name Chain Developers
//
// To the extent possible under law, the author(s) have dedicated all copyright
// and related and neighboring rights to this software to the public domain
// worldwide. This software is distributed without any warranty.
//
// You should have received a copy of the MIT License along with this software.
// If not, see <https://opensource.org/licenses/MIT>.

//! Name normalization, verification and the `NameHash` identity newtype
//! (spec.md §3, §4.1 "Name verification").

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use std::fmt;
use std::str::FromStr;

/// A label's stable identity on the chain: `Blake2b-256(name)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(StrictEncode, StrictDecode)]
pub struct NameHash(pub [u8; 32]);

impl NameHash {
    /// Hash an already-normalized label.
    pub fn of(name: &str) -> Self {
        let mut hasher = Blake2bVar::new(32).expect("32 is a valid Blake2b output size");
        hasher.update(name.as_bytes());
        let mut out = [0u8; 32];
        hasher
            .finalize_variable(&mut out)
            .expect("output buffer matches requested size");
        NameHash(out)
    }
}

impl fmt::Debug for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameHash({})", hex::encode(self.0))
    }
}

impl fmt::Display for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", hex::encode(self.0)) }
}

/// Errors rejecting a candidate label before it ever reaches a covenant.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum NameError {
    /// name is empty
    Empty,

    /// name exceeds the maximum label length
    TooLong,

    /// name contains a character outside [0-9a-z.-_]
    InvalidCharacter,

    /// name has a leading, trailing or doubled dot
    MalformedDots,

    /// name has a dash or underscore at a label boundary
    MalformedSeparator,

    /// name ends with a reserved suffix
    ReservedSuffix,
}

/// The maximum length, in bytes, of a normalized name.
pub const MAX_NAME_LENGTH: usize = 63;

/// Which namespace a name belongs to, which governs which characters and
/// reserved suffixes apply (spec.md §4.1 "Name verification").
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Namespace {
    /// The naming chain's own namespace: allows `_` as a separator.
    Chain,
    /// The external DNS namespace: no `_`, and a different reserved suffix.
    Dns,
}

impl Namespace {
    fn allows_underscore(self) -> bool { matches!(self, Namespace::Chain) }

    fn reserved_suffix(self) -> &'static str {
        match self {
            Namespace::Chain => ".eth",
            Namespace::Dns => ".localhost",
        }
    }
}

/// A normalized top-level (or resource-target) name: lowercase ASCII,
/// digits, dashes, dots and (chain-namespace only) underscores, with
/// position rules from spec.md §4.1.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[display("{0}")]
pub struct Name(String);

impl Name {
    /// Validate and wrap `raw` as a [`Name`] in the given namespace.
    pub fn parse(raw: &str, namespace: Namespace) -> Result<Self, NameError> {
        if raw.is_empty() {
            return Err(NameError::Empty);
        }
        if raw.len() > MAX_NAME_LENGTH {
            return Err(NameError::TooLong);
        }
        if raw.starts_with('.') || raw.ends_with('.') || raw.contains("..") {
            return Err(NameError::MalformedDots);
        }

        let labels: Vec<&str> = raw.split('.').collect();
        for label in &labels {
            if label.is_empty() {
                return Err(NameError::MalformedDots);
            }
            if label.starts_with('-')
                || label.ends_with('-')
                || label.starts_with('_')
                || label.ends_with('_')
            {
                return Err(NameError::MalformedSeparator);
            }
            for ch in label.chars() {
                let ok = ch.is_ascii_digit()
                    || ch.is_ascii_lowercase()
                    || ch == '-'
                    || (ch == '_' && namespace.allows_underscore());
                if !ok {
                    return Err(NameError::InvalidCharacter);
                }
            }
        }

        if raw.ends_with(namespace.reserved_suffix()) {
            return Err(NameError::ReservedSuffix);
        }

        Ok(Name(raw.to_owned()))
    }

    /// The underlying normalized label.
    pub fn as_str(&self) -> &str { &self.0 }

    /// The name's stable on-chain identity.
    pub fn hash(&self) -> NameHash { NameHash::of(&self.0) }

    /// The top-level label (everything after the last dot, or the whole
    /// name if it has none), used to locate the owning `NameState`.
    pub fn tld(&self) -> &str { self.0.rsplit('.').next().unwrap_or(&self.0) }

    /// True when `self` is strictly deeper than its TLD (i.e. it names a
    /// subdomain, not the top-level name itself).
    pub fn is_subdomain(&self) -> bool { self.0.len() != self.tld().len() }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Name::parse(s, Namespace::Chain) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_names() {
        assert!(Name::parse("alice", Namespace::Chain).is_ok());
        assert!(Name::parse("a-b_c", Namespace::Chain).is_ok());
        assert!(Name::parse("sub.alice", Namespace::Chain).is_ok());
    }

    #[test]
    fn rejects_malformed_names() {
        assert_eq!(Name::parse("", Namespace::Chain), Err(NameError::Empty));
        assert_eq!(
            Name::parse(".alice", Namespace::Chain),
            Err(NameError::MalformedDots)
        );
        assert_eq!(
            Name::parse("alice..bob", Namespace::Chain),
            Err(NameError::MalformedDots)
        );
        assert_eq!(
            Name::parse("-alice", Namespace::Chain),
            Err(NameError::MalformedSeparator)
        );
        assert_eq!(
            Name::parse("alice!", Namespace::Chain),
            Err(NameError::InvalidCharacter)
        );
        assert_eq!(
            Name::parse("alice_", Namespace::Dns),
            Err(NameError::InvalidCharacter)
        );
    }

    #[test]
    fn hash_is_deterministic() {
        let a = Name::parse("alice", Namespace::Chain).unwrap();
        let b = Name::parse("alice", Namespace::Chain).unwrap();
        assert_eq!(a.hash(), b.hash());
        let c = Name::parse("bob", Namespace::Chain).unwrap();
        assert_ne!(a.hash(), c.hash());
    }

    #[test]
    fn tld_and_subdomain_detection() {
        let top = Name::parse("alice", Namespace::Chain).unwrap();
        assert_eq!(top.tld(), "alice");
        assert!(!top.is_subdomain());

        let sub = Name::parse("www.alice", Namespace::Chain).unwrap();
        assert_eq!(sub.tld(), "alice");
        assert!(sub.is_subdomain());
    }
}
