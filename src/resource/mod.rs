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

//! The compact on-chain resource binary format (spec.md §4.1): version
//! byte, TTL word, a per-resource symbol table, then a sequence of tagged
//! records.

pub mod codec;
pub mod record;
pub mod symbol;

pub use record::{Record, Target};
pub use symbol::{Symbol, SymbolTable};

use crate::error::OperationalError;
use codec::RESOURCE_VERSION;

const COMPAT_BIT: u16 = 1 << 15;
const TTL_GRANULARITY: u32 = 64;

/// A name's full decoded resource set: its TTL and every record registered
/// against it.
///
/// `Resource::encode`/[`Resource::decode`] are the round-trip contract
/// spec.md §4.1 requires: unknown tags survive as [`Record::Extra`], and
/// decoding a buffer whose version byte isn't 0 always fails.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Resource {
    /// The "compat" flag carried by the TTL word's high bit.
    pub compat: bool,
    /// TTL in seconds. Only multiples of [`TTL_GRANULARITY`] survive a
    /// round trip: [`Resource::encode`] truncates toward zero.
    pub ttl_secs: u32,
    /// The record set, in registration order.
    pub records: Vec<Record>,
}

impl Resource {
    /// Encode this resource into its on-chain binary form.
    pub fn encode(&self) -> Result<Vec<u8>, OperationalError> {
        let ttl_units = (self.ttl_secs / TTL_GRANULARITY).min(0x7FFF);
        let mut ttl_word = ttl_units as u16;
        if self.compat {
            ttl_word |= COMPAT_BIT;
        }

        let mut table = SymbolTable::default();
        let mut record_bytes = Vec::new();
        for record in &self.records {
            codec::encode_record(record, &mut table, &mut record_bytes)?;
        }

        let mut out = Vec::with_capacity(3 + record_bytes.len());
        out.push(RESOURCE_VERSION);
        out.extend_from_slice(&ttl_word.to_be_bytes());
        table.write(&mut out);
        out.extend_from_slice(&record_bytes);
        Ok(out)
    }

    /// Decode a resource from its on-chain binary form. Rejects any buffer
    /// whose version byte is not 0.
    pub fn decode(buf: &[u8]) -> Result<Self, OperationalError> {
        let short = || OperationalError::Decode("truncated resource header".into());
        if buf.len() < 3 {
            return Err(short());
        }
        if buf[0] != RESOURCE_VERSION {
            return Err(OperationalError::Decode(format!(
                "unsupported resource version {}",
                buf[0]
            )));
        }
        let ttl_word = u16::from_be_bytes([buf[1], buf[2]]);
        let compat = ttl_word & COMPAT_BIT != 0;
        let ttl_secs = ((ttl_word & !COMPAT_BIT) as u32) * TTL_GRANULARITY;

        let (table, consumed) = SymbolTable::read(&buf[3..])?;
        let mut pos = 3 + consumed;

        let mut records = Vec::new();
        while pos < buf.len() {
            let tag = buf[pos];
            let len = *buf.get(pos + 1).ok_or_else(short)? as usize;
            let body_start = pos + 2;
            let body_end = body_start + len;
            if body_end > buf.len() {
                return Err(short());
            }
            records.push(codec::decode_record(tag, &buf[body_start..body_end], &table)?);
            pos = body_end;
        }

        Ok(Resource { compat, ttl_secs, records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn round_trips_a_mixed_record_set() {
        let resource = Resource {
            compat: true,
            ttl_secs: 3600,
            records: vec![
                Record::Inet4(Ipv4Addr::new(203, 0, 113, 1)),
                Record::Ns(Target::NameChain("ns1.alice".into())),
                Record::Ns(Target::NameChain("ns1.alice".into())),
                Record::Text("hello world".into()),
            ],
        };

        let encoded = resource.encode().unwrap();
        let decoded = Resource::decode(&encoded).unwrap();
        assert_eq!(decoded, resource);
    }

    #[test]
    fn ttl_rounds_down_to_granularity() {
        let resource = Resource { compat: false, ttl_secs: 100, records: vec![] };
        let encoded = resource.encode().unwrap();
        let decoded = Resource::decode(&encoded).unwrap();
        assert_eq!(decoded.ttl_secs, 64);
    }

    #[test]
    fn unknown_tag_survives_as_extra() {
        let mut encoded = Resource { compat: false, ttl_secs: 0, records: vec![] }.encode().unwrap();
        encoded.extend_from_slice(&[200, 2, 0xAB, 0xCD]);
        let decoded = Resource::decode(&encoded).unwrap();
        assert_eq!(decoded.records, vec![Record::Extra { tag: 200, data: vec![0xAB, 0xCD] }]);
    }

    #[test]
    fn rejects_non_zero_version() {
        let err = Resource::decode(&[1, 0, 0]).unwrap_err();
        assert!(matches!(err, OperationalError::Decode(_)));
    }
}
