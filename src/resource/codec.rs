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

//! Binary encode/decode for [`super::Resource`] (spec.md §4.1).
//!
//! Hand-rolled against a byte slice/cursor directly, reading and writing the
//! chain's own compact resource format without pulling in a generic
//! serializer.

use super::record::{Record, Target};
use super::symbol::{Symbol, SymbolTable};
use crate::error::OperationalError;
use std::net::{Ipv4Addr, Ipv6Addr};

pub const RESOURCE_VERSION: u8 = 0;

const TARGET_INET4: u8 = 0;
const TARGET_INET6: u8 = 1;
const TARGET_ONION_V2: u8 = 2;
const TARGET_ONION_V3: u8 = 3;
const TARGET_NAME_CHAIN: u8 = 4;
const TARGET_NAME_DNS: u8 = 5;

struct Writer<'t> {
    table: &'t mut SymbolTable,
    body: Vec<u8>,
}

impl<'t> Writer<'t> {
    fn intern(&mut self, s: &str) -> Result<(), OperationalError> {
        let Symbol(idx) = self.table.intern(s)?;
        self.body.extend_from_slice(&idx.to_be_bytes());
        Ok(())
    }

    fn target(&mut self, target: &Target) -> Result<(), OperationalError> {
        match target {
            Target::Inet4(ip) => {
                self.body.push(TARGET_INET4);
                self.body.extend_from_slice(&ip.octets());
            }
            Target::Inet6(ip) => {
                self.body.push(TARGET_INET6);
                self.body.extend_from_slice(&ip.octets());
            }
            Target::OnionV2(id) => {
                self.body.push(TARGET_ONION_V2);
                self.body.extend_from_slice(id);
            }
            Target::OnionV3(id) => {
                self.body.push(TARGET_ONION_V3);
                self.body.extend_from_slice(id);
            }
            Target::NameChain(name) => {
                self.body.push(TARGET_NAME_CHAIN);
                self.intern(name)?;
            }
            Target::NameDns(name) => {
                self.body.push(TARGET_NAME_DNS);
                self.intern(name)?;
            }
        }
        Ok(())
    }
}

struct Reader<'b, 't> {
    table: &'t SymbolTable,
    buf: &'b [u8],
    pos: usize,
}

impl<'b, 't> Reader<'b, 't> {
    fn truncated() -> OperationalError { OperationalError::Decode("truncated resource record".into()) }

    fn u8(&mut self) -> Result<u8, OperationalError> {
        let b = *self.buf.get(self.pos).ok_or_else(Self::truncated)?;
        self.pos += 1;
        Ok(b)
    }

    fn u16(&mut self) -> Result<u16, OperationalError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn u32(&mut self) -> Result<u32, OperationalError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn i32(&mut self) -> Result<i32, OperationalError> { self.u32().map(|v| v as i32) }

    fn take(&mut self, n: usize) -> Result<&'b [u8], OperationalError> {
        if self.pos + n > self.buf.len() {
            return Err(Self::truncated());
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], OperationalError> {
        let slice = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn symbol_str(&mut self) -> Result<String, OperationalError> {
        let idx = self.u16()?;
        self.table.resolve(Symbol(idx)).map(str::to_owned)
    }

    fn target(&mut self) -> Result<Target, OperationalError> {
        match self.u8()? {
            TARGET_INET4 => Ok(Target::Inet4(Ipv4Addr::from(self.array::<4>()?))),
            TARGET_INET6 => Ok(Target::Inet6(Ipv6Addr::from(self.array::<16>()?))),
            TARGET_ONION_V2 => Ok(Target::OnionV2(self.array::<10>()?)),
            TARGET_ONION_V3 => Ok(Target::OnionV3(self.array::<35>()?)),
            TARGET_NAME_CHAIN => Ok(Target::NameChain(self.symbol_str()?)),
            TARGET_NAME_DNS => Ok(Target::NameDns(self.symbol_str()?)),
            other => Err(OperationalError::Decode(format!("unknown target kind {}", other))),
        }
    }

    fn blob(&mut self) -> Result<Vec<u8>, OperationalError> {
        let len = self.u8()? as usize;
        Ok(self.take(len)?.to_vec())
    }
}

/// Encode one record's tag and body into `table`/`out`, per spec.md §4.1's
/// "1 byte type tag followed by type-specific body".
pub fn encode_record(record: &Record, table: &mut SymbolTable, out: &mut Vec<u8>) -> Result<(), OperationalError> {
    out.push(record.tag());
    let mut w = Writer { table, body: Vec::new() };
    match record {
        Record::Inet4(ip) => w.body.extend_from_slice(&ip.octets()),
        Record::Inet6(ip) => w.body.extend_from_slice(&ip.octets()),
        Record::Onion(id) => w.body.extend_from_slice(id),
        Record::OnionNG(id) => w.body.extend_from_slice(id),
        Record::Canonical(target) => w.target(target)?,
        Record::Delegate(target) => w.target(target)?,
        Record::Ns(target) => w.target(target)?,
        Record::Service { service, protocol, priority, weight, target, port } => {
            w.intern(service)?;
            w.intern(protocol)?;
            w.body.extend_from_slice(&priority.to_be_bytes());
            w.body.extend_from_slice(&weight.to_be_bytes());
            w.target(target)?;
            w.body.extend_from_slice(&port.to_be_bytes());
        }
        Record::Url(s) | Record::Email(s) | Record::Text(s) | Record::Magnet(s) | Record::Addr(s) => {
            w.intern(s)?;
        }
        Record::Location { latitude, longitude, altitude, size, horiz_precision, vert_precision } => {
            w.body.extend_from_slice(&latitude.to_be_bytes());
            w.body.extend_from_slice(&longitude.to_be_bytes());
            w.body.extend_from_slice(&altitude.to_be_bytes());
            w.body.push(*size);
            w.body.push(*horiz_precision);
            w.body.push(*vert_precision);
        }
        Record::Ds { key_tag, algorithm, digest_type, digest } => {
            w.body.extend_from_slice(&key_tag.to_be_bytes());
            w.body.push(*algorithm);
            w.body.push(*digest_type);
            if digest.len() > 255 {
                return Err(OperationalError::Decode("DS digest exceeds 255 bytes".into()));
            }
            w.body.push(digest.len() as u8);
            w.body.extend_from_slice(digest);
        }
        Record::Tlsa { usage, selector, matching_type, data } => {
            w.body.push(*usage);
            w.body.push(*selector);
            w.body.push(*matching_type);
            if data.len() > 255 {
                return Err(OperationalError::Decode("TLSA data exceeds 255 bytes".into()));
            }
            w.body.push(data.len() as u8);
            w.body.extend_from_slice(data);
        }
        Record::Sshfp { algorithm, fp_type, fingerprint } => {
            w.body.push(*algorithm);
            w.body.push(*fp_type);
            if fingerprint.len() > 255 {
                return Err(OperationalError::Decode("SSHFP fingerprint exceeds 255 bytes".into()));
            }
            w.body.push(fingerprint.len() as u8);
            w.body.extend_from_slice(fingerprint);
        }
        Record::OpenPgpKey(key) => {
            if key.len() > 255 {
                return Err(OperationalError::Decode("OPENPGPKEY exceeds 255 bytes".into()));
            }
            w.body.push(key.len() as u8);
            w.body.extend_from_slice(key);
        }
        Record::Extra { data, .. } => {
            // Outer (tag, len) framing already bounds this body; no inner
            // length prefix, so decoding an unrecognized tag can treat the
            // whole body as `data` verbatim.
            w.body.extend_from_slice(data);
        }
    }
    out.push(w.body.len() as u8);
    out.extend_from_slice(&w.body);
    Ok(())
}

/// Decode one tagged record, given the tag byte already consumed by the
/// caller and the remaining per-record body in `body`.
pub fn decode_record(tag: u8, body: &[u8], table: &SymbolTable) -> Result<Record, OperationalError> {
    let mut r = Reader { table, buf: body, pos: 0 };
    let record = match tag {
        0 => Record::Inet4(Ipv4Addr::from(r.array::<4>()?)),
        1 => Record::Inet6(Ipv6Addr::from(r.array::<16>()?)),
        2 => Record::Onion(r.array::<10>()?),
        3 => Record::OnionNG(r.array::<35>()?),
        4 => Record::Canonical(r.target()?),
        5 => Record::Delegate(r.target()?),
        6 => Record::Ns(r.target()?),
        7 => Record::Service {
            service: r.symbol_str()?,
            protocol: r.symbol_str()?,
            priority: r.u16()?,
            weight: r.u16()?,
            target: r.target()?,
            port: r.u16()?,
        },
        8 => Record::Url(r.symbol_str()?),
        9 => Record::Email(r.symbol_str()?),
        10 => Record::Text(r.symbol_str()?),
        11 => Record::Magnet(r.symbol_str()?),
        12 => Record::Addr(r.symbol_str()?),
        13 => Record::Location {
            latitude: r.i32()?,
            longitude: r.i32()?,
            altitude: r.i32()?,
            size: r.u8()?,
            horiz_precision: r.u8()?,
            vert_precision: r.u8()?,
        },
        14 => Record::Ds {
            key_tag: r.u16()?,
            algorithm: r.u8()?,
            digest_type: r.u8()?,
            digest: r.blob()?,
        },
        15 => Record::Tlsa {
            usage: r.u8()?,
            selector: r.u8()?,
            matching_type: r.u8()?,
            data: r.blob()?,
        },
        16 => Record::Sshfp { algorithm: r.u8()?, fp_type: r.u8()?, fingerprint: r.blob()? },
        17 => Record::OpenPgpKey(r.blob()?),
        other => Record::Extra { tag: other, data: body.to_vec() },
    };
    Ok(record)
}
