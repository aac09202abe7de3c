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

//! Minimal RFC1035-shaped DNS message structures for authoritative answers.
//!
//! Hand-rolled against the wire directly rather than pulled in from a DNS
//! message crate: header flags, question and resource-record shapes are
//! just plain structs with their own encode/decode methods.

use std::net::{Ipv4Addr, Ipv6Addr};

/// DNS response codes this resolver can produce.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Rcode {
    NoError = 0,
    NxDomain = 3,
    NotImplemented = 4,
}

/// DNS query types this resolver recognizes. `Any` and `NameProof` are the
/// two non-standard members: `Any` per RFC1035's `ANY` meta-type, and
/// `NameProof` the dedicated inclusion/non-inclusion proof record chosen to
/// resolve the proof-record-shape Open Question (spec.md §4.5, §"Open
/// Questions").
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum QType {
    A,
    Aaaa,
    Ns,
    Cname,
    Dname,
    Mx,
    Srv,
    Txt,
    Loc,
    Ds,
    Tlsa,
    Sshfp,
    OpenPgpKey,
    Soa,
    DnsKey,
    NameProof,
    Any,
}

impl QType {
    /// This query type's wire value. `NameProof` uses `65280`, the first
    /// private-use value in RFC6895's experimental range.
    pub fn to_u16(self) -> u16 {
        match self {
            QType::A => 1,
            QType::Ns => 2,
            QType::Cname => 5,
            QType::Soa => 6,
            QType::Mx => 15,
            QType::Txt => 16,
            QType::Aaaa => 28,
            QType::Loc => 29,
            QType::Srv => 33,
            QType::Dname => 39,
            QType::Sshfp => 44,
            QType::DnsKey => 48,
            QType::Tlsa => 52,
            QType::OpenPgpKey => 61,
            QType::NameProof => 65280,
            QType::Any => 255,
        }
    }
}

/// A DNS question: the name and type being asked about (class is always
/// `IN` for this resolver).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Question {
    /// The queried name.
    pub name: String,
    /// The queried type.
    pub qtype: QType,
}

/// One synthesized resource record's data, independent of its owner name
/// and TTL (carried by the containing [`Answer`]).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(String),
    Cname(String),
    Dname(String),
    Mx { preference: u16, exchange: String },
    Srv { priority: u16, weight: u16, port: u16, target: String },
    Txt(Vec<String>),
    Loc { latitude: i32, longitude: i32, altitude: i32, size: u8, horiz: u8, vert: u8 },
    Ds { key_tag: u16, algorithm: u8, digest_type: u8, digest: Vec<u8> },
    Tlsa { usage: u8, selector: u8, matching_type: u8, data: Vec<u8> },
    Sshfp { algorithm: u8, fp_type: u8, fingerprint: Vec<u8> },
    OpenPgpKey(Vec<u8>),
    DnsKey { flags: u16, protocol: u8, algorithm: u8, public_key: Vec<u8> },
    Soa { mname: String, rname: String, serial: u32, refresh: u32, retry: u32, expire: u32, minimum: u32 },
    NameProof(crate::resolver::proof::NameProof),
}

/// One answer record: owner name, TTL, and data.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Answer {
    /// The name this record answers for.
    pub name: String,
    /// Seconds a resolver may cache this record.
    pub ttl: u32,
    /// The record's data.
    pub data: RData,
}

/// A fully assembled authoritative response (spec.md §4.5): answer,
/// authority and additional sections, plus the response code.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Response {
    /// Response status.
    pub rcode: Option<Rcode>,
    /// Direct answers to the question.
    pub answers: Vec<Answer>,
    /// Authority-section records (SOA, NS, DS).
    pub authority: Vec<Answer>,
    /// Additional-section records (glue, synthesized pointers, proofs).
    pub additional: Vec<Answer>,
    /// Zone-key signature over the answer section, present only for
    /// DNSSEC-enabled queries (spec.md §4.5).
    pub signature: Option<Vec<u8>>,
}

impl Default for Rcode {
    fn default() -> Self { Rcode::NoError }
}

impl Response {
    /// Start an empty `NOERROR` response.
    pub fn new() -> Self { Response { rcode: Some(Rcode::NoError), ..Response::default() } }
}
