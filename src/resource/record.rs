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

//! Target and record shapes carried by a [`super::Resource`] (spec.md §4.1's
//! record table).

use std::net::{Ipv4Addr, Ipv6Addr};

/// What a name, nameserver or canonical/delegate record points at.
///
/// Distinguishes the four address spaces spec.md §4.1 calls out: raw IPv4,
/// raw IPv6, a Tor onion address (v2 or v3), and a name, which may itself
/// live on the naming chain or in the external DNS namespace. An IP target
/// used as an NS glue source is rendered by the resolver as a synthesized
/// pointer label (`_<base32(packed-ip)>.<parent>`), not stored as one here.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Target {
    /// A routable IPv4 host.
    Inet4(Ipv4Addr),
    /// A routable IPv6 host.
    Inet6(Ipv6Addr),
    /// A Tor v2 onion address (10-byte service id).
    OnionV2([u8; 10]),
    /// A Tor v3 onion address (35-byte service id + checksum + version).
    OnionV3([u8; 35]),
    /// A name on the naming chain's own namespace.
    NameChain(String),
    /// A name in the external DNS namespace.
    NameDns(String),
}

impl Target {
    /// True for the Tor variants, used to reject CANONICAL targets that may
    /// not point at an onion address (spec.md §4.1).
    pub fn is_tor(&self) -> bool { matches!(self, Target::OnionV2(_) | Target::OnionV3(_)) }

    /// True when this target names a chain or DNS label rather than an
    /// address, used to validate DELEGATE targets (which must be names).
    pub fn is_name(&self) -> bool {
        matches!(self, Target::NameChain(_) | Target::NameDns(_))
    }
}

/// One decoded record from a [`super::Resource`]'s record sequence
/// (spec.md §4.1's tag table).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Record {
    /// A+ records: IPv4 hosts.
    Inet4(Ipv4Addr),
    /// AAAA records: IPv6 hosts.
    Inet6(Ipv6Addr),
    /// A Tor v2 onion address, surfaced as a `hsk:tor` TXT bucket entry.
    Onion([u8; 10]),
    /// A Tor v3 onion address, surfaced as a `hsk:tor` TXT bucket entry.
    OnionNG([u8; 35]),
    /// CNAME-equivalent: single target, never a Tor address.
    Canonical(Target),
    /// DNAME-equivalent: single target, must itself be a name.
    Delegate(Target),
    /// A nameserver target (name or routable IP pointer).
    Ns(Target),
    /// An SRV-like service record.
    Service {
        /// Service name (e.g. `smtp`, without the leading underscore).
        service: String,
        /// Transport protocol (e.g. `tcp`).
        protocol: String,
        /// SRV priority.
        priority: u16,
        /// SRV weight.
        weight: u16,
        /// Where the service is hosted.
        target: Target,
        /// SRV port.
        port: u16,
    },
    /// Free-form URL TXT aggregate (`hsk:url ...`).
    Url(String),
    /// Free-form email TXT aggregate (`hsk:email ...`).
    Email(String),
    /// Free-form opaque TXT aggregate.
    Text(String),
    /// Free-form magnet-link TXT aggregate (`hsk:magnet ...`).
    Magnet(String),
    /// Free-form address TXT aggregate (`hsk:addr ...`).
    Addr(String),
    /// LOC-equivalent geographic record.
    Location {
        /// Latitude in units of 1e-6 arcseconds north of the equator.
        latitude: i32,
        /// Longitude in units of 1e-6 arcseconds east of the meridian.
        longitude: i32,
        /// Altitude in centimeters above the WGS84 reference.
        altitude: i32,
        /// Encoded size/precision byte, LOC RR style (mantissa<<4|exponent).
        size: u8,
        /// Horizontal precision, same encoding as `size`.
        horiz_precision: u8,
        /// Vertical precision, same encoding as `size`.
        vert_precision: u8,
    },
    /// DNSSEC delegation-signer record.
    Ds {
        /// Key tag of the referenced DNSKEY.
        key_tag: u16,
        /// DNSKEY algorithm number.
        algorithm: u8,
        /// Digest algorithm number.
        digest_type: u8,
        /// The digest itself.
        digest: Vec<u8>,
    },
    /// TLS certificate association record.
    Tlsa {
        /// Certificate usage field.
        usage: u8,
        /// Selector field.
        selector: u8,
        /// Matching type field.
        matching_type: u8,
        /// Certificate association data.
        data: Vec<u8>,
    },
    /// SSH fingerprint record.
    Sshfp {
        /// Public key algorithm.
        algorithm: u8,
        /// Fingerprint type.
        fp_type: u8,
        /// The fingerprint itself.
        fingerprint: Vec<u8>,
    },
    /// OpenPGP public key record.
    OpenPgpKey(Vec<u8>),
    /// An unrecognized tag, preserved verbatim for forward compatibility.
    Extra {
        /// The unrecognized tag byte.
        tag: u8,
        /// The record's raw, unparsed body.
        data: Vec<u8>,
    },
}

impl Record {
    /// The wire tag byte for this record's variant (spec.md §4.1 assigns
    /// these sequentially; `Extra` carries its own original tag instead).
    pub fn tag(&self) -> u8 {
        match self {
            Record::Inet4(_) => 0,
            Record::Inet6(_) => 1,
            Record::Onion(_) => 2,
            Record::OnionNG(_) => 3,
            Record::Canonical(_) => 4,
            Record::Delegate(_) => 5,
            Record::Ns(_) => 6,
            Record::Service { .. } => 7,
            Record::Url(_) => 8,
            Record::Email(_) => 9,
            Record::Text(_) => 10,
            Record::Magnet(_) => 11,
            Record::Addr(_) => 12,
            Record::Location { .. } => 13,
            Record::Ds { .. } => 14,
            Record::Tlsa { .. } => 15,
            Record::Sshfp { .. } => 16,
            Record::OpenPgpKey(_) => 17,
            Record::Extra { tag, .. } => *tag,
        }
    }
}
