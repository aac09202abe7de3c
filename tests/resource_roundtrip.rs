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

//! Resource-codec round trips across representative record kinds, and the
//! mining-header proof-of-work check (spec.md §4.1, §4.4).

use std::net::{Ipv4Addr, Ipv6Addr};

use nsconsensus::chain::header::MiningHeader;
use nsconsensus::resource::record::{Record, Target};
use nsconsensus::resource::Resource;

fn sample_header(mask: [u8; 32]) -> MiningHeader {
    MiningHeader {
        version: 0,
        prev: [1u8; 32],
        merkle: [2u8; 32],
        witness: [3u8; 32],
        tree: [4u8; 32],
        reserved: [0u8; 32],
        time: 1_753_000_000,
        bits: 0x1d00ffff,
        nonce: 7,
        extra_nonce: [0u8; 24],
        mask,
    }
}

#[test]
fn encodes_and_decodes_address_and_service_records() {
    let resource = Resource {
        compat: false,
        ttl_secs: 1_920,
        records: vec![
            Record::Inet4(Ipv4Addr::new(198, 51, 100, 7)),
            Record::Inet6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)),
            Record::Ns(Target::NameChain("ns1.alice".into())),
            Record::Service {
                service: "smtp".into(),
                protocol: "tcp".into(),
                priority: 10,
                weight: 5,
                target: Target::NameChain("mail.alice".into()),
                port: 25,
            },
            Record::Canonical(Target::NameDns("www.example.com".into())),
        ],
    };

    let encoded = resource.encode().unwrap();
    let decoded = Resource::decode(&encoded).unwrap();
    assert_eq!(decoded, resource);
}

#[test]
fn encodes_and_decodes_dnssec_and_fingerprint_records() {
    let resource = Resource {
        compat: true,
        ttl_secs: 4_096,
        records: vec![
            Record::Ds { key_tag: 1234, algorithm: 13, digest_type: 2, digest: vec![0xAB; 32] },
            Record::Tlsa { usage: 3, selector: 1, matching_type: 1, data: vec![0xCD; 32] },
            Record::Sshfp { algorithm: 1, fp_type: 2, fingerprint: vec![0xEF; 20] },
            Record::OpenPgpKey(vec![0x01, 0x02, 0x03]),
            Record::Location {
                latitude: 37_000_000,
                longitude: -122_000_000,
                altitude: 1_000,
                size: 0x12,
                horiz_precision: 0x16,
                vert_precision: 0x13,
            },
        ],
    };

    let encoded = resource.encode().unwrap();
    let decoded = Resource::decode(&encoded).unwrap();
    assert_eq!(decoded, resource);
}

/// Duplicate name targets interned through the symbol table decode back to
/// independent but equal `Target::NameChain` values.
#[test]
fn repeated_name_targets_share_symbol_table_entries() {
    let resource = Resource {
        compat: false,
        ttl_secs: 64,
        records: vec![
            Record::Ns(Target::NameChain("ns1.alice".into())),
            Record::Ns(Target::NameChain("ns2.alice".into())),
            Record::Canonical(Target::NameChain("ns1.alice".into())),
        ],
    };

    let encoded = resource.encode().unwrap();
    let decoded = Resource::decode(&encoded).unwrap();
    assert_eq!(decoded, resource);
}

#[test]
fn truncated_buffer_is_rejected_not_panicked() {
    let resource = Resource {
        compat: false,
        ttl_secs: 64,
        records: vec![Record::Text("hello".into())],
    };
    let encoded = resource.encode().unwrap();
    let truncated = &encoded[..encoded.len() - 1];
    assert!(Resource::decode(truncated).is_err());
}

#[test]
fn header_with_zero_mask_satisfies_a_maximal_target() {
    let header = sample_header([0u8; 32]);
    let max_target = [0xFFu8; 32];
    assert!(header.meets_target(&max_target));
}

#[test]
fn header_fails_an_all_zero_target_unless_pow_hash_is_zero() {
    let header = sample_header([0u8; 32]);
    let zero_target = [0u8; 32];
    let pow = header.pow_hash();
    assert_eq!(header.meets_target(&zero_target), pow == [0u8; 32]);
}

#[test]
fn changing_the_mask_changes_the_pow_hash_but_not_the_share_hash() {
    let a = sample_header([0u8; 32]);
    let b = sample_header([0xFFu8; 32]);
    assert_eq!(a.share_hash(), b.share_hash());
    assert_ne!(a.pow_hash(), b.pow_hash());
}
