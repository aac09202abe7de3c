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

//! The authoritative resolver (spec.md §4.5): projects on-chain name state
//! into DNS responses, with referrals, synthesized glue, name-proofs and
//! zone-key signatures.
//!
//! A zone owns authoritative data and a resolver walks referrals against it,
//! with answer/authority/additional sections laid out RFC1035-style. The
//! zone-signing key reuses `bitcoin`'s re-exported `secp256k1` rather than
//! pulling in a dedicated DNSSEC crate.

use std::net::{Ipv4Addr, Ipv6Addr};

use bitcoin::secp256k1::{Message, Secp256k1, SecretKey};
use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use log::debug;

use crate::covenant::name::{Name, NameHash, Namespace};
use crate::covenant::validator::NameStore;
use crate::resolver::message::{Answer, QType, Question, RData, Rcode, Response};
use crate::resolver::proof::{NameProof, ProofNode};
use crate::resource::{Record, Resource, Target};

const POINTER_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Base32-encode (RFC4648, lowercase, unpadded) the bytes of a synthesized
/// NS glue pointer label: `_<base32(packed-ip)>.<parent>` (spec.md §4.1).
fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer = 0u32;
    let mut bits = 0u32;
    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            let idx = (buffer >> bits) & 0x1F;
            out.push(POINTER_ALPHABET[idx as usize] as char);
        }
    }
    if bits > 0 {
        let idx = (buffer << (5 - bits)) & 0x1F;
        out.push(POINTER_ALPHABET[idx as usize] as char);
    }
    out
}

fn pointer_label(octets: &[u8], parent: &str) -> String {
    format!("_{}.{}", base32_encode(octets), parent)
}

/// Configuration for the root zone (the `.` apex) and the zone-signing
/// identity, loaded once at startup alongside [`crate::params::NetworkParams`].
#[derive(Clone, Debug)]
pub struct RootConfig {
    /// Nameserver hostnames served for the root and for every TLD referral
    /// when a TLD does not itself carry NS records.
    pub ns: Vec<String>,
    /// Glue addresses for `ns[0]`, so a cold resolver can bootstrap.
    pub root_ipv4: Vec<Ipv4Addr>,
    /// IPv6 glue addresses for `ns[0]`.
    pub root_ipv6: Vec<Ipv6Addr>,
    /// The root zone's DNSKEY public key material, served verbatim.
    pub dnskey: Vec<u8>,
    /// SOA MNAME (primary nameserver).
    pub soa_mname: String,
    /// SOA RNAME (responsible-party mailbox, DNS-encoded).
    pub soa_rname: String,
    /// SOA serial number.
    pub soa_serial: u32,
    /// Default TTL applied to synthesized records.
    pub ttl: u32,
}

impl RootConfig {
    /// A small configuration suitable for tests: one nameserver, loopback
    /// glue, a fixed serial.
    pub fn test_defaults() -> Self {
        RootConfig {
            ns: vec!["ns1.".to_owned()],
            root_ipv4: vec![Ipv4Addr::new(127, 0, 0, 1)],
            root_ipv6: vec![],
            dnskey: vec![0xAB; 32],
            soa_mname: "ns1.".to_owned(),
            soa_rname: "admin.ns1.".to_owned(),
            soa_serial: 1,
            ttl: 3600,
        }
    }

    fn soa(&self) -> RData {
        RData::Soa {
            mname: self.soa_mname.clone(),
            rname: self.soa_rname.clone(),
            serial: self.soa_serial,
            refresh: 21600,
            retry: 1800,
            expire: 604_800,
            minimum: 300,
        }
    }
}

/// The root zone's signing identity. Wraps a `secp256k1` keypair so
/// DNSSEC-enabled queries can receive a signature over the answer section
/// (spec.md §4.5).
pub struct ZoneKey {
    secret: SecretKey,
}

impl ZoneKey {
    /// Build a signing identity from a raw secret key.
    pub fn new(secret: SecretKey) -> Self { ZoneKey { secret } }

    /// Sign `msg` (a Blake2b-256 digest of the answer section is taken
    /// first, since `secp256k1` signs 32-byte messages).
    pub fn sign(&self, msg: &[u8]) -> Vec<u8> {
        let mut hasher = Blake2bVar::new(32).expect("32 is a valid Blake2b output size");
        hasher.update(msg);
        let mut digest = [0u8; 32];
        hasher.finalize_variable(&mut digest).expect("output buffer matches requested size");

        let secp = Secp256k1::signing_only();
        let message = Message::from_slice(&digest).expect("digest is exactly 32 bytes");
        secp.sign_ecdsa(&message, &self.secret).serialize_compact().to_vec()
    }
}

/// Serializes the subset of a [`Response`] that gets signed: the answer
/// section's owner names and data, in order. Not a full wire-format
/// encoder, just a canonical byte stream stable enough to sign and verify
/// against.
fn answer_section_bytes(answers: &[Answer]) -> Vec<u8> {
    let mut out = Vec::new();
    for answer in answers {
        out.extend_from_slice(answer.name.as_bytes());
        out.extend_from_slice(&answer.ttl.to_be_bytes());
        out.extend_from_slice(format!("{:?}", answer.data).as_bytes());
    }
    out
}

/// Projects on-chain name state into DNS responses for the root zone and
/// every top-level name beneath it (spec.md §4.5). Not a recursor: queries
/// for names this server has no state for beyond NXDOMAIN + proof.
pub struct Resolver<'a, S: NameStore> {
    store: &'a S,
    root: &'a RootConfig,
    key: Option<&'a ZoneKey>,
    tree_root: [u8; 32],
}

impl<'a, S: NameStore> Resolver<'a, S> {
    /// Build a resolver bound to `store` (the authenticated name tree) and
    /// `root`'s apex configuration, committing to `tree_root` for any proof
    /// attached to this resolver's responses.
    pub fn new(store: &'a S, root: &'a RootConfig, tree_root: [u8; 32]) -> Self {
        Resolver { store, root, key: None, tree_root }
    }

    /// Attach a zone-signing key so DNSSEC-enabled queries are signed.
    pub fn with_key(mut self, key: &'a ZoneKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Answer one query. `edns` requests a name-proof be attached where
    /// applicable; `dnssec` additionally requests a zone-key signature.
    pub fn resolve(&self, question: &Question, edns: bool, dnssec: bool) -> Response {
        debug!("resolving {:?} type {:?} (edns={edns}, dnssec={dnssec})", question.name, question.qtype);
        let mut response = if question.name == "." || question.name.is_empty() {
            self.resolve_root(question)
        } else {
            self.resolve_name(question, edns)
        };

        if dnssec {
            if let Some(key) = self.key {
                response.signature = Some(key.sign(&answer_section_bytes(&response.answers)));
            }
        }
        response
    }

    fn resolve_root(&self, question: &Question) -> Response {
        let mut response = Response::new();
        match question.qtype {
            QType::Soa => response.answers.push(Answer { name: ".".into(), ttl: self.root.ttl, data: self.root.soa() }),
            QType::Ns | QType::Any => {
                for ns in &self.root.ns {
                    response.answers.push(Answer { name: ".".into(), ttl: self.root.ttl, data: RData::Ns(ns.clone()) });
                }
                if question.qtype == QType::Any {
                    response.answers.push(Answer { name: ".".into(), ttl: self.root.ttl, data: self.root.soa() });
                }
            }
            QType::A => {
                for ip in &self.root.root_ipv4 {
                    response.answers.push(Answer {
                        name: self.root.ns.first().cloned().unwrap_or_else(|| ".".into()),
                        ttl: self.root.ttl,
                        data: RData::A(*ip),
                    });
                }
            }
            QType::Aaaa => {
                for ip in &self.root.root_ipv6 {
                    response.answers.push(Answer {
                        name: self.root.ns.first().cloned().unwrap_or_else(|| ".".into()),
                        ttl: self.root.ttl,
                        data: RData::Aaaa(*ip),
                    });
                }
            }
            QType::DnsKey => response.answers.push(Answer {
                name: ".".into(),
                ttl: self.root.ttl,
                data: RData::DnsKey { flags: 257, protocol: 3, algorithm: 13, public_key: self.root.dnskey.clone() },
            }),
            _ => response.authority.push(Answer { name: ".".into(), ttl: self.root.ttl, data: self.root.soa() }),
        }
        response
    }

    fn resolve_name(&self, question: &Question, edns: bool) -> Response {
        let lowered = question.name.to_ascii_lowercase();
        let tld_label = lowered.rsplit('.').find(|s| !s.is_empty()).unwrap_or(&lowered);
        let name_hash = NameHash::of(tld_label);

        let state = self.store.get(name_hash);
        let Some(state) = state.filter(|s| !s.data.is_empty() && s.revoked == 0) else {
            debug!("no registered data for tld {:?}, answering NXDOMAIN", tld_label);
            let mut response = Response::new();
            response.rcode = Some(Rcode::NxDomain);
            response.authority.push(Answer { name: ".".into(), ttl: self.root.ttl, data: self.root.soa() });
            if edns {
                let proof = NameProof { name_hash, exists: false, nodes: self.proof_nodes(name_hash), data: None };
                response.additional.push(Answer {
                    name: tld_label.to_owned(),
                    ttl: 0,
                    data: RData::NameProof(proof),
                });
            }
            return response;
        };

        let resource = match Resource::decode(&state.data) {
            Ok(resource) => resource,
            Err(_) => {
                let mut response = Response::new();
                response.authority.push(Answer { name: ".".into(), ttl: self.root.ttl, data: self.root.soa() });
                return response;
            }
        };

        let ttl = if resource.ttl_secs == 0 { self.root.ttl } else { resource.ttl_secs };
        let is_subdomain = Name::parse(&lowered, Namespace::Dns)
            .map(|n| n.is_subdomain())
            .unwrap_or(false);

        let mut response = if is_subdomain && has_ns(&resource) {
            debug!("delegating {:?} below tld {:?}", question.name, tld_label);
            self.referral(&question.name, tld_label, &resource, ttl)
        } else {
            self.authoritative(question, &resource, ttl)
        };

        if edns {
            let proof = NameProof {
                name_hash,
                exists: true,
                nodes: self.proof_nodes(name_hash),
                data: Some(state.data.clone()),
            };
            response.additional.push(Answer { name: tld_label.to_owned(), ttl: 0, data: RData::NameProof(proof) });
        }
        response
    }

    /// Placeholder sibling path: the authenticated tree itself lives in the
    /// storage backend (spec.md §1 Non-goals); this resolver only knows the
    /// root it committed to when constructed.
    fn proof_nodes(&self, _name_hash: NameHash) -> Vec<ProofNode> { vec![self.tree_root] }

    fn referral(&self, query_name: &str, tld: &str, resource: &Resource, ttl: u32) -> Response {
        let mut response = Response::new();
        for record in &resource.records {
            match record {
                Record::Ns(Target::NameChain(n)) | Record::Ns(Target::NameDns(n)) => {
                    response.authority.push(Answer { name: tld.to_owned(), ttl, data: RData::Ns(n.clone()) });
                }
                Record::Ns(Target::Inet4(ip)) => {
                    let label = pointer_label(&ip.octets(), tld);
                    response.authority.push(Answer { name: tld.to_owned(), ttl, data: RData::Ns(label.clone()) });
                    response.additional.push(Answer { name: label, ttl, data: RData::A(*ip) });
                }
                Record::Ns(Target::Inet6(ip)) => {
                    let label = pointer_label(&ip.octets(), tld);
                    response.authority.push(Answer { name: tld.to_owned(), ttl, data: RData::Ns(label.clone()) });
                    response.additional.push(Answer { name: label, ttl, data: RData::Aaaa(*ip) });
                }
                Record::Ns(_) => {}
                Record::Ds { key_tag, algorithm, digest_type, digest } => {
                    response.authority.push(Answer {
                        name: tld.to_owned(),
                        ttl,
                        data: RData::Ds {
                            key_tag: *key_tag,
                            algorithm: *algorithm,
                            digest_type: *digest_type,
                            digest: digest.clone(),
                        },
                    });
                }
                _ => {}
            }
        }
        let _ = query_name;
        response
    }

    fn authoritative(&self, question: &Question, resource: &Resource, ttl: u32) -> Response {
        let mut response = Response::new();
        let name = question.name.clone();

        match question.qtype {
            QType::A => {
                for record in &resource.records {
                    if let Record::Inet4(ip) = record {
                        response.answers.push(Answer { name: name.clone(), ttl, data: RData::A(*ip) });
                    }
                }
                self.push_canonical_glue(resource, &name, ttl, &mut response);
            }
            QType::Aaaa => {
                for record in &resource.records {
                    if let Record::Inet6(ip) = record {
                        response.answers.push(Answer { name: name.clone(), ttl, data: RData::Aaaa(*ip) });
                    }
                }
                self.push_canonical_glue(resource, &name, ttl, &mut response);
            }
            QType::Cname => {
                for record in &resource.records {
                    if let Record::Canonical(target) = record {
                        if let Some(n) = target_name(target) {
                            response.answers.push(Answer { name: name.clone(), ttl, data: RData::Cname(n) });
                        }
                    }
                }
            }
            QType::Dname => {
                for record in &resource.records {
                    if let Record::Delegate(target) = record {
                        if let Some(n) = target_name(target) {
                            response.answers.push(Answer { name: name.clone(), ttl, data: RData::Dname(n) });
                        }
                    }
                }
            }
            QType::Mx => {
                for record in &resource.records {
                    if let Record::Service { service, target, priority, .. } = record {
                        if service == "smtp" {
                            if let Some(n) = target_name(target) {
                                response.answers.push(Answer {
                                    name: name.clone(),
                                    ttl,
                                    data: RData::Mx { preference: *priority, exchange: n },
                                });
                            }
                        }
                    }
                }
            }
            QType::Srv => {
                for record in &resource.records {
                    if let Record::Service { priority, weight, target, port, .. } = record {
                        if let Some(n) = target_name(target) {
                            response.answers.push(Answer {
                                name: name.clone(),
                                ttl,
                                data: RData::Srv { priority: *priority, weight: *weight, port: *port, target: n },
                            });
                        }
                    }
                }
            }
            QType::Txt => {
                let mut bucket = Vec::new();
                for record in &resource.records {
                    match record {
                        Record::Url(s) => bucket.push(format!("hsk:url {}", s)),
                        Record::Email(s) => bucket.push(format!("hsk:email {}", s)),
                        Record::Magnet(s) => bucket.push(format!("hsk:magnet {}", s)),
                        Record::Addr(s) => bucket.push(format!("hsk:addr {}", s)),
                        Record::Text(s) => bucket.push(s.clone()),
                        Record::Onion(id) => bucket.push(format!("hsk:tor {}", hex::encode(id))),
                        Record::OnionNG(id) => bucket.push(format!("hsk:tor {}", hex::encode(id))),
                        _ => {}
                    }
                }
                if !bucket.is_empty() {
                    response.answers.push(Answer { name: name.clone(), ttl, data: RData::Txt(bucket) });
                }
            }
            QType::Loc => {
                for record in &resource.records {
                    if let Record::Location { latitude, longitude, altitude, size, horiz_precision, vert_precision } = record {
                        response.answers.push(Answer {
                            name: name.clone(),
                            ttl,
                            data: RData::Loc {
                                latitude: *latitude,
                                longitude: *longitude,
                                altitude: *altitude,
                                size: *size,
                                horiz: *horiz_precision,
                                vert: *vert_precision,
                            },
                        });
                    }
                }
            }
            QType::Ds => {
                for record in &resource.records {
                    if let Record::Ds { key_tag, algorithm, digest_type, digest } = record {
                        response.answers.push(Answer {
                            name: name.clone(),
                            ttl,
                            data: RData::Ds {
                                key_tag: *key_tag,
                                algorithm: *algorithm,
                                digest_type: *digest_type,
                                digest: digest.clone(),
                            },
                        });
                    }
                }
            }
            QType::Tlsa => {
                for record in &resource.records {
                    if let Record::Tlsa { usage, selector, matching_type, data } = record {
                        response.answers.push(Answer {
                            name: name.clone(),
                            ttl,
                            data: RData::Tlsa {
                                usage: *usage,
                                selector: *selector,
                                matching_type: *matching_type,
                                data: data.clone(),
                            },
                        });
                    }
                }
            }
            QType::Sshfp => {
                for record in &resource.records {
                    if let Record::Sshfp { algorithm, fp_type, fingerprint } = record {
                        response.answers.push(Answer {
                            name: name.clone(),
                            ttl,
                            data: RData::Sshfp { algorithm: *algorithm, fp_type: *fp_type, fingerprint: fingerprint.clone() },
                        });
                    }
                }
            }
            QType::OpenPgpKey => {
                for record in &resource.records {
                    if let Record::OpenPgpKey(key) = record {
                        response.answers.push(Answer { name: name.clone(), ttl, data: RData::OpenPgpKey(key.clone()) });
                    }
                }
            }
            QType::Ns => {
                for record in &resource.records {
                    if let Record::Ns(target) = record {
                        if let Some(n) = target_name(target) {
                            response.answers.push(Answer { name: name.clone(), ttl, data: RData::Ns(n) });
                        }
                    }
                }
            }
            QType::Any => {
                response.answers.push(Answer { name: ".".into(), ttl, data: self.root.soa() });
                for ns in &self.root.ns {
                    response.answers.push(Answer { name: name.clone(), ttl, data: RData::Ns(ns.clone()) });
                }
                return response;
            }
            QType::Soa | QType::DnsKey | QType::NameProof => {}
        }

        if response.answers.is_empty() {
            response.authority.push(Answer { name: ".".into(), ttl: self.root.ttl, data: self.root.soa() });
        }
        response
    }

    fn push_canonical_glue(&self, resource: &Resource, name: &str, ttl: u32, response: &mut Response) {
        for record in &resource.records {
            if let Record::Canonical(target) = record {
                match target {
                    Target::Inet4(ip) => {
                        let label = pointer_label(&ip.octets(), name);
                        response.additional.push(Answer { name: label, ttl, data: RData::A(*ip) });
                    }
                    Target::Inet6(ip) => {
                        let label = pointer_label(&ip.octets(), name);
                        response.additional.push(Answer { name: label, ttl, data: RData::Aaaa(*ip) });
                    }
                    _ => {}
                }
            }
        }
    }
}

fn has_ns(resource: &Resource) -> bool { resource.records.iter().any(|r| matches!(r, Record::Ns(_))) }

fn target_name(target: &Target) -> Option<String> {
    match target {
        Target::NameChain(n) | Target::NameDns(n) => Some(n.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covenant::state::NameState;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemStore(HashMap<NameHash, NameState>);

    impl NameStore for MemStore {
        fn get(&self, name_hash: NameHash) -> Option<NameState> { self.0.get(&name_hash).cloned() }
        fn put(&mut self, state: NameState) { self.0.insert(state.name_hash, state); }
        fn remove(&mut self, name_hash: NameHash) { self.0.remove(&name_hash); }
    }

    fn outpoint() -> bitcoin::OutPoint {
        use bitcoin::hashes::Hash;
        bitcoin::OutPoint::new(bitcoin::Txid::all_zeros(), 0)
    }

    fn registered_state(name: &str, resource: &Resource) -> NameState {
        let mut state = NameState::opened(name, NameHash::of(name), 0, outpoint());
        state.registered = true;
        state.data = resource.encode().unwrap();
        state
    }

    #[test]
    fn nxdomain_for_unknown_name_carries_root_soa() {
        let store = MemStore::default();
        let root = RootConfig::test_defaults();
        let resolver = Resolver::new(&store, &root, [0u8; 32]);
        let question = Question { name: "nobody".into(), qtype: QType::A };
        let response = resolver.resolve(&question, false, false);
        assert_eq!(response.rcode, Some(Rcode::NxDomain));
        assert_eq!(response.authority.len(), 1);
    }

    #[test]
    fn authoritative_a_record_answers_directly() {
        let mut store = MemStore::default();
        let resource = Resource {
            compat: false,
            ttl_secs: 300,
            records: vec![Record::Inet4(Ipv4Addr::new(203, 0, 113, 9))],
        };
        store.put(registered_state("alice", &resource));

        let root = RootConfig::test_defaults();
        let resolver = Resolver::new(&store, &root, [0u8; 32]);
        let question = Question { name: "alice".into(), qtype: QType::A };
        let response = resolver.resolve(&question, false, false);
        assert_eq!(response.answers.len(), 1);
        assert_eq!(response.answers[0].data, RData::A(Ipv4Addr::new(203, 0, 113, 9)));
    }

    #[test]
    fn subdomain_with_ns_records_yields_referral() {
        let mut store = MemStore::default();
        let resource = Resource {
            compat: false,
            ttl_secs: 300,
            records: vec![Record::Ns(Target::Inet4(Ipv4Addr::new(198, 51, 100, 7)))],
        };
        store.put(registered_state("alice", &resource));

        let root = RootConfig::test_defaults();
        let resolver = Resolver::new(&store, &root, [0u8; 32]);
        let question = Question { name: "www.alice".into(), qtype: QType::A };
        let response = resolver.resolve(&question, false, false);
        assert!(response.answers.is_empty());
        assert_eq!(response.authority.len(), 1);
        assert_eq!(response.additional.len(), 1);
    }

    #[test]
    fn edns_query_attaches_name_proof() {
        let store = MemStore::default();
        let root = RootConfig::test_defaults();
        let resolver = Resolver::new(&store, &root, [7u8; 32]);
        let question = Question { name: "nobody".into(), qtype: QType::A };
        let response = resolver.resolve(&question, true, false);
        assert!(matches!(response.additional[0].data, RData::NameProof(ref p) if !p.exists));
    }
}
