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

//! Configuration loading (spec.md §9 Design Note 2 / SPEC_FULL.md §11):
//! [`NetworkParams`] and [`crate::resolver::RootConfig`] are immutable
//! records built once at startup from a YAML file, then overridden by CLI
//! flags. Nothing here holds a global singleton; callers own the resulting
//! `Config` and pass `&NetworkParams`/`&RootConfig` through every
//! consensus-critical call.
//!
//! Parsed by hand against a [`serde_yaml::Value`] rather than a derived
//! `Deserialize` impl, so the config loader does not pull the optional
//! `serde` feature into the default build, only the already-unconditional
//! `serde_yaml` dependency.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::Path;
use std::str::FromStr;

use crate::params::NetworkParams;
use crate::resolver::RootConfig;

/// Which parameter preset a node should run with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum NetworkName {
    Mainnet,
    Regtest,
}

impl FromStr for NetworkName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(NetworkName::Mainnet),
            "regtest" => Ok(NetworkName::Regtest),
            other => Err(ConfigError::Invalid(format!("unknown network {:?}", other))),
        }
    }
}

impl NetworkName {
    /// The [`NetworkParams`] preset this network name selects.
    pub fn params(self) -> NetworkParams {
        match self {
            NetworkName::Mainnet => NetworkParams::mainnet(),
            NetworkName::Regtest => NetworkParams::test_defaults(),
        }
    }
}

/// Configuration errors: a malformed file or an out-of-range value, never a
/// consensus failure; callers surface this before the chain starts.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum ConfigError {
    /// failed to parse configuration: {0}
    Parse(String),

    /// invalid configuration value: {0}
    Invalid(String),
}

/// A fully resolved node configuration: network parameters, root-zone
/// settings, and the handful of operational knobs the binary needs.
#[derive(Clone, Debug)]
pub struct Config {
    /// Selected network preset.
    pub network: NetworkName,
    /// Consensus/policy parameters in effect.
    pub params: NetworkParams,
    /// Root-zone resolver configuration.
    pub root: RootConfig,
    /// Directory the storage backend should use.
    pub data_dir: String,
    /// `log`/`env_logger` filter string (e.g. `"info"`, `"nsconsensus=debug"`).
    pub log_filter: String,
}

impl Config {
    /// The default configuration for `network`, before any file or CLI
    /// overrides are applied.
    pub fn defaults(network: NetworkName) -> Self {
        Config {
            network,
            params: network.params(),
            root: RootConfig::test_defaults(),
            data_dir: "./data".to_owned(),
            log_filter: "info".to_owned(),
        }
    }

    /// Load a configuration file and layer it onto [`Config::defaults`] for
    /// the network the file (or `network_override`) selects.
    pub fn load(path: &Path, network_override: Option<NetworkName>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("reading {}: {}", path.display(), e)))?;
        Self::parse(&text, network_override)
    }

    /// Parse a configuration document directly (used by [`Config::load`]
    /// and by tests that do not want to touch the filesystem).
    pub fn parse(text: &str, network_override: Option<NetworkName>) -> Result<Self, ConfigError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let network = match network_override {
            Some(n) => n,
            None => match value.get("network").and_then(|v| v.as_str()) {
                Some(s) => NetworkName::from_str(s)?,
                None => NetworkName::Mainnet,
            },
        };

        let mut config = Config::defaults(network);

        if let Some(dir) = value.get("data_dir").and_then(|v| v.as_str()) {
            config.data_dir = dir.to_owned();
        }
        if let Some(filter) = value.get("log_filter").and_then(|v| v.as_str()) {
            config.log_filter = filter.to_owned();
        }

        if let Some(root) = value.get("resolver") {
            if let Some(ns) = root.get("ns").and_then(|v| v.as_sequence()) {
                config.root.ns = ns.iter().filter_map(|v| v.as_str().map(str::to_owned)).collect();
            }
            if let Some(ipv4) = root.get("root_ipv4").and_then(|v| v.as_sequence()) {
                config.root.root_ipv4 = ipv4
                    .iter()
                    .filter_map(|v| v.as_str())
                    .filter_map(|s| Ipv4Addr::from_str(s).ok())
                    .collect();
            }
            if let Some(ipv6) = root.get("root_ipv6").and_then(|v| v.as_sequence()) {
                config.root.root_ipv6 = ipv6
                    .iter()
                    .filter_map(|v| v.as_str())
                    .filter_map(|s| Ipv6Addr::from_str(s).ok())
                    .collect();
            }
            if let Some(serial) = root.get("soa_serial").and_then(|v| v.as_u64()) {
                config.root.soa_serial = serial as u32;
            }
        }

        if let Some(caps) = value.get("caps") {
            if let Some(v) = caps.get("max_block_opens").and_then(|v| v.as_u64()) {
                config.params.max_block_opens = v as u32;
            }
            if let Some(v) = caps.get("max_block_updates").and_then(|v| v.as_u64()) {
                config.params.max_block_updates = v as u32;
            }
            if let Some(v) = caps.get("max_block_renewals").and_then(|v| v.as_u64()) {
                config.params.max_block_renewals = v as u32;
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_the_matching_preset() {
        let config = Config::defaults(NetworkName::Regtest);
        assert_eq!(config.params.tree_interval, NetworkParams::test_defaults().tree_interval);
    }

    #[test]
    fn parses_overrides_from_yaml() {
        let yaml = r#"
network: regtest
data_dir: /var/lib/nsconsensus
log_filter: debug
resolver:
  ns: ["ns1.example."]
  root_ipv4: ["127.0.0.1"]
  soa_serial: 42
caps:
  max_block_opens: 7
"#;
        let config = Config::parse(yaml, None).unwrap();
        assert_eq!(config.network, NetworkName::Regtest);
        assert_eq!(config.data_dir, "/var/lib/nsconsensus");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.root.ns, vec!["ns1.example.".to_owned()]);
        assert_eq!(config.root.soa_serial, 42);
        assert_eq!(config.params.max_block_opens, 7);
    }

    #[test]
    fn cli_network_override_wins_over_file() {
        let yaml = "network: mainnet\n";
        let config = Config::parse(yaml, Some(NetworkName::Regtest)).unwrap();
        assert_eq!(config.network, NetworkName::Regtest);
    }
}
