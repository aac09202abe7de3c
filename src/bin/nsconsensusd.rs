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

//! Command-line entry point for `nsconsensus` (SPEC_FULL.md §11): a
//! top-level network selector plus subcommands, `clap::Parser`-derived,
//! logging initialized once via `env_logger`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use colored::Colorize;

use nsconsensus::config::{Config, NetworkName};
use nsconsensus::covenant::name::NameHash;
use nsconsensus::covenant::state::NameState;
use nsconsensus::covenant::validator::NameStore;
use nsconsensus::migrations::{MigrationState, Runner};
use nsconsensus::resolver::{QType, Question, Resolver};

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "nsconsensusd",
    bin_name = "nsconsensusd",
    author,
    version,
    about = "Name-auction consensus core: params, resolver and migration utilities"
)]
pub struct Opts {
    /// Network preset to run under.
    #[clap(short, long, default_value = "mainnet", env = "NSCONSENSUS_NETWORK")]
    pub network: String,

    /// Optional YAML configuration file, layered onto the network preset.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Command to execute.
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Print the effective consensus/policy parameters as YAML.
    Params,

    /// Resolve a (name, query type) against a fixture file of registered
    /// names (`name: <hex-encoded resource bytes>` YAML mapping).
    Resolve {
        /// Queried name (e.g. `alice` or `www.alice`).
        name: String,
        /// Query type: a, aaaa, ns, cname, dname, mx, srv, txt, loc, ds,
        /// tlsa, sshfp, openpgpkey, any.
        #[clap(default_value = "a")]
        qtype: String,
        /// Fixture file mapping registered names to hex-encoded resource
        /// bytes.
        #[clap(short, long)]
        fixture: PathBuf,
        /// Attach a name-existence proof to the response.
        #[clap(long)]
        edns: bool,
    },

    /// Check whether a database's migration state permits opening.
    Migrate {
        /// Highest migration id this binary knows about.
        #[clap(long)]
        latest: u64,
        /// The database's current `next_migration` id.
        #[clap(long)]
        next_migration: u64,
        /// `--migrate=<id>` flag an operator passed, if any.
        #[clap(long)]
        migrate: Option<u64>,
    },
}

struct FixtureStore(HashMap<NameHash, NameState>);

impl NameStore for FixtureStore {
    fn get(&self, name_hash: NameHash) -> Option<NameState> { self.0.get(&name_hash).cloned() }
    fn put(&mut self, state: NameState) { self.0.insert(state.name_hash, state); }
    fn remove(&mut self, name_hash: NameHash) { self.0.remove(&name_hash); }
}

fn load_fixture(path: &PathBuf) -> Result<FixtureStore, String> {
    use bitcoin::hashes::Hash;

    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let value: serde_yaml::Value = serde_yaml::from_str(&text).map_err(|e| e.to_string())?;
    let mapping = value.as_mapping().ok_or("fixture must be a YAML mapping")?;

    let mut store = HashMap::new();
    for (key, val) in mapping {
        let name = key.as_str().ok_or("fixture keys must be strings")?;
        let hex_data = val.as_str().ok_or("fixture values must be hex strings")?;
        let data = hex::decode(hex_data).map_err(|e| e.to_string())?;

        let owner = bitcoin::OutPoint::new(bitcoin::Txid::all_zeros(), 0);
        let mut state = NameState::opened(name, NameHash::of(name), 0, owner);
        state.registered = true;
        state.data = data;
        store.insert(state.name_hash, state);
    }
    Ok(FixtureStore(store))
}

fn parse_qtype(s: &str) -> Result<QType, String> {
    Ok(match s.to_ascii_lowercase().as_str() {
        "a" => QType::A,
        "aaaa" => QType::Aaaa,
        "ns" => QType::Ns,
        "cname" => QType::Cname,
        "dname" => QType::Dname,
        "mx" => QType::Mx,
        "srv" => QType::Srv,
        "txt" => QType::Txt,
        "loc" => QType::Loc,
        "ds" => QType::Ds,
        "tlsa" => QType::Tlsa,
        "sshfp" => QType::Sshfp,
        "openpgpkey" => QType::OpenPgpKey,
        "soa" => QType::Soa,
        "dnskey" => QType::DnsKey,
        "any" => QType::Any,
        other => return Err(format!("unrecognized query type {:?}", other)),
    })
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let network = NetworkName::from_str(&opts.network).map_err(|e| e.to_string())?;

    let config = match &opts.config {
        Some(path) => Config::load(path, Some(network)).map_err(|e| e.to_string())?,
        None => Config::defaults(network),
    };

    match opts.command {
        Command::Params => {
            println!("{}", "Consensus parameters:".bright_green());
            println!("tree_interval: {}", config.params.tree_interval);
            println!("bidding_period: {}", config.params.bidding_period);
            println!("reveal_period: {}", config.params.reveal_period);
            println!("transfer_lockup: {}", config.params.transfer_lockup);
            println!("auction_maturity: {}", config.params.auction_maturity);
            println!("renewal_window: {}", config.params.renewal_window);
            println!("max_block_weight: {}", config.params.max_block_weight);
            println!("max_block_opens: {}", config.params.max_block_opens);
        }

        Command::Resolve { name, qtype, fixture, edns } => {
            let store = load_fixture(&fixture)?;
            let qtype = parse_qtype(&qtype)?;
            let resolver = Resolver::new(&store, &config.root, [0u8; 32]);
            let response = resolver.resolve(&Question { name, qtype }, edns, false);
            println!("{}", "Response:".bright_green());
            println!("{:#?}", response);
        }

        Command::Migrate { latest, next_migration, migrate } => {
            let runner = Runner::new(latest);
            let state = MigrationState { next_migration, ..MigrationState::default() };
            match runner.check(&state, migrate) {
                Ok(()) => println!("{}", "database may open".bright_green()),
                Err(e) => {
                    eprintln!("{} {}", "refused:".bright_red(), e);
                    return Err(e.to_string());
                }
            }
        }
    }

    Ok(())
}
