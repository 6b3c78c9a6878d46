//! CLI domain: parse, route, and output for the strata binary.
//! No merge logic here; commands dispatch to the facade API.

use crate::api::{self, BuildOptions, Entity, GetOptions};
use crate::error::LoadError;
use crate::eval::FormatEvaluator;
use crate::resolve::FillOptions;
use crate::tree::EntityTree;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Strata CLI - layered configuration trees from filesystem fragments
#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Layered configuration trees built from filesystem fragments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Fragment root directory (repeatable; later roots override earlier)
    #[arg(long = "root", required = true)]
    pub roots: Vec<PathBuf>,

    /// Properties file evaluated into the build's property snapshot
    #[arg(long)]
    pub properties_file: Option<PathBuf>,

    /// Direct property as key=value (repeatable; wins over the properties
    /// file). Values are parsed as JSON, falling back to a plain string.
    #[arg(long = "set")]
    pub properties: Vec<String>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the merged entity tree as JSON
    Tree {
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Resolve a dotted coordinate and print the node (null when absent)
    Get {
        /// Coordinate such as "a.b.c"
        coordinate: String,
        /// Print the target-first ancestry chain instead of the node
        #[arg(long)]
        ancestry: bool,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Fill key=value defaults from a coordinate and print the result
    Fill {
        /// Coordinate such as "a.b.c"
        coordinate: String,
        /// Default entry as key=value (repeatable)
        #[arg(long = "default", required = true)]
        defaults: Vec<String>,
        /// Consult ancestor mappings for keys the target lacks
        #[arg(long)]
        ancestry: bool,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

/// Execution context: the tree is built once per invocation.
pub struct RunContext {
    tree: EntityTree,
}

impl RunContext {
    /// Build the entity tree from the CLI's roots and properties.
    pub fn new(cli: &Cli) -> Result<Self, LoadError> {
        let options = BuildOptions {
            properties: parse_pairs(&cli.properties),
            properties_file: cli.properties_file.clone(),
            ..BuildOptions::default()
        };
        let tree = api::build_entities(&cli.roots, &FormatEvaluator, &options)?;
        Ok(Self { tree })
    }

    /// Execute a command against the built tree, returning printable output.
    pub fn execute(&self, command: &Commands) -> String {
        match command {
            Commands::Tree { pretty } => render(&self.tree.to_json(), *pretty),
            Commands::Get {
                coordinate,
                ancestry,
                pretty,
            } => {
                let options = GetOptions {
                    ancestry: *ancestry,
                };
                let value = match api::get_entity(&self.tree, coordinate, &options) {
                    Some(Entity::Node(node)) => node.to_json(),
                    Some(Entity::Chain(chain)) => {
                        Value::Array(chain.iter().map(|n| n.to_json()).collect())
                    }
                    None => Value::Null,
                };
                render(&value, *pretty)
            }
            Commands::Fill {
                coordinate,
                defaults,
                ancestry,
                pretty,
            } => {
                let mut output = parse_pairs(defaults);
                let options = FillOptions {
                    ancestry: *ancestry,
                };
                api::fill(&self.tree, coordinate, &mut output, &options);
                let value = Value::Object(output.into_iter().collect());
                render(&value, *pretty)
            }
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    } else {
        value.to_string()
    }
}

/// Parse repeated key=value arguments. Values are tried as JSON first so
/// numbers, booleans, and structures come through typed; anything else is
/// kept as a raw string.
pub fn parse_pairs(pairs: &[String]) -> BTreeMap<String, Value> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let (key, raw) = match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v),
            None => (pair.clone(), ""),
        };
        let value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key, value);
    }
    map
}

/// Map a build error to a user-facing message with its cause chain.
pub fn map_error(err: &LoadError) -> String {
    let mut message = format!("error: {}", err);
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }
    message
}
