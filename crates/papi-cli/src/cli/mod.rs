//! CLI command definitions and dispatch for the `papi` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod catalog;
pub mod config;
pub mod init;
pub mod normalize;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use papi_types::rule::RuleKind;
use papi_types::rule_tree::RULE_FORMAT;

/// Build, normalize and inspect Property Manager rule trees.
#[derive(Parser)]
#[command(name = "papi", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a starter rule tree.
    Init {
        /// Origin hostname the edge fetches from.
        #[arg(long)]
        origin: String,

        /// CP code used for reporting and billing.
        #[arg(long)]
        cp_code: u64,

        /// Rule format stamped on the tree.
        #[arg(long, default_value = RULE_FORMAT)]
        rule_format: String,

        /// Mark the property as HTTPS-only (`is_secure`).
        #[arg(long)]
        secure: bool,

        /// Write the tree here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill catalog defaults into a rule-tree JSON file.
    Normalize {
        /// Rule-tree JSON file (a bare tree or a PAPI rules response).
        input: PathBuf,

        /// Write the result here instead of overwriting the input.
        #[arg(short, long, conflicts_with = "check")]
        output: Option<PathBuf>,

        /// Report what would change without writing; fails on unknown rules.
        #[arg(long)]
        check: bool,
    },

    /// List catalogued criteria and behaviors.
    Catalog {
        /// Only show one kind (criteria or behavior).
        #[arg(long)]
        kind: Option<RuleKind>,

        /// Show the defaults of a single rule.
        name: Option<String>,
    },

    /// Inspect deploy configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Load, validate and print the deploy configuration.
    Show {
        /// Config file (defaults to $PAPI_CONFIG, then ./papi.toml).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
