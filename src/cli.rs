//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::request::GenerationRequest;

/// Top-level CLI parser for `perfgen`.
#[derive(Debug, Parser)]
#[command(name = "perfgen", version, about = "Generate gateway resources for load tests")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print generated `Host` resources.
    Hosts(HostArgs),
    /// Print generated `Mapping` resources.
    Mappings(MappingArgs),
    /// Wait for a range of URLs to reach an expected state.
    Wait(WaitArgs),
}

/// Identifier selection shared by both generators.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// How many resources to generate.
    #[arg(short, long, default_value_t = 0)]
    pub count: u64,
    /// Generate a single resource with this ID.
    #[arg(short, long, default_value_t = 0)]
    pub id: u64,
}

/// Arguments of the `Host` generator.
#[derive(Debug, Clone, Parser)]
#[command(name = "hosts", version, about = "Print generated Host resources")]
pub struct HostArgs {
    /// Identifier selection.
    #[command(flatten)]
    pub range: RangeArgs,
    /// Hostname to target in the Host definition.
    #[arg(long)]
    pub hostname: String,
    /// Namespace of the generated resources.
    #[arg(short, long, default_value = "default")]
    pub namespace: String,
}

impl HostArgs {
    /// The generation request these arguments describe.
    #[must_use]
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest {
            count: self.range.count,
            id: self.range.id,
            target: self.hostname.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

/// Arguments of the `Mapping` generator.
#[derive(Debug, Clone, Parser)]
#[command(name = "mappings", version, about = "Print generated Mapping resources")]
pub struct MappingArgs {
    /// Identifier selection.
    #[command(flatten)]
    pub range: RangeArgs,
    /// Service to target (e.g. echo-a, echo-b).
    #[arg(short, long, default_value = "void")]
    pub target: String,
    /// Namespace of the generated resources.
    #[arg(short, long, default_value = "default")]
    pub namespace: String,
}

impl MappingArgs {
    /// The generation request these arguments describe.
    #[must_use]
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest {
            count: self.range.count,
            id: self.range.id,
            target: self.target.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

/// Arguments of the URL waiter.
#[derive(Debug, Clone, Args)]
pub struct WaitArgs {
    /// URL or URL pattern; `@` is replaced by each index.
    #[arg(long, env = "PERFGEN_WAIT_URL")]
    pub url: String,
    /// First index of the pattern range.
    #[arg(long, default_value_t = 1)]
    pub start: u64,
    /// Last index of the pattern range (inclusive).
    #[arg(long, default_value_t = 1000)]
    pub end: u64,
    /// Accept only this HTTP status code.
    #[arg(long, default_value_t = 200)]
    pub wait_code: u16,
    /// Wait for any error instead: connection refused, 404, 503.
    #[arg(long)]
    pub wait_error: bool,
    /// Deadline for all URLs, in seconds.
    #[arg(long, env = "PERFGEN_WAIT_TIMEOUT", default_value_t = 300)]
    pub timeout: u64,
    /// Number of URLs probed concurrently.
    #[arg(
        long,
        env = "PERFGEN_WAIT_CONCURRENCY",
        default_value_t = 50,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub concurrency: u32,
    /// Message printed with the elapsed time.
    #[arg(long)]
    pub reason: Option<String>,
    /// Report every probe that does not meet the condition.
    #[arg(long)]
    pub verbose: bool,
}
