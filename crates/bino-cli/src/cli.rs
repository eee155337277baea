//! Clap CLI definitions for Bino.

use clap::{Parser, Subcommand};

pub const AFTER_HELP: &str = "\
\x1b[1;36mExamples:\x1b[0m
  bino memory add launch \"BNB Greenfield mainnet went live\"
  bino suggest --topic \"BNB ATH\"       Draft a post without publishing
  bino prepare                          Draft and print manual posting steps
  bino autopost                         Draft, confirm, and publish once
  bino autoloop --min-minutes 45 --max-minutes 90
  bino history --limit 5                Show recently drafted posts

\x1b[1;36mSetup:\x1b[0m
  Set OPENAI_API_KEY (a .env file next to the binary works).
  Data lives under ~/.bino/ unless BINO_DB_PATH / BINO_SNAPSHOT_PATH say otherwise.";

/// Bino — persona posting agent with persistent memory.
#[derive(Parser)]
#[command(
    name = "bino",
    version,
    about = "Bino \u{2014} persona posting agent with persistent memory",
    after_help = AFTER_HELP,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the agent memory bank (add, list) [*].
    #[command(subcommand)]
    Memory(MemoryCommands),
    /// Draft a post and print it (no publishing).
    Suggest {
        /// Topic or theme for the post.
        #[arg(long, short = 't')]
        topic: Option<String>,
        /// Additional guidance (tone, call-to-action, etc.).
        #[arg(long, short = 'i')]
        instructions: Option<String>,
    },
    /// Draft a post (or take one verbatim) and print manual posting steps.
    Prepare {
        /// Post content. If omitted, a draft is generated first.
        #[arg(long, short = 'x')]
        text: Option<String>,
        /// Topic for draft generation.
        #[arg(long, short = 't')]
        topic: Option<String>,
        /// Extra guidance when generating a draft.
        #[arg(long, short = 'i')]
        instructions: Option<String>,
    },
    /// Draft a post, confirm, and publish it via the automation script.
    Autopost {
        /// Topic for generating the post.
        #[arg(long, short = 't')]
        topic: Option<String>,
        /// Additional hints to guide the tone or content.
        #[arg(long, short = 'i')]
        instructions: Option<String>,
        /// Path to the Node.js binary.
        #[arg(long, default_value = "node")]
        node_path: String,
        /// Path to the publishing script.
        #[arg(long, default_value = "scripts/post_to_x.js")]
        script: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Draft and publish on a loop with a randomized delay between cycles.
    Autoloop(AutoloopArgs),
    /// List recently drafted posts.
    History {
        /// Number of stored posts to display.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Generate shell completion scripts.
    Completion {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum MemoryCommands {
    /// Store a memory entry.
    Add {
        /// Short label for the memory entry.
        key: String,
        /// Details to store.
        value: String,
    },
    /// List memory entries, oldest-first.
    List {
        /// Maximum number of entries to show (the most recent ones).
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(clap::Args)]
pub struct AutoloopArgs {
    /// Topic for generating each post.
    #[arg(long, short = 't')]
    pub topic: Option<String>,
    /// Guidance to apply for every post.
    #[arg(long, short = 'i')]
    pub instructions: Option<String>,
    /// Path to the Node.js binary.
    #[arg(long, default_value = "node")]
    pub node_path: String,
    /// Path to the publishing script.
    #[arg(long, default_value = "scripts/post_to_x.js")]
    pub script: String,
    /// Minimum minutes between posts.
    #[arg(long, default_value_t = 60.0)]
    pub min_minutes: f64,
    /// Maximum minutes between posts.
    #[arg(long, default_value_t = 60.0)]
    pub max_minutes: f64,
    /// Stop after N successful posts (default: run forever).
    #[arg(long)]
    pub cycles: Option<u32>,
}
