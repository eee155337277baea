//! Bino CLI — draft, publish, and loop the persona posting agent.

mod cli;
mod cmd;
mod ui;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, MemoryCommands};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Memory(MemoryCommands::Add { key, value }) => cmd::memory::cmd_add(&key, &value),
        Commands::Memory(MemoryCommands::List { limit }) => cmd::memory::cmd_list(limit),
        Commands::Suggest {
            topic,
            instructions,
        } => cmd::post::cmd_suggest(topic, instructions).await,
        Commands::Prepare {
            text,
            topic,
            instructions,
        } => cmd::post::cmd_prepare(text, topic, instructions).await,
        Commands::Autopost {
            topic,
            instructions,
            node_path,
            script,
            yes,
        } => cmd::post::cmd_autopost(topic, instructions, node_path, script, yes).await,
        Commands::Autoloop(args) => cmd::post::cmd_autoloop(args).await,
        Commands::History { limit } => cmd::memory::cmd_history(limit),
        Commands::Completion { shell } => print_completions(shell),
    }
}
