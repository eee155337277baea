//! Drafting and publishing commands: suggest, prepare, autopost, autoloop.

use crate::cli::AutoloopArgs;
use crate::ui;
use bino_agent::driver::OpenAiDriver;
use bino_agent::publish::{Publisher, ScriptPublisher};
use bino_agent::snapshot::{NoopRefresher, ScriptRefresher, SnapshotRefresher};
use bino_agent::PostPipeline;
use bino_memory::FactStore;
use bino_types::config::AgentConfig;
use rand::Rng;
use std::io::{BufRead, Write};
use std::time::Duration;

/// Build the pipeline from the environment, exiting on a startup error.
///
/// The scraper is taken from `BINO_SCRAPER_CMD` (whitespace-split; the
/// snapshot path is appended as the final argument). Without it, the
/// refresh step is a no-op and drafts run on whatever snapshot is on
/// disk.
fn build_pipeline() -> PostPipeline {
    let config = match AgentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            ui::error(&e.to_string());
            std::process::exit(1);
        }
    };
    let store = match FactStore::open(&config.db_path) {
        Ok(store) => store,
        Err(e) => {
            ui::error(&format!("Failed to open memory store: {e}"));
            std::process::exit(1);
        }
    };
    let generator = match OpenAiDriver::new(&config.api_key, &config.model) {
        Ok(driver) => driver,
        Err(e) => {
            ui::error(&e.to_string());
            std::process::exit(1);
        }
    };
    let refresher: Box<dyn SnapshotRefresher> = match std::env::var("BINO_SCRAPER_CMD") {
        Ok(cmd) if !cmd.trim().is_empty() => {
            let mut words = cmd.split_whitespace().map(str::to_string);
            let program = words.next().unwrap_or_default();
            Box::new(ScriptRefresher::new(
                program,
                words.collect(),
                config.snapshot_path.clone(),
            ))
        }
        _ => Box::new(NoopRefresher),
    };
    PostPipeline::new(config, store, refresher, Box::new(generator))
}

async fn draft_or_exit(
    pipeline: &PostPipeline,
    topic: Option<&str>,
    instructions: Option<&str>,
) -> String {
    match pipeline.draft_post(topic, instructions).await {
        Ok(text) => text,
        Err(e) => {
            ui::error(&format!("Draft failed: {e}"));
            std::process::exit(1);
        }
    }
}

pub async fn cmd_suggest(topic: Option<String>, instructions: Option<String>) {
    let pipeline = build_pipeline();
    let text = draft_or_exit(&pipeline, topic.as_deref(), instructions.as_deref()).await;
    println!("{text}");
}

pub async fn cmd_prepare(
    text: Option<String>,
    topic: Option<String>,
    instructions: Option<String>,
) {
    let final_text = match text {
        Some(text) => text,
        None => {
            println!("Generating draft post...");
            let pipeline = build_pipeline();
            draft_or_exit(&pipeline, topic.as_deref(), instructions.as_deref()).await
        }
    };
    println!("\nPost:\n\n{final_text}\n");

    ui::step("Manual posting steps:");
    println!("  1. Open x.com/compose/post in your browser.");
    println!("  2. Paste the post above.");
    println!("  3. Review and post.");
}

pub async fn cmd_autopost(
    topic: Option<String>,
    instructions: Option<String>,
    node_path: String,
    script: String,
    yes: bool,
) {
    let pipeline = build_pipeline();
    println!("Generating Bino's latest take...");
    let text = draft_or_exit(&pipeline, topic.as_deref(), instructions.as_deref()).await;
    println!("Post generated:\n\n{text}\n");

    if !yes && !confirm("Publish this automatically? (requires cookies setup)") {
        println!("Aborted.");
        return;
    }

    let publisher = ScriptPublisher::new(node_path, script);
    if let Err(e) = publisher.publish(&text).await {
        ui::error(&format!("Auto-post failed: {e}"));
        std::process::exit(1);
    }
    ui::success("Auto-post triggered successfully.");
}

pub async fn cmd_autoloop(args: AutoloopArgs) {
    if args.max_minutes < args.min_minutes {
        ui::error("max-minutes must be greater than or equal to min-minutes");
        std::process::exit(1);
    }

    let pipeline = build_pipeline();
    let publisher = ScriptPublisher::new(args.node_path.clone(), args.script.clone());
    let mut completed: u32 = 0;

    // Register the Ctrl+C handler once up front: a press mid-cycle is
    // latched and honored at the next cycle boundary, never mid-cycle.
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    println!("Starting auto-loop poster. Press Ctrl+C to stop.");
    loop {
        println!(
            "\n[{} UTC] Generating post #{}...",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
            completed + 1
        );
        // A failed cycle is logged and the loop continues; only a
        // successful cycle counts toward the budget.
        match run_cycle(&pipeline, &publisher, &args).await {
            Ok(text) => {
                println!("{text}");
                println!("Post published.");
                completed += 1;
                if let Some(cycles) = args.cycles {
                    if completed >= cycles {
                        println!("Completed requested number of cycles. Exiting.");
                        break;
                    }
                }
            }
            Err(e) => ui::error(&format!("Cycle failed: {e}")),
        }

        let minutes = rand::thread_rng().gen_range(args.min_minutes..=args.max_minutes);
        println!("Sleeping for {minutes:.2} minutes.");
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs_f64(minutes * 60.0)) => {}
            _ = shutdown_rx.changed() => {
                println!("\nAuto-loop interrupted.");
                break;
            }
        }
    }
}

async fn run_cycle(
    pipeline: &PostPipeline,
    publisher: &ScriptPublisher,
    args: &AutoloopArgs,
) -> bino_types::error::BinoResult<String> {
    let text = pipeline
        .draft_post(args.topic.as_deref(), args.instructions.as_deref())
        .await?;
    publisher.publish(&text).await?;
    Ok(text)
}

fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes" | "Yes")
}
