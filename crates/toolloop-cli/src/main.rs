//! toolloop terminal client
//!
//! Wires the OpenAI provider, the built-in tools and a session together and
//! reads requests from stdin, or runs the `--prompt` requests and exits.

mod cli;
mod repl;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toolloop_core::{AgentBuilder, LlmProvider, Session};
use toolloop_runtime::OpenAiProvider;
use toolloop_tools::{
    DEFAULT_SYSTEM_PROMPT, SeededNumberTable, fixture::DEFAULT_KEY_COUNT, registry_for,
};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so answers on stdout stay clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let provider = OpenAiProvider::from_env().context("cannot start without model credentials")?;
    let model = cli.model.clone().unwrap_or_else(|| provider.config().model.clone());
    tracing::info!(provider = provider.name(), %model, "Model configured");

    let table = Arc::new(SeededNumberTable::random(DEFAULT_KEY_COUNT));
    let tools = registry_for(cli.tools, table)?;

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let agent = AgentBuilder::new()
        .provider(Arc::new(provider))
        .tools(tools)
        .system_prompt(DEFAULT_SYSTEM_PROMPT)
        .model(model)
        .max_rounds(cli.max_rounds)
        .build()?;

    let mut session = Session::new(Arc::new(agent));
    tracing::info!(session = %session.id(), "Session started");

    let stdout = tokio::io::stdout();
    if cli.prompt.is_empty() {
        println!("Type a request, or 'exit' to quit.");
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        repl::run(&mut session, stdin, stdout).await?;
    } else {
        let summary = repl::run_prompts(&mut session, &cli.prompt, stdout).await?;
        if summary.failed > 0 {
            anyhow::bail!("{} of {} requests failed", summary.failed, cli.prompt.len());
        }
    }

    Ok(())
}
