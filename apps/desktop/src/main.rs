use std::{io::Write, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{fetch_word_template, HttpGenerationGateway, WordTemplate};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod render;

use app::Frontend;
use commands::{parse_command, UiCommand};
use render::Renderer;

#[derive(Parser, Debug)]
#[command(about = "Compose a poem specification and send it for generation")]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    /// Use the built-in word control instead of fetching it from the server.
    #[arg(long)]
    offline: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let http = reqwest::Client::new();
    let template = if args.offline {
        WordTemplate::builtin()
    } else {
        match fetch_word_template(&http, &args.server_url).await {
            Ok(template) => template,
            Err(err) => {
                warn!(%err, "word template unavailable; using built-in control");
                WordTemplate::builtin()
            }
        }
    };
    let gateway = HttpGenerationGateway::with_client(http, &args.server_url)
        .with_context(|| format!("cannot use server url '{}'", args.server_url))?;
    info!(server_url = %gateway.server_url(), "composer ready");

    let (mut frontend, mut outcomes) = Frontend::new(Renderer::new(template), Arc::new(gateway));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("type 'help' for commands");
    prompt(&frontend)?;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(UiCommand::Quit)) => return Ok(()),
                    Ok(Some(command)) => {
                        if let Some(text) = frontend.handle(command) {
                            println!("{text}");
                        }
                    }
                    Ok(None) => {}
                    Err(err) => println!("{err}"),
                }
                prompt(&frontend)?;
            }
            Some(outcome) = outcomes.recv() => {
                println!("{}", frontend.show_outcome(&outcome));
                prompt(&frontend)?;
            }
        }
    }

    // Input closed; let requests already sent finish before exiting.
    while frontend.in_flight() > 0 {
        let Some(outcome) = outcomes.recv().await else {
            break;
        };
        println!("{}", frontend.show_outcome(&outcome));
    }
    Ok(())
}

fn prompt(frontend: &Frontend) -> Result<()> {
    print!("{}", frontend.prompt());
    std::io::stdout().flush().context("failed to flush stdout")
}
