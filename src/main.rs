use std::process::ExitCode;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use summary_client::{Completion, Config, Status, SummaryRequestController, TerminalView};

const CONFIG_ERROR: u8 = 2;

/// Send a video or page URL to the summarization backend and print the summary.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// URL to summarize. Without it, every line read from stdin is submitted.
    url: Option<String>,

    /// Backend base URL (overrides SUMMARIZER_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Ignore responses that belong to a superseded submission
    #[arg(long)]
    discard_stale: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(CONFIG_ERROR);
        }
    };
    tracing::info!(endpoint = %config.endpoint, ordering = ?config.ordering, "configured");

    let controller = SummaryRequestController::from_config(TerminalView::new(), &config);

    match args.url {
        Some(url) => {
            controller.view().set_input(&url);
            ExitCode::from(exit_code(controller.submit_from_input().await))
        }
        None => run_interactive(&controller).await,
    }
}

fn load_config(args: &Args) -> summary_client::Result<Config> {
    Config::load()?.with_overrides(args.endpoint.as_deref(), args.discard_stale)
}

/// 0 when the summary was shown, 1 otherwise.
fn exit_code(completion: Completion) -> u8 {
    match completion.status() {
        Some(Status::Success) => 0,
        _ => 1,
    }
}

async fn run_interactive(controller: &SummaryRequestController<TerminalView>) -> ExitCode {
    println!("Paste a URL and press Enter (Ctrl-D to quit).");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                controller.view().set_input(&line);
                controller.submit_from_input().await;
            }
            Ok(None) => return ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
}
