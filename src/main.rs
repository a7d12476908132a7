mod common;
mod config;
mod network;
mod session;

use std::error::Error;
use std::process::ExitCode;
use std::thread;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use env_logger::Env;
use network::ExchangeClient;
use session::{ChatSession, Profile, SessionReport};
use tokio::signal;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::RecvError;

use config::ClientSettings;

#[derive(Parser)]
#[command(
    name = "zmq_chat_client",
    version,
    about = "Scripted ZeroMQ chat client: login, list users, create channel, list channels"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Server endpoint, e.g. tcp://localhost:5556
    #[arg(long, value_name = "URI")]
    endpoint: Option<String>,
    /// User identifier sent with login
    #[arg(long)]
    user: Option<String>,
    /// Channel to create
    #[arg(long)]
    channel: Option<String>,
    /// Milliseconds to wait for each reply (0 waits forever)
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Run with the bot identity (bot123, channel bot-zone)
    Bot,
}

type SessionResult = Result<SessionReport, Box<dyn Error + Send + Sync>>;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let base = match cli.mode {
        Some(Mode::Bot) => Profile::bot(),
        None => Profile::client(),
    };
    let overrides = config::Overrides {
        endpoint: cli.endpoint,
        user: cli.user,
        channel: cli.channel,
        reply_timeout_ms: cli.timeout_ms,
    };
    let settings = config::resolve(config::load_config(&cli.config), overrides, base);

    // ZeroMQ calls block; a plain thread keeps a stalled exchange from
    // holding up runtime shutdown after Ctrl-C.
    let (result_tx, result_rx) = oneshot::channel::<SessionResult>();
    thread::spawn(move || {
        let _ = result_tx.send(run_session(settings));
    });

    tokio::select! {
        result = result_rx => exit_code(result),
        _ = signal::ctrl_c() => {
            log::info!("Received shutdown signal, abandoning session...");
            ExitCode::FAILURE
        }
    }
}

/// Logs the session outcome and maps it to the process exit code.
fn exit_code(result: Result<SessionResult, RecvError>) -> ExitCode {
    match result {
        Ok(Ok(report)) => {
            log::info!(
                "Session finished after {} exchanges",
                report.replies.len()
            );
            ExitCode::SUCCESS
        }
        Ok(Err(err)) => {
            log::error!("Session failed: {err}");
            ExitCode::FAILURE
        }
        Err(_) => {
            log::error!("Session thread exited without a result");
            ExitCode::FAILURE
        }
    }
}

fn run_session(settings: ClientSettings) -> SessionResult {
    let mut client = ExchangeClient::connect(&settings.endpoint, settings.reply_timeout)?;
    log::info!("Connecting to server at {}", client.endpoint());

    let report = ChatSession::new(&mut client, settings.profile).run()?;
    Ok(report)
}
