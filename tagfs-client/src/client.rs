//! The client capability driven by the launcher, plus the default terminal
//! session used by the `tagfs-client` binary.
//!
//! Storage, replication, peer discovery and time synchronization all live
//! behind [`Client::start`]; the launcher never looks past it.

use anyhow::{Context, Result};
use tokio::{
    io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader},
    runtime::Builder,
    select,
};
use tracing::{debug, info, warn};

use crate::config::ClientConfiguration;

/// A client session that blocks until it ends.
pub trait Client {
    fn start(&mut self) -> Result<()>;
}

/// Builds a [`Client`] from a validated configuration.
pub trait ClientFactory {
    type Client: Client;

    fn create(&self, config: ClientConfiguration) -> Result<Self::Client>;
}

/// Factory for the interactive terminal client.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliClientFactory;

impl ClientFactory for CliClientFactory {
    type Client = CliClient;

    fn create(&self, config: ClientConfiguration) -> Result<CliClient> {
        Ok(CliClient::new(config))
    }
}

/// Terminal session: runs until stdin closes, `quit` is entered or Ctrl-C.
#[derive(Debug)]
pub struct CliClient {
    config: ClientConfiguration,
}

impl CliClient {
    pub fn new(config: ClientConfiguration) -> Self {
        Self { config }
    }
}

impl Client for CliClient {
    fn start(&mut self) -> Result<()> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build client runtime")?;
        let result = runtime.block_on(run_session(&self.config));
        // A stdin read may still be parked on the blocking pool after Ctrl-C.
        runtime.shutdown_background();
        result
    }
}

async fn run_session(config: &ClientConfiguration) -> Result<()> {
    prepare_data_dir(config).await?;
    log_session(config);

    write_stdout(&format!("*** tagfs client ready at {}", config.address())).await?;

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut input = String::new();
    loop {
        input.clear();
        select! {
            bytes_read = stdin.read_line(&mut input) => {
                if !handle_stdin_input(bytes_read, &input).await? {
                    break;
                }
            }
            ctrl_c = tokio::signal::ctrl_c() => {
                handle_ctrl_c(ctrl_c);
                break;
            }
        }
    }

    info!("client session finished");
    Ok(())
}

async fn prepare_data_dir(config: &ClientConfiguration) -> Result<()> {
    let data_dir = config.data_dir();
    tokio::fs::create_dir_all(data_dir)
        .await
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
    debug!(data_dir = %data_dir.display(), "data directory ready");
    Ok(())
}

fn log_session(config: &ClientConfiguration) {
    info!(
        address = config.address(),
        data_dir = %config.data_dir().display(),
        capacity_bytes = config.capacity_bytes(),
        replication = config.replication(),
        "starting client session"
    );
    match config.time_server() {
        Some(server) => info!(time_server = server, "time synchronization configured"),
        None => info!("time synchronization disabled"),
    }
}

async fn handle_stdin_input(bytes_read: io::Result<usize>, input: &str) -> Result<bool> {
    if bytes_read? == 0 {
        debug!("stdin closed");
        return Ok(false);
    }

    let text = input.trim();
    if text.is_empty() {
        return Ok(true);
    }

    if text.eq_ignore_ascii_case("quit") {
        write_stdout("*** leaving session").await?;
        return Ok(false);
    }

    write_stdout(&format!("*** unsupported command: {text}")).await?;
    Ok(true)
}

fn handle_ctrl_c(result: io::Result<()>) {
    if let Err(error) = result {
        warn!(?error, "ctrl-c handler failed");
    }
}

async fn write_stdout(line: &str) -> io::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
