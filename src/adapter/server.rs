//! TCP server for the remote adapter
//!
//! Accepts line-delimited JSON clients and routes their commands to the
//! game loop over channels. Core state never crosses into these tasks.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Mutex as StdMutex;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot, Mutex};

use crate::adapter::protocol::{
    extract_seq_best_effort, ClientMessage, CommandOp, QueryTarget, ServerMessage,
    PROTOCOL_VERSION,
};
use crate::adapter::runtime::{ClientCommand, InboundCommand, OutboundMessage};
use crate::types::CATALOG_LEN;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    pub max_pending_commands: usize,
    pub log_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7117,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_commands: 16,
            log_path: None,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let host = env::var("NERVE_SORT_HOST").unwrap_or(defaults.host);
        let port = env::var("NERVE_SORT_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let max_pending_commands = env::var("NERVE_SORT_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        let log_path = env::var("NERVE_SORT_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            host,
            port,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_commands,
            log_path,
        }
    }

    /// Check if the adapter is disabled via environment
    pub fn is_disabled() -> bool {
        std::env::var("NERVE_SORT_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| anyhow!("invalid socket address {}:{}", self.host, self.port))
    }
}

type Clients = Arc<Mutex<HashMap<usize, mpsc::UnboundedSender<String>>>>;
type ProtocolLog = Option<Arc<StdMutex<File>>>;

/// Run the adapter server until the listener or the game loop goes away.
///
/// `ready_tx`, when given, receives the bound address (used by tests that
/// bind port 0).
pub async fn run_server(
    config: ServerConfig,
    cmd_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> Result<()> {
    let listener = TcpListener::bind(config.socket_addr()?).await?;
    let local_addr = listener.local_addr()?;
    if let Some(tx) = ready_tx {
        let _ = tx.send(local_addr);
    }

    let log = open_log(&config);
    let clients: Clients = Arc::new(Mutex::new(HashMap::new()));

    // Outbound router: game loop replies -> client writer channels.
    {
        let clients = Arc::clone(&clients);
        let log = log.clone();
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let registry = clients.lock().await;
                match msg {
                    OutboundMessage::ToClient { client_id, line } => {
                        log_line(&log, "out", &line);
                        if let Some(tx) = registry.get(&client_id) {
                            let _ = tx.send(line);
                        }
                    }
                    OutboundMessage::Broadcast { line } => {
                        log_line(&log, "out", &line);
                        for tx in registry.values() {
                            let _ = tx.send(line.clone());
                        }
                    }
                }
            }
        });
    }

    let mut next_client_id: usize = 0;
    loop {
        let (stream, _addr) = listener.accept().await?;
        let client_id = next_client_id;
        next_client_id += 1;

        let (read_half, write_half) = stream.into_split();
        let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();
        clients.lock().await.insert(client_id, line_tx.clone());

        tokio::spawn(write_lines(write_half, line_rx));

        let cmd_tx = cmd_tx.clone();
        let clients = Arc::clone(&clients);
        let protocol_version = config.protocol_version.clone();
        let log = log.clone();
        tokio::spawn(async move {
            let _ = serve_client(
                read_half,
                client_id,
                cmd_tx,
                line_tx,
                protocol_version,
                log,
            )
            .await;
            clients.lock().await.remove(&client_id);
        });
    }
}

async fn write_lines(mut write_half: OwnedWriteHalf, mut line_rx: mpsc::UnboundedReceiver<String>) {
    while let Some(line) = line_rx.recv().await {
        if write_half.write_all(line.as_bytes()).await.is_err() {
            break;
        }
        if write_half.write_all(b"\n").await.is_err() {
            break;
        }
    }
}

async fn serve_client(
    read_half: OwnedReadHalf,
    client_id: usize,
    cmd_tx: mpsc::Sender<InboundCommand>,
    line_tx: mpsc::UnboundedSender<String>,
    protocol_version: String,
    log: ProtocolLog,
) -> Result<()> {
    let mut lines = BufReader::new(read_half).lines();
    let mut greeted = false;

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        log_line(&log, "in", trimmed);

        let parsed: ClientMessage = match serde_json::from_str(trimmed) {
            Ok(msg) => msg,
            Err(err) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                reply(
                    &line_tx,
                    &ServerMessage::Error {
                        seq,
                        code: "bad_message".to_string(),
                        message: err.to_string(),
                    },
                );
                continue;
            }
        };

        match parsed {
            ClientMessage::Hello { seq, .. } => {
                if greeted {
                    reply(
                        &line_tx,
                        &ServerMessage::Error {
                            seq,
                            code: "already_greeted".to_string(),
                            message: "hello may only be sent once".to_string(),
                        },
                    );
                } else {
                    greeted = true;
                    reply(
                        &line_tx,
                        &ServerMessage::Welcome {
                            protocol_version: protocol_version.clone(),
                            catalog_len: CATALOG_LEN,
                        },
                    );
                }
            }
            other if !greeted => {
                reply(
                    &line_tx,
                    &ServerMessage::Error {
                        seq: other.seq(),
                        code: "hello_required".to_string(),
                        message: "send hello before commands".to_string(),
                    },
                );
            }
            ClientMessage::Command { seq, op } => {
                let command = match op {
                    CommandOp::Start => ClientCommand::Start,
                    CommandOp::Select { muscle } => ClientCommand::Select(muscle),
                    CommandOp::Place { muscle, nerve } => ClientCommand::Place { muscle, nerve },
                };
                if deliver(&cmd_tx, client_id, seq, command, &line_tx)
                    .await
                    .is_err()
                {
                    break;
                }
            }
            ClientMessage::Query { seq, target } => {
                let command = match target {
                    QueryTarget::State => ClientCommand::QueryState,
                    QueryTarget::Score => ClientCommand::QueryScore,
                };
                if deliver(&cmd_tx, client_id, seq, command, &line_tx)
                    .await
                    .is_err()
                {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Forward a command to the game loop, reporting backpressure drops.
async fn deliver(
    cmd_tx: &mpsc::Sender<InboundCommand>,
    client_id: usize,
    seq: u64,
    command: ClientCommand,
    line_tx: &mpsc::UnboundedSender<String>,
) -> Result<(), ()> {
    let inbound = InboundCommand {
        client_id,
        seq,
        command,
    };
    match cmd_tx.try_send(inbound) {
        Ok(()) => Ok(()),
        Err(mpsc::error::TrySendError::Full(_)) => {
            reply(
                line_tx,
                &ServerMessage::Error {
                    seq,
                    code: "overloaded".to_string(),
                    message: "too many pending commands".to_string(),
                },
            );
            Ok(())
        }
        // Game loop is gone; drop the connection.
        Err(mpsc::error::TrySendError::Closed(_)) => Err(()),
    }
}

fn reply(line_tx: &mpsc::UnboundedSender<String>, msg: &ServerMessage) {
    if let Ok(line) = serde_json::to_string(msg) {
        let _ = line_tx.send(line);
    }
}

fn open_log(config: &ServerConfig) -> ProtocolLog {
    let path = config.log_path.as_ref()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()?;
    Some(Arc::new(StdMutex::new(file)))
}

fn log_line(log: &ProtocolLog, dir: &str, line: &str) {
    if let Some(log) = log {
        if let Ok(mut file) = log.lock() {
            let _ = writeln!(file, "{} {}", dir, line);
        }
    }
}
