// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-delimited JSON transport.

use senet_core::protocol::{self, ClientEvent, ServerEvent};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A live link to the game server.
///
/// `events` closes when the server goes away. Dropping `outbound` stops the
/// writer task.
pub struct Connection {
    pub events: mpsc::UnboundedReceiver<ServerEvent>,
    pub outbound: mpsc::UnboundedSender<ClientEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl Connection {
    pub(crate) fn new(
        events: mpsc::UnboundedReceiver<ServerEvent>,
        outbound: mpsc::UnboundedSender<ClientEvent>,
        tasks: Vec<JoinHandle<()>>,
    ) -> Self {
        Self {
            events,
            outbound,
            tasks,
        }
    }

    /// Queue an event for the server. Returns false once the link is down.
    pub fn send(&self, event: ClientEvent) -> bool {
        self.outbound.send(event).is_ok()
    }

    /// Stop the background tasks
    pub fn close(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

/// Connect to a server at `addr` (`host:port`)
pub async fn connect(addr: &str) -> Result<Connection, TransportError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| TransportError::Connect {
            addr: addr.to_string(),
            source,
        })?;
    stream.set_nodelay(true)?;
    info!(addr, "Connected to game server");

    let (reader, writer) = stream.into_split();
    Ok(spawn_over(reader, writer))
}

/// Run the transport over any byte stream pair
pub fn spawn_over<R, W>(reader: R, writer: W) -> Connection
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (out_tx, out_rx) = mpsc::unbounded_channel();

    let read_task = tokio::spawn(read_loop(reader, event_tx));
    let write_task = tokio::spawn(write_loop(writer, out_rx));

    Connection::new(event_rx, out_tx, vec![read_task, write_task])
}

async fn read_loop<R>(reader: R, events: mpsc::UnboundedSender<ServerEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match protocol::decode::<ServerEvent>(&line) {
                    Ok(event) => {
                        if events.send(event).is_err() {
                            debug!("Event receiver dropped, stopping reader");
                            return;
                        }
                    }
                    Err(e) => warn!(error = %e, "Skipping malformed frame"),
                }
            }
            Ok(None) => {
                info!("Game server closed the connection");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Read from game server failed");
                return;
            }
        }
    }
}

async fn write_loop<W>(mut writer: W, mut outbound: mpsc::UnboundedReceiver<ClientEvent>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(event) = outbound.recv().await {
        let mut line = match protocol::encode(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to encode client event");
                continue;
            }
        };
        line.push('\n');
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            warn!(error = %e, "Write to game server failed");
            return;
        }
        if let Err(e) = writer.flush().await {
            warn!(error = %e, "Flush to game server failed");
            return;
        }
    }
    debug!("Outbound channel closed, stopping writer");
}
