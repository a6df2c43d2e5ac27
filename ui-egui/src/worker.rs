// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(clippy::all)]

//! Background worker with tokio runtime for networking.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use senet_core::ClientEvent;
use senet_network::{connect, spawn_loopback, Connection};
use std::thread;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::msg::{NetToUi, UiToNet};

/// What the worker talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Server(String),
    /// In-process demo game
    Loopback,
}

impl Endpoint {
    fn describe(&self) -> String {
        match self {
            Endpoint::Server(addr) => addr.clone(),
            Endpoint::Loopback => "offline".to_string(),
        }
    }
}

/// Spawn the background worker thread
pub fn spawn_worker(
    endpoint: Endpoint,
    net_rx: Receiver<UiToNet>,
    ui_tx: Sender<NetToUi>,
) -> anyhow::Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("senet-worker".to_string())
        .spawn(move || {
            if let Err(e) = run_worker(endpoint, net_rx, ui_tx) {
                tracing::error!("Worker thread error: {}", e);
            }
        })?;
    Ok(handle)
}

fn run_worker(endpoint: Endpoint, net_rx: Receiver<UiToNet>, ui_tx: Sender<NetToUi>) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    rt.block_on(async {
        let connection = match &endpoint {
            Endpoint::Server(addr) => match connect(addr).await {
                Ok(conn) => Some(conn),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not reach game server");
                    ui_tx.send(NetToUi::Error {
                        message: e.to_string(),
                    })?;
                    None
                }
            },
            Endpoint::Loopback => Some(spawn_loopback()),
        };

        if connection.is_some() {
            ui_tx.send(NetToUi::Connected {
                peer: endpoint.describe(),
            })?;
        }

        let mut worker = NetworkWorker { ui_tx, connection };
        worker.run(net_rx).await
    })
}

struct NetworkWorker {
    ui_tx: Sender<NetToUi>,
    connection: Option<Connection>,
}

impl NetworkWorker {
    async fn run(&mut self, net_rx: Receiver<UiToNet>) -> anyhow::Result<()> {
        loop {
            let connection = &mut self.connection;
            let inbound = async {
                match connection.as_mut() {
                    Some(conn) => Some(conn.events.recv().await),
                    None => std::future::pending().await,
                }
            };

            let polled = tokio::select! {
                event = inbound => event,
                _ = tokio::time::sleep(Duration::from_millis(10)) => None, // Regular processing tick
            };

            match polled {
                Some(Some(event)) => self.ui_tx.send(NetToUi::Event(event))?,
                Some(None) => {
                    tracing::info!("Game server went away");
                    self.connection = None;
                    self.ui_tx.send(NetToUi::Disconnected {
                        reason: "The game server closed the connection".to_string(),
                    })?;
                }
                None => {}
            }

            // Handle UI messages
            loop {
                match net_rx.try_recv() {
                    Ok(UiToNet::PieceMove(intent)) => self.send(ClientEvent::PieceMove(intent)),
                    Ok(UiToNet::Shutdown) => {
                        let _ = self.ui_tx.send(NetToUi::ShutdownAck);
                        self.close();
                        return Ok(());
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::debug!("UI channel closed, stopping worker");
                        self.close();
                        return Ok(());
                    }
                }
            }
        }
    }

    fn send(&self, event: ClientEvent) {
        match &self.connection {
            Some(conn) if conn.send(event) => {}
            _ => tracing::warn!("Dropping move request, not connected"),
        }
    }

    fn close(&mut self) {
        if let Some(conn) = self.connection.take() {
            conn.close();
        }
    }
}
