//! Server network layer: one accept-and-dispatch point over the TCP transport
//!
//! The loop in [`Server::run`] owns the player registry. Each accepted
//! connection is handed to an independent sequential reader task that
//! decodes wire messages and forwards them over an mpsc channel; the
//! loop applies them to the registry one at a time, so no state is ever
//! shared between tasks.

use crate::registry::{Registry, RegistryError};
use log::{debug, error, info, warn};
use shared::transport::{self, Connection, FailureAction, FailurePolicy, Listener, TransportError};
use shared::{Message, MAX_MESSAGE_LEN};
use std::io;
use std::net::SocketAddr;
use tokio::sync::mpsc;

/// Events forwarded from reader tasks to the main server loop.
#[derive(Debug)]
pub enum ServerEvent {
    MessageReceived { player_id: u32, message: Message },
    PeerDisconnected { player_id: u32 },
}

pub struct Server {
    listener: Listener,
    registry: Registry,
    policy: FailurePolicy,
    event_tx: mpsc::UnboundedSender<ServerEvent>,
    event_rx: mpsc::UnboundedReceiver<ServerEvent>,
}

impl Server {
    /// Binds the listener. Setup failures propagate to the caller, which
    /// treats them according to `FailurePolicy::setup`.
    pub fn new(port: u16, capacity: usize, policy: FailurePolicy) -> Result<Self, TransportError> {
        let listener = transport::listen(port)?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Ok(Server {
            listener,
            registry: Registry::new(capacity),
            policy,
            event_tx,
            event_rx,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Accepts peers and applies their messages until the process ends.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!(
            "Server started (capacity {} players)",
            self.registry.capacity()
        );

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok(conn) => self.admit_peer(conn),
                        Err(e) => match self.policy.message {
                            FailureAction::Report => warn!("Accept failed: {}", e),
                            FailureAction::Fatal => return Err(e),
                        },
                    }
                },

                event = self.event_rx.recv() => {
                    match event {
                        Some(event) => self.handle_event(event),
                        // Unreachable while we hold a sender, but a clean
                        // stop beats an unwrap.
                        None => break,
                    }
                },
            }
        }

        Ok(())
    }

    /// Registers an accepted peer and spawns its reader task, or closes
    /// the connection immediately when the registry is full.
    fn admit_peer(&mut self, mut conn: Connection) {
        match self.registry.add_player(conn.peer_addr()) {
            Ok(player_id) => {
                let event_tx = self.event_tx.clone();
                let policy = self.policy;
                tokio::spawn(async move {
                    read_loop(conn, player_id, policy, event_tx).await;
                });
            }
            Err(RegistryError::Full { capacity }) => {
                warn!(
                    "Rejecting peer {}: server full ({} players)",
                    conn.peer_addr(),
                    capacity
                );
                tokio::spawn(async move {
                    let _ = conn.close().await;
                });
            }
        }
    }

    fn handle_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::MessageReceived { player_id, message } => {
                debug!("Player {}: {:?}", player_id, message);
                if !self.registry.apply_message(player_id, &message) {
                    warn!("Dropping message for unknown player {}", player_id);
                }
            }
            ServerEvent::PeerDisconnected { player_id } => {
                self.registry.remove_player(player_id);
            }
        }
    }
}

/// Sequential reader for one connection: one receive at a time, decoded
/// and forwarded to the loop owning the registry.
///
/// Malformed text is reported and the connection continues; a receive
/// error ends the connection (reported or escalated per policy), and an
/// orderly peer shutdown removes the session.
async fn read_loop(
    mut conn: Connection,
    player_id: u32,
    policy: FailurePolicy,
    event_tx: mpsc::UnboundedSender<ServerEvent>,
) {
    loop {
        match conn.receive(MAX_MESSAGE_LEN).await {
            Ok(bytes) if bytes.is_empty() => {
                info!("Player {} disconnected", player_id);
                break;
            }
            Ok(bytes) => match Message::parse(&bytes) {
                Ok(message) => {
                    if event_tx
                        .send(ServerEvent::MessageReceived { player_id, message })
                        .is_err()
                    {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Player {}: dropping malformed message: {}", player_id, e);
                }
            },
            Err(e) => {
                match policy.message {
                    FailureAction::Report => warn!("Player {}: receive failed: {}", player_id, e),
                    FailureAction::Fatal => error!("Player {}: receive failed: {}", player_id, e),
                }
                break;
            }
        }
    }

    let _ = conn.close().await;
    let _ = event_tx.send(ServerEvent::PeerDisconnected { player_id });
}
