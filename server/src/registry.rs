//! Player session bookkeeping for the server
//!
//! Each accepted connection gets a stable numeric id mapped to its
//! session state. Capacity is bounded explicitly: adding a player beyond
//! the limit is a typed error, never a silent overwrite. The registry is
//! owned by the single server loop; nothing here is shared or locked.

use log::info;
use shared::game::CharacterType;
use shared::{Message, PlayerState};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("player registry is full (capacity {capacity})")]
    Full { capacity: usize },
}

/// One connected player's server-side session.
///
/// Tracks the network address for logging, the last state the client
/// reported, how many shoot commands it has sent, and when we last heard
/// from it.
#[derive(Debug)]
pub struct PlayerSession {
    pub id: u32,
    pub addr: SocketAddr,
    pub state: PlayerState,
    pub shots_fired: u32,
    pub last_seen: Instant,
}

impl PlayerSession {
    fn new(id: u32, addr: SocketAddr) -> Self {
        Self {
            id,
            addr,
            // The wire protocol carries no character selection, so the
            // server-side view defaults to Ghost.
            state: PlayerState::new(CharacterType::Ghost),
            shots_fired: 0,
            last_seen: Instant::now(),
        }
    }
}

/// All connected players, keyed by their stable connection id.
///
/// Ids are assigned in connection order starting from 1 and are never
/// reused within a process lifetime.
pub struct Registry {
    players: HashMap<u32, PlayerSession>,
    next_id: u32,
    capacity: usize,
}

impl Registry {
    pub fn new(capacity: usize) -> Self {
        Self {
            players: HashMap::new(),
            next_id: 1,
            capacity,
        }
    }

    /// Registers a newly accepted peer and returns its id, or a
    /// capacity error when the registry is full.
    pub fn add_player(&mut self, addr: SocketAddr) -> Result<u32, RegistryError> {
        if self.players.len() >= self.capacity {
            return Err(RegistryError::Full {
                capacity: self.capacity,
            });
        }

        let id = self.next_id;
        self.next_id += 1;

        info!("Player {} joined from {}", id, addr);
        self.players.insert(id, PlayerSession::new(id, addr));
        Ok(id)
    }

    /// Removes a player, returning true if it was present.
    pub fn remove_player(&mut self, id: u32) -> bool {
        if let Some(session) = self.players.remove(&id) {
            info!("Player {} ({}) left", session.id, session.addr);
            true
        } else {
            false
        }
    }

    /// Applies a decoded wire message to a player's session. Returns
    /// false if the id is unknown.
    pub fn apply_message(&mut self, id: u32, message: &Message) -> bool {
        let Some(session) = self.players.get_mut(&id) else {
            return false;
        };
        session.last_seen = Instant::now();

        match message {
            Message::Position {
                x,
                y,
                shots_received,
            } => {
                session.state.x = *x;
                session.state.y = *y;
                session.state.shots_received = *shots_received;
            }
            Message::Shoot => {
                session.shots_fired += 1;
                info!("Player {} fired (total {})", id, session.shots_fired);
            }
        }
        true
    }

    pub fn get(&self, id: u32) -> Option<&PlayerSession> {
        self.players.get(&id)
    }

    pub fn find_by_addr(&self, addr: SocketAddr) -> Option<u32> {
        self.players
            .iter()
            .find(|(_, session)| session.addr == addr)
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
