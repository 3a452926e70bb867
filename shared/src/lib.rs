pub mod game;
pub mod protocol;
pub mod transport;

/// TCP port the server binds and clients connect to by default.
pub const DEFAULT_PORT: u16 = 8080;

/// Maximum number of simultaneous players; also used as the listen backlog.
pub const MAX_PLAYERS: usize = 4;

/// Upper bound on a single wire message in bytes.
pub const MAX_MESSAGE_LEN: usize = 256;

pub use game::{Bullet, CharacterType, PlayerState};
pub use protocol::{Message, ProtocolError};
pub use transport::{connect, listen, Connection, FailureAction, FailurePolicy, TransportError};
