//! Client session over the point-to-point transport
//!
//! Owns exactly one connection for the lifetime of the game loop.
//! Sends are best-effort by default: a socket-level failure is reported
//! and the loop carries on, matching the failure policy in play. Using a
//! session after [`Session::close`] always surfaces
//! [`TransportError::Closed`] regardless of policy.

use log::{info, warn};
use shared::transport::{self, Connection, FailureAction, FailurePolicy, TransportError};
use shared::{Message, PlayerState};
use std::net::SocketAddr;

pub struct Session {
    conn: Connection,
    policy: FailurePolicy,
}

impl Session {
    /// Connects to the server. A setup failure propagates to the caller,
    /// which treats it according to `FailurePolicy::setup`.
    pub async fn connect(
        address: &str,
        port: u16,
        policy: FailurePolicy,
    ) -> Result<Self, TransportError> {
        let conn = transport::connect(address, port).await?;
        Ok(Session { conn, policy })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.conn.peer_addr()
    }

    /// Sends the player's current state as a position update.
    pub async fn send_position(&mut self, player: &PlayerState) -> Result<(), TransportError> {
        self.send_message(&player.position_message()).await
    }

    /// Sends a shoot command.
    pub async fn send_shoot(&mut self) -> Result<(), TransportError> {
        self.send_message(&Message::Shoot).await
    }

    async fn send_message(&mut self, message: &Message) -> Result<(), TransportError> {
        let bytes = message.encode();
        match self.conn.send(&bytes).await {
            Ok(written) => {
                if written != bytes.len() {
                    warn!("Short write: {} of {} bytes", written, bytes.len());
                }
                Ok(())
            }
            // A closed handle is a usage error, not a wire failure; it
            // always propagates.
            Err(TransportError::Closed) => Err(TransportError::Closed),
            Err(e) => match self.policy.message {
                FailureAction::Report => {
                    warn!("Send failed: {}", e);
                    Ok(())
                }
                FailureAction::Fatal => Err(e),
            },
        }
    }

    pub async fn close(&mut self) -> Result<(), TransportError> {
        info!("Closing session to {}", self.conn.peer_addr());
        self.conn.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::game::CharacterType;
    use shared::{MAX_MESSAGE_LEN, transport::listen};

    #[tokio::test]
    async fn test_position_update_arrives_as_text() {
        let listener = listen(0).unwrap();
        let port = listener.local_addr().unwrap().port();

        let accept = tokio::spawn(async move { listener.accept().await.unwrap() });
        let mut session = Session::connect("127.0.0.1", port, FailurePolicy::default())
            .await
            .unwrap();
        let mut server_side = accept.await.unwrap();

        let mut player = PlayerState::new(CharacterType::Witch);
        player.apply_movement(3, -2);
        session.send_position(&player).await.unwrap();

        let bytes = server_side.receive(MAX_MESSAGE_LEN).await.unwrap();
        assert_eq!(
            Message::parse(&bytes).unwrap(),
            Message::Position {
                x: player.x,
                y: player.y,
                shots_received: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_shoot_arrives_as_literal() {
        let listener = listen(0).unwrap();
        let port = listener.local_addr().unwrap().port();

        let accept = tokio::spawn(async move { listener.accept().await.unwrap() });
        let mut session = Session::connect("127.0.0.1", port, FailurePolicy::default())
            .await
            .unwrap();
        let mut server_side = accept.await.unwrap();

        session.send_shoot().await.unwrap();

        let bytes = server_side.receive(MAX_MESSAGE_LEN).await.unwrap();
        assert_eq!(bytes, b"shoot".to_vec());
    }

    #[tokio::test]
    async fn test_connect_failure_is_typed() {
        // Find a port nothing listens on.
        let port = {
            let listener = listen(0).unwrap();
            listener.local_addr().unwrap().port()
        };

        let result = Session::connect("127.0.0.1", port, FailurePolicy::default()).await;
        assert!(matches!(result, Err(TransportError::Connect { .. })));
    }

    #[tokio::test]
    async fn test_send_after_close_fails_even_with_report_policy() {
        let listener = listen(0).unwrap();
        let port = listener.local_addr().unwrap().port();

        let accept = tokio::spawn(async move { listener.accept().await.unwrap() });
        let mut session = Session::connect("127.0.0.1", port, FailurePolicy::default())
            .await
            .unwrap();
        let _server_side = accept.await.unwrap();

        session.close().await.unwrap();

        let player = PlayerState::new(CharacterType::Ghost);
        assert!(matches!(
            session.send_position(&player).await,
            Err(TransportError::Closed)
        ));
        assert!(matches!(session.close().await, Err(TransportError::Closed)));
    }
}
