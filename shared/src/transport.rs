//! Point-to-point byte-stream transport over TCP
//!
//! One side calls [`listen`] and accepts, the other calls [`connect`];
//! both end up holding a [`Connection`] that moves opaque byte buffers.
//! Every operation is a single socket call: `send` issues one write with
//! no partial-write loop, `receive` issues one read of up to `max_len`
//! bytes. A connection moves through `Connected -> Closed` and never
//! back; any operation after close fails with [`TransportError::Closed`].

use crate::MAX_PLAYERS;
use log::info;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpSocket, TcpStream};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: io::Error },
    #[error("failed to listen with backlog {backlog}: {source}")]
    Listen { backlog: u32, source: io::Error },
    #[error("failed to accept peer: {0}")]
    Accept(#[source] io::Error),
    #[error("failed to connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },
    #[error("send failed: {0}")]
    Send(#[source] io::Error),
    #[error("receive failed: {0}")]
    Receive(#[source] io::Error),
    #[error("connection is closed")]
    Closed,
}

/// What a caller should do when a transport operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Propagate the error and terminate.
    Fatal,
    /// Log the error and carry on.
    Report,
}

/// Named failure-handling policy consulted by the client and server loops.
///
/// Connection setup failures and per-message failures are handled
/// differently: by default setup is fatal while a failed send or receive
/// is reported and the loop continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicy {
    pub setup: FailureAction,
    pub message: FailureAction,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self {
            setup: FailureAction::Fatal,
            message: FailureAction::Report,
        }
    }
}

/// A bound and listening server socket.
pub struct Listener {
    inner: tokio::net::TcpListener,
}

/// Binds all interfaces on `port` and starts listening with a backlog of
/// [`MAX_PLAYERS`] pending peers.
///
/// Bind and listen are distinct steps so their failures stay
/// distinguishable. Must be called from within a tokio runtime.
pub fn listen(port: u16) -> Result<Listener, TransportError> {
    let socket = TcpSocket::new_v4().map_err(|source| TransportError::Bind { port, source })?;
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
    socket
        .bind(addr)
        .map_err(|source| TransportError::Bind { port, source })?;

    let backlog = MAX_PLAYERS as u32;
    let inner = socket
        .listen(backlog)
        .map_err(|source| TransportError::Listen { backlog, source })?;

    if let Ok(local) = inner.local_addr() {
        info!("Listening on {}", local);
    }
    Ok(Listener { inner })
}

impl Listener {
    /// Waits for the next inbound peer.
    pub async fn accept(&self) -> Result<Connection, TransportError> {
        let (stream, peer) = self.inner.accept().await.map_err(TransportError::Accept)?;
        info!("Accepted peer {}", peer);
        Ok(Connection {
            stream: Some(stream),
            peer,
        })
    }

    /// The locally bound address, useful when listening on port 0.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }
}

/// Connects to an IPv4 literal address. A single attempt, no retry.
pub async fn connect(address: &str, port: u16) -> Result<Connection, TransportError> {
    let ip = IpAddr::from_str(address).map_err(|e| TransportError::Connect {
        addr: format!("{}:{}", address, port),
        source: io::Error::new(io::ErrorKind::InvalidInput, e),
    })?;
    let addr = SocketAddr::new(ip, port);

    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| TransportError::Connect {
            addr: addr.to_string(),
            source,
        })?;

    info!("Connected to server at {}", addr);
    Ok(Connection {
        stream: Some(stream),
        peer: addr,
    })
}

/// One open point-to-point connection, owned by the caller that created it.
pub struct Connection {
    stream: Option<TcpStream>,
    peer: SocketAddr,
}

impl Connection {
    /// The resolved remote address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Writes the buffer with a single write call and returns the number
    /// of bytes the kernel reported. There is no partial-write loop;
    /// callers that care must compare the count against the buffer length.
    pub async fn send(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        let stream = self.stream.as_mut().ok_or(TransportError::Closed)?;
        stream.write(bytes).await.map_err(TransportError::Send)
    }

    /// Reads up to `max_len` bytes with a single read call. Returns an
    /// empty buffer on orderly peer shutdown; there is no delimiter, so
    /// the bytes returned may be fewer than the peer sent.
    pub async fn receive(&mut self, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let stream = self.stream.as_mut().ok_or(TransportError::Closed)?;
        let mut buf = vec![0u8; max_len];
        let n = stream.read(&mut buf).await.map_err(TransportError::Receive)?;
        buf.truncate(n);
        Ok(buf)
    }

    /// Releases the socket. A second close, like any other operation on a
    /// closed connection, fails with [`TransportError::Closed`].
    pub async fn close(&mut self) -> Result<(), TransportError> {
        match self.stream.take() {
            Some(mut stream) => {
                let _ = stream.shutdown().await;
                info!("Connection to {} closed", self.peer);
                Ok(())
            }
            None => Err(TransportError::Closed),
        }
    }
}
