//! # Halloween Demo Client
//!
//! Headless client for the demo: a local player plus its single bullet,
//! a scripted input source standing in for the out-of-scope SDL layer,
//! and a session that sends one position update per tick (and a shoot
//! command when the wanderer fires) over the point-to-point transport.
//!
//! Sends happen inside the tick, so the remote view of this player is
//! never more than one tick interval stale.

pub mod game;
pub mod input;
pub mod network;
