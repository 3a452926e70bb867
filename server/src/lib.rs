//! # Halloween Demo Server
//!
//! Receiving end of the demo's point-to-point transport. The server
//! accepts TCP peers, decodes their unframed text messages (position
//! updates and shoot commands), and records them in a per-player session
//! registry.
//!
//! ## Architecture
//!
//! A single `select!` loop owns all mutable state. Accepted connections
//! are dispatched to independent sequential reader tasks which forward
//! decoded events over an mpsc channel back to that loop, so the
//! registry never needs a lock.
//!
//! There is deliberately no authoritative simulation here: no state
//! reconciliation, no broadcast back to clients, no hit resolution. The
//! server observes what clients report and nothing more.
//!
//! ## Module Organization
//!
//! - [`registry`]: player sessions keyed by stable connection id, with
//!   an explicit checked capacity.
//! - [`network`]: listener setup, accept-and-dispatch, per-connection
//!   reader tasks.

pub mod network;
pub mod registry;
