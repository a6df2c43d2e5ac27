// SPDX-License-Identifier: MIT OR Apache-2.0

//! Senet Network - event transport for the Senet client
//!
//! This crate provides:
//! - A line-delimited JSON transport over TCP
//! - An in-process loopback "server" for offline play
//!
//! Both hand the client a [`Connection`]: a stream of server events in and a
//! sink for client events out.

#![deny(unsafe_code)]

pub mod loopback;
pub mod transport;

pub use loopback::{demo_metrics, demo_snapshot, spawn_loopback, spawn_loopback_with};
pub use transport::{connect, spawn_over, Connection, TransportError};
