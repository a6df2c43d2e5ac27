// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(clippy::all)]

//! Senet desktop client library

pub mod app;
pub mod config;
pub mod msg;
pub mod sound_manager;
pub mod surface;
pub mod worker;
