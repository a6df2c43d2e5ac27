// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless helpers behind the `senet-cli` binary.

pub mod moves;
pub mod render;
