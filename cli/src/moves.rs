// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move requests typed at the terminal.

use anyhow::{anyhow, bail, Context, Result};
use senet_core::{Destination, MoveIntent};

/// Parse `FROM TO [y]`. `TO` may be `a` for the Anubis panel; a trailing
/// `y` answers the House of Waters prompt with yes.
pub fn parse_move_line(line: &str) -> Result<MoveIntent> {
    let mut parts = line.split_whitespace();

    let from = parts
        .next()
        .ok_or_else(|| anyhow!("expected FROM TO [y]"))?;
    let from: usize = from
        .parse()
        .with_context(|| format!("invalid house '{}'", from))?;

    let to = match parts.next() {
        Some("a") | Some("A") => Destination::Anubis,
        Some(to) => Destination::House(
            to.parse()
                .with_context(|| format!("invalid destination '{}'", to))?,
        ),
        None => bail!("missing destination"),
    };

    let flag = match parts.next() {
        None => false,
        Some("y") | Some("Y") => true,
        Some(other) => bail!("unexpected '{}', only 'y' may follow the destination", other),
    };

    if parts.next().is_some() {
        bail!("too many fields");
    }

    Ok(MoveIntent { from, to, flag })
}
