/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::ArgMatches;
use humanize_rs::bytes::Bytes;

/// Get a size argument, which may carry a unit like `64K` or `80KiB`.
pub(crate) fn get_usize(args: &ArgMatches, id: &str) -> anyhow::Result<Option<usize>> {
    let Some(s) = args.get_one::<String>(id) else {
        return Ok(None);
    };
    let v = s
        .parse::<Bytes>()
        .map_err(|e| anyhow!("invalid size value {s} for argument {id}: {e}"))?;
    Ok(Some(v.size()))
}

/// Read the whole input, from the file given as `id` or from stdin.
pub(crate) fn read_input(args: &ArgMatches, id: &str) -> anyhow::Result<Vec<u8>> {
    match args.get_one::<PathBuf>(id) {
        Some(p) if p.as_os_str() != "-" => {
            std::fs::read(p).context(format!("failed to read content from file {}", p.display()))
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("failed to read content from stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    fn cmd() -> Command {
        Command::new("test").arg(Arg::new("size").long("size").num_args(1))
    }

    #[test]
    fn size_units() {
        let args = cmd().get_matches_from(["test", "--size", "64K"]);
        assert_eq!(get_usize(&args, "size").unwrap(), Some(64000));

        let args = cmd().get_matches_from(["test", "--size", "2KiB"]);
        assert_eq!(get_usize(&args, "size").unwrap(), Some(2048));

        let args = cmd().get_matches_from(["test"]);
        assert_eq!(get_usize(&args, "size").unwrap(), None);

        let args = cmd().get_matches_from(["test", "--size", "lots"]);
        assert!(get_usize(&args, "size").is_err());
    }
}
