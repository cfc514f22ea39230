/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

#[cfg(test)]
#[macro_use]
mod macros;

mod config;
mod hash;

pub mod humanize;
pub mod key;
pub mod value;

pub use config::{as_parser_config, load_parser_config};
pub use hash::foreach_kv;
