/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use log::Level;

pub const PARSER_LOG_TARGET: &str = "h1parse";
pub const PARSER_DEBUG_LOG_LEVEL: Level = Level::Debug;
pub const PARSER_TRACE_LOG_LEVEL: Level = Level::Trace;

macro_rules! log_debug {
    ($($arg:tt)+) => (
        log::log!(target: $crate::debug::PARSER_LOG_TARGET, $crate::debug::PARSER_DEBUG_LOG_LEVEL, $($arg)+)
    )
}

macro_rules! log_trace {
    ($($arg:tt)+) => (
        log::log!(target: $crate::debug::PARSER_LOG_TARGET, $crate::debug::PARSER_TRACE_LOG_LEVEL, $($arg)+)
    )
}

pub(crate) use log_debug;
pub(crate) use log_trace;
