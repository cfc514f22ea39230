/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

pub const DEFAULT_MAX_HEADER_SIZE: usize = 80 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    strict: bool,
    max_header_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            strict: false,
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
        }
    }
}

impl ParserConfig {
    /// Strict mode additionally requires:
    ///
    /// - the full `HTTP/` literal in request and status lines
    /// - LF after every CR that ends a start, header or chunk size line
    /// - CR LF right after chunk data
    /// - no SP in header names
    /// - a colon in every header line
    /// - no `_` in host names
    /// - no bytes >= 0x80 in URLs
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    #[inline]
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Limit of the bytes in a start line plus headers, or in a chunk size
    /// line plus trailers.
    pub fn set_max_header_size(&mut self, size: usize) {
        self.max_header_size = size;
    }

    #[inline]
    pub fn max_header_size(&self) -> usize {
        self.max_header_size
    }
}
