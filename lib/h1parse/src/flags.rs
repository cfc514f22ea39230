/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ParserFlags: u8 {
        const CHUNKED = 0x01;
        const CONNECTION_KEEP_ALIVE = 0x02;
        const CONNECTION_CLOSE = 0x04;
        /// Parsing the trailer section of a chunked message.
        const TRAILING = 0x08;
        const UPGRADE = 0x10;
        const SKIP_BODY = 0x20;
    }
}
