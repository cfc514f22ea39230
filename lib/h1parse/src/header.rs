/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use crate::ParserFlags;
use crate::chars::SP;

const CONNECTION: &[u8] = b"CONNECTION";
const PROXY_CONNECTION: &[u8] = b"PROXY-CONNECTION";
const CONTENT_LENGTH: &[u8] = b"CONTENT-LENGTH";
const TRANSFER_ENCODING: &[u8] = b"TRANSFER-ENCODING";
const UPGRADE: &[u8] = b"UPGRADE";
const CHUNKED: &[u8] = b"CHUNKED";
const KEEP_ALIVE: &[u8] = b"KEEP-ALIVE";
const CLOSE: &[u8] = b"CLOSE";

/// Progress of recognising the header names and values that affect framing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderMatchState {
    #[default]
    General,
    C,
    Co,
    Con,
    MatchingConnection,
    MatchingProxyConnection,
    MatchingContentLength,
    MatchingTransferEncoding,
    MatchingUpgrade,
    Connection,
    ContentLength,
    TransferEncoding,
    Upgrade,
    MatchingTransferEncodingChunked,
    MatchingConnectionKeepAlive,
    MatchingConnectionClose,
    TransferEncodingChunked,
    ConnectionKeepAlive,
    ConnectionClose,
}

pub(crate) enum ValueStart {
    Plain,
    Upgrade,
    ContentLength(u8),
    InvalidContentLength,
}

pub(crate) enum ValueStep {
    Plain,
    ContentLengthDigit(u8),
    InvalidContentLength,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct HeaderMatcher {
    state: HeaderMatchState,
    index: usize,
}

impl HeaderMatcher {
    #[inline]
    pub(crate) fn state(&self) -> HeaderMatchState {
        self.state
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.state = HeaderMatchState::General;
        self.index = 0;
    }

    /// Step `index` and compare `c` with the literal at the new position.
    fn match_literal(&mut self, c: u8, lit: &[u8], done: HeaderMatchState) {
        self.index += 1;
        match lit.get(self.index) {
            Some(b) if *b == c => {
                if self.index == lit.len() - 1 {
                    self.state = done;
                }
            }
            _ => self.state = HeaderMatchState::General,
        }
    }

    /// `c` is the first byte of the name, already upper-cased.
    pub(crate) fn start_name(&mut self, c: u8) {
        self.index = 0;
        self.state = match c {
            b'C' => HeaderMatchState::C,
            b'P' => HeaderMatchState::MatchingProxyConnection,
            b'T' => HeaderMatchState::MatchingTransferEncoding,
            b'U' => HeaderMatchState::MatchingUpgrade,
            _ => HeaderMatchState::General,
        };
    }

    /// `c` is the upper-cased form of the raw name byte `ch`.
    pub(crate) fn feed_name(&mut self, ch: u8, c: u8) {
        match self.state {
            HeaderMatchState::General => {}
            HeaderMatchState::C => {
                self.index += 1;
                self.state = if c == b'O' {
                    HeaderMatchState::Co
                } else {
                    HeaderMatchState::General
                };
            }
            HeaderMatchState::Co => {
                self.index += 1;
                self.state = if c == b'N' {
                    HeaderMatchState::Con
                } else {
                    HeaderMatchState::General
                };
            }
            HeaderMatchState::Con => {
                self.index += 1;
                self.state = match c {
                    b'N' => HeaderMatchState::MatchingConnection,
                    b'T' => HeaderMatchState::MatchingContentLength,
                    _ => HeaderMatchState::General,
                };
            }
            HeaderMatchState::MatchingConnection => {
                self.match_literal(c, CONNECTION, HeaderMatchState::Connection)
            }
            HeaderMatchState::MatchingProxyConnection => {
                self.match_literal(c, PROXY_CONNECTION, HeaderMatchState::Connection)
            }
            HeaderMatchState::MatchingContentLength => {
                self.match_literal(c, CONTENT_LENGTH, HeaderMatchState::ContentLength)
            }
            HeaderMatchState::MatchingTransferEncoding => {
                self.match_literal(c, TRANSFER_ENCODING, HeaderMatchState::TransferEncoding)
            }
            HeaderMatchState::MatchingUpgrade => {
                self.match_literal(c, UPGRADE, HeaderMatchState::Upgrade)
            }
            HeaderMatchState::Connection
            | HeaderMatchState::ContentLength
            | HeaderMatchState::TransferEncoding
            | HeaderMatchState::Upgrade => {
                // only trailing spaces may follow a complete name
                if ch != SP {
                    self.state = HeaderMatchState::General;
                }
            }
            _ => self.state = HeaderMatchState::General,
        }
    }

    /// Handle the first non-blank byte of a value.
    pub(crate) fn start_value(&mut self, ch: u8) -> ValueStart {
        self.index = 0;
        let c = ch.to_ascii_uppercase();
        match self.state {
            HeaderMatchState::Upgrade => {
                self.state = HeaderMatchState::General;
                ValueStart::Upgrade
            }
            HeaderMatchState::TransferEncoding => {
                self.state = if c == b'C' {
                    HeaderMatchState::MatchingTransferEncodingChunked
                } else {
                    HeaderMatchState::General
                };
                ValueStart::Plain
            }
            HeaderMatchState::ContentLength => {
                if ch.is_ascii_digit() {
                    ValueStart::ContentLength(ch - b'0')
                } else {
                    ValueStart::InvalidContentLength
                }
            }
            HeaderMatchState::Connection => {
                self.state = match c {
                    b'K' => HeaderMatchState::MatchingConnectionKeepAlive,
                    b'C' => HeaderMatchState::MatchingConnectionClose,
                    _ => HeaderMatchState::General,
                };
                ValueStart::Plain
            }
            _ => {
                self.state = HeaderMatchState::General;
                ValueStart::Plain
            }
        }
    }

    pub(crate) fn feed_value(&mut self, ch: u8) -> ValueStep {
        let c = ch.to_ascii_uppercase();
        match self.state {
            HeaderMatchState::General => {}
            HeaderMatchState::ContentLength => {
                if ch == SP {
                    return ValueStep::Plain;
                }
                return if ch.is_ascii_digit() {
                    ValueStep::ContentLengthDigit(ch - b'0')
                } else {
                    ValueStep::InvalidContentLength
                };
            }
            HeaderMatchState::MatchingTransferEncodingChunked => {
                self.match_literal(c, CHUNKED, HeaderMatchState::TransferEncodingChunked)
            }
            HeaderMatchState::MatchingConnectionKeepAlive => {
                self.match_literal(c, KEEP_ALIVE, HeaderMatchState::ConnectionKeepAlive)
            }
            HeaderMatchState::MatchingConnectionClose => {
                self.match_literal(c, CLOSE, HeaderMatchState::ConnectionClose)
            }
            HeaderMatchState::TransferEncodingChunked
            | HeaderMatchState::ConnectionKeepAlive
            | HeaderMatchState::ConnectionClose => {
                if ch != SP {
                    self.state = HeaderMatchState::General;
                }
            }
            _ => self.state = HeaderMatchState::General,
        }
        ValueStep::Plain
    }

    /// Flags implied by the header line that just ended.
    pub(crate) fn finish_line(&self) -> ParserFlags {
        match self.state {
            HeaderMatchState::ConnectionKeepAlive => ParserFlags::CONNECTION_KEEP_ALIVE,
            HeaderMatchState::ConnectionClose => ParserFlags::CONNECTION_CLOSE,
            HeaderMatchState::TransferEncodingChunked => ParserFlags::CHUNKED,
            _ => ParserFlags::empty(),
        }
    }
}
