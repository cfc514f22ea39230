/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

use crate::diagnostic::ErrorContext;
use crate::state::State;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpParseErrorClass {
    Grammar,
    Overflow,
    ResourceLimit,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum HttpParseErrorKind {
    #[error("invalid HTTP method")]
    InvalidMethod,
    #[error("invalid constant string")]
    InvalidConstant,
    #[error("invalid HTTP version")]
    InvalidVersion,
    #[error("invalid HTTP status code")]
    InvalidStatusCode,
    #[error("invalid character in url")]
    InvalidUrlChar,
    #[error("invalid character in header")]
    InvalidHeaderToken,
    #[error("header line without field separator")]
    InvalidHeaderField,
    #[error("LF expected")]
    LfExpected,
    #[error("invalid character in content-length header")]
    InvalidContentLength,
    #[error("content-length value too large")]
    ContentLengthOverflow,
    #[error("invalid character in chunk size")]
    InvalidChunkSize,
    #[error("chunk size value too large")]
    ChunkSizeOverflow,
    #[error("invalid delimiter after chunk data")]
    InvalidChunkData,
    #[error("possible buffer overflow (header size > {0})")]
    HeaderOverflow(usize),
    #[error("stream ended in the middle of a message")]
    UnexpectedEof,
    #[error("data received after connection close")]
    ExcessData,
    #[error("parser is dead after a previous error")]
    ParserDead,
}

impl HttpParseErrorKind {
    pub fn class(&self) -> HttpParseErrorClass {
        match self {
            HttpParseErrorKind::ContentLengthOverflow | HttpParseErrorKind::ChunkSizeOverflow => {
                HttpParseErrorClass::Overflow
            }
            HttpParseErrorKind::HeaderOverflow(_) => HttpParseErrorClass::ResourceLimit,
            _ => HttpParseErrorClass::Grammar,
        }
    }
}

/// A fatal parse error.
///
/// `offset` is relative to the slice passed to the failing `execute` call,
/// `stream_offset` to the first byte the parser has ever seen.
#[derive(Debug, Error)]
#[error("{kind} at stream offset {stream_offset} in state {state:?}")]
pub struct HttpParseError {
    kind: HttpParseErrorKind,
    state: State,
    offset: usize,
    stream_offset: u64,
    context: ErrorContext,
}

impl HttpParseError {
    pub(crate) fn new(
        kind: HttpParseErrorKind,
        state: State,
        data: &[u8],
        offset: usize,
        stream_offset: u64,
    ) -> Self {
        HttpParseError {
            kind,
            state,
            offset,
            stream_offset,
            context: ErrorContext::capture(data, offset),
        }
    }

    #[inline]
    pub fn kind(&self) -> HttpParseErrorKind {
        self.kind
    }

    #[inline]
    pub fn class(&self) -> HttpParseErrorClass {
        self.kind.class()
    }

    /// The state the parser was in when the bad byte was seen.
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn stream_offset(&self) -> u64 {
        self.stream_offset
    }

    #[inline]
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum UrlParseError {
    #[error("empty url")]
    Empty,
    #[error("invalid character at offset {0}")]
    InvalidChar(usize),
    #[error("CONNECT target should only contain host and port")]
    InvalidConnectTarget,
    #[error("url ends within host or port")]
    Incomplete,
    #[error("invalid port")]
    InvalidPort,
}
