/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use crate::{HttpMethod, HttpParseError, MessageKind, ParserFlags};

/// What the parser should do after a callback returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandlerAction {
    #[default]
    Continue,
    /// Return from `execute` after the current byte, the parser can be resumed.
    Stop,
    /// Only meaningful for `on_headers_complete`: the message has no body,
    /// as in the response to a HEAD request.
    SkipBody,
}

/// The message scalars known when headers are complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageHead {
    pub kind: MessageKind,
    pub method: Option<HttpMethod>,
    pub http_major: u16,
    pub http_minor: u16,
    pub status_code: u16,
    pub content_length: Option<u64>,
    pub flags: ParserFlags,
    pub upgrade: bool,
    pub keep_alive: bool,
}

/// Receiver of parse events.
///
/// Data callbacks get slices of the buffer passed to `execute`, a value split
/// across calls is delivered in several pieces.
#[allow(unused_variables)]
pub trait HttpParserHandler {
    fn on_message_begin(&mut self) -> HandlerAction {
        HandlerAction::Continue
    }

    fn on_url(&mut self, data: &[u8]) -> HandlerAction {
        HandlerAction::Continue
    }

    /// Called once the third status digit is read.
    fn on_status_complete(&mut self, status_code: u16) -> HandlerAction {
        HandlerAction::Continue
    }

    fn on_header_field(&mut self, data: &[u8]) -> HandlerAction {
        HandlerAction::Continue
    }

    fn on_header_value(&mut self, data: &[u8]) -> HandlerAction {
        HandlerAction::Continue
    }

    fn on_headers_complete(&mut self, head: &MessageHead) -> HandlerAction {
        HandlerAction::Continue
    }

    fn on_body(&mut self, data: &[u8]) -> HandlerAction {
        HandlerAction::Continue
    }

    fn on_message_complete(&mut self, head: &MessageHead) -> HandlerAction {
        HandlerAction::Continue
    }

    fn on_error(&mut self, err: &HttpParseError) {}
}

impl HttpParserHandler for () {}
