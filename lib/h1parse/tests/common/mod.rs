/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

#![allow(dead_code)]

use std::mem;

use h1parse::{
    HandlerAction, HttpParseError, HttpParser, HttpParserHandler, MessageHead, ParserConfig,
    ParserMode,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    MessageBegin,
    Url(Vec<u8>),
    Status(u16),
    HeaderField(Vec<u8>),
    HeaderValue(Vec<u8>),
    HeadersComplete(MessageHead),
    Body(Vec<u8>),
    MessageComplete(MessageHead),
}

/// Records events, merging adjacent data events of the same kind.
#[derive(Default)]
pub struct EventRecorder {
    pub events: Vec<Event>,
    pub errors: usize,
    pub stop_at_headers_complete: bool,
    pub stop_at_message_begin: bool,
}

impl EventRecorder {
    fn push_data(&mut self, data: &[u8], make: fn(Vec<u8>) -> Event) {
        let new = make(data.to_vec());
        if let Some(last) = self.events.last_mut()
            && mem::discriminant(last) == mem::discriminant(&new)
            && let Event::Url(a) | Event::HeaderField(a) | Event::HeaderValue(a) | Event::Body(a) =
                last
        {
            a.extend_from_slice(data);
            return;
        }
        self.events.push(new);
    }

    pub fn bodies(&self) -> Vec<&[u8]> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Body(b) => Some(b.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn completed(&self) -> Vec<&MessageHead> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::MessageComplete(h) => Some(h),
                _ => None,
            })
            .collect()
    }
}

impl HttpParserHandler for EventRecorder {
    fn on_message_begin(&mut self) -> HandlerAction {
        self.events.push(Event::MessageBegin);
        if self.stop_at_message_begin {
            HandlerAction::Stop
        } else {
            HandlerAction::Continue
        }
    }

    fn on_url(&mut self, data: &[u8]) -> HandlerAction {
        self.push_data(data, Event::Url);
        HandlerAction::Continue
    }

    fn on_status_complete(&mut self, status_code: u16) -> HandlerAction {
        self.events.push(Event::Status(status_code));
        HandlerAction::Continue
    }

    fn on_header_field(&mut self, data: &[u8]) -> HandlerAction {
        self.push_data(data, Event::HeaderField);
        HandlerAction::Continue
    }

    fn on_header_value(&mut self, data: &[u8]) -> HandlerAction {
        self.push_data(data, Event::HeaderValue);
        HandlerAction::Continue
    }

    fn on_headers_complete(&mut self, head: &MessageHead) -> HandlerAction {
        self.events.push(Event::HeadersComplete(*head));
        if self.stop_at_headers_complete {
            HandlerAction::Stop
        } else {
            HandlerAction::Continue
        }
    }

    fn on_body(&mut self, data: &[u8]) -> HandlerAction {
        self.push_data(data, Event::Body);
        HandlerAction::Continue
    }

    fn on_message_complete(&mut self, head: &MessageHead) -> HandlerAction {
        self.events.push(Event::MessageComplete(*head));
        HandlerAction::Continue
    }

    fn on_error(&mut self, _err: &HttpParseError) {
        self.errors += 1;
    }
}

pub fn parse_all(mode: ParserMode, data: &[u8]) -> (HttpParser, EventRecorder) {
    parse_with_config(mode, ParserConfig::default(), data)
}

pub fn parse_with_config(
    mode: ParserMode,
    config: ParserConfig,
    data: &[u8],
) -> (HttpParser, EventRecorder) {
    let mut parser = HttpParser::with_config(mode, config);
    let mut recorder = EventRecorder::default();
    let n = parser.execute(&mut recorder, data).unwrap();
    assert_eq!(n, data.len());
    (parser, recorder)
}

pub fn strict_config() -> ParserConfig {
    let mut config = ParserConfig::default();
    config.set_strict(true);
    config
}
