/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::mem;
use std::slice;

use indexmap::IndexMap;

use crate::{
    HandlerAction, HttpMethod, HttpParseError, HttpParser, HttpParserHandler, MessageHead,
    MessageKind, State, UrlFields, UrlParseError, parse_url,
};

/// How repeated header names are stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderValueType {
    /// Join repeated values with ", ".
    Strings,
    /// Every header is a list.
    Arrays,
    /// A single string until the name repeats, then a list.
    #[default]
    Mixed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderValue {
    pub fn iter(&self) -> slice::Iter<'_, String> {
        match self {
            HeaderValue::Single(s) => slice::from_ref(s).iter(),
            HeaderValue::Multiple(v) => v.iter(),
        }
    }

    pub fn first(&self) -> Option<&str> {
        self.iter().next().map(|s| s.as_str())
    }

    fn push(&mut self, value: String, value_type: HeaderValueType) {
        match self {
            HeaderValue::Single(s) => {
                if value_type == HeaderValueType::Strings {
                    s.push_str(", ");
                    s.push_str(&value);
                } else {
                    let first = mem::take(s);
                    *self = HeaderValue::Multiple(vec![first, value]);
                }
            }
            HeaderValue::Multiple(v) => v.push(value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpMessage {
    pub kind: MessageKind,
    pub method: Option<HttpMethod>,
    pub http_major: u16,
    pub http_minor: u16,
    pub status_code: u16,
    pub url: Vec<u8>,
    pub headers: IndexMap<String, HeaderValue>,
    pub trailers: IndexMap<String, HeaderValue>,
    pub body: Vec<u8>,
    pub keep_alive: bool,
    pub upgrade: bool,
}

impl HttpMessage {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn url_fields(&self) -> Result<UrlFields, UrlParseError> {
        parse_url(&self.url, self.method == Some(HttpMethod::Connect), false)
    }
}

/// A handler that assembles owned messages.
///
/// Header bytes are kept raw until the whole name and value have been seen,
/// so names and values split across `execute` calls are joined before decoding.
#[derive(Debug, Default)]
pub struct MessageCollector {
    value_type: HeaderValueType,
    head_response: bool,

    url: Vec<u8>,
    headers: IndexMap<String, HeaderValue>,
    trailers: IndexMap<String, HeaderValue>,
    body: Vec<u8>,
    field: Vec<u8>,
    value: Vec<u8>,
    in_value: bool,
    headers_done: bool,

    messages: Vec<HttpMessage>,
    upgrade_data: Vec<u8>,
}

impl MessageCollector {
    pub fn new(value_type: HeaderValueType) -> Self {
        MessageCollector {
            value_type,
            ..Default::default()
        }
    }

    pub fn set_header_value_type(&mut self, value_type: HeaderValueType) {
        self.value_type = value_type;
    }

    #[inline]
    pub fn header_value_type(&self) -> HeaderValueType {
        self.value_type
    }

    /// Treat responses as answers to HEAD requests, which never have a body.
    pub fn set_head_response(&mut self, head_response: bool) {
        self.head_response = head_response;
    }

    /// Run the parser over `data`, keeping the bytes after an upgrade.
    pub fn feed(&mut self, parser: &mut HttpParser, data: &[u8]) -> Result<usize, HttpParseError> {
        let nparsed = parser.execute(self, data)?;
        if parser.state() == State::Upgraded {
            self.upgrade_data.extend_from_slice(&data[nparsed..]);
        }
        Ok(nparsed)
    }

    pub fn take_messages(&mut self) -> Vec<HttpMessage> {
        mem::take(&mut self.messages)
    }

    #[inline]
    pub fn messages(&self) -> &[HttpMessage] {
        &self.messages
    }

    /// Bytes that followed an upgraded message.
    #[inline]
    pub fn upgrade_data(&self) -> &[u8] {
        &self.upgrade_data
    }

    pub fn take_upgrade_data(&mut self) -> Vec<u8> {
        mem::take(&mut self.upgrade_data)
    }

    fn commit_header(&mut self) {
        if self.field.is_empty() && !self.in_value {
            return;
        }
        let name = String::from_utf8_lossy(&self.field).trim_end().to_string();
        let value = String::from_utf8_lossy(&self.value).into_owned();
        self.field.clear();
        self.value.clear();
        self.in_value = false;

        let map = if self.headers_done {
            &mut self.trailers
        } else {
            &mut self.headers
        };
        match map.get_mut(&name) {
            Some(v) => v.push(value, self.value_type),
            None => {
                let v = match self.value_type {
                    HeaderValueType::Arrays => HeaderValue::Multiple(vec![value]),
                    _ => HeaderValue::Single(value),
                };
                map.insert(name, v);
            }
        }
    }
}

impl HttpParserHandler for MessageCollector {
    fn on_message_begin(&mut self) -> HandlerAction {
        self.url.clear();
        self.headers.clear();
        self.trailers.clear();
        self.body.clear();
        self.field.clear();
        self.value.clear();
        self.in_value = false;
        self.headers_done = false;
        HandlerAction::Continue
    }

    fn on_url(&mut self, data: &[u8]) -> HandlerAction {
        self.url.extend_from_slice(data);
        HandlerAction::Continue
    }

    fn on_header_field(&mut self, data: &[u8]) -> HandlerAction {
        if self.in_value {
            self.commit_header();
        }
        self.field.extend_from_slice(data);
        HandlerAction::Continue
    }

    fn on_header_value(&mut self, data: &[u8]) -> HandlerAction {
        self.value.extend_from_slice(data);
        self.in_value = true;
        HandlerAction::Continue
    }

    fn on_headers_complete(&mut self, head: &MessageHead) -> HandlerAction {
        self.commit_header();
        self.headers_done = true;
        if self.head_response && head.kind == MessageKind::Response {
            HandlerAction::SkipBody
        } else {
            HandlerAction::Continue
        }
    }

    fn on_body(&mut self, data: &[u8]) -> HandlerAction {
        self.body.extend_from_slice(data);
        HandlerAction::Continue
    }

    fn on_message_complete(&mut self, head: &MessageHead) -> HandlerAction {
        self.commit_header();
        self.messages.push(HttpMessage {
            kind: head.kind,
            method: head.method,
            http_major: head.http_major,
            http_minor: head.http_minor,
            status_code: head.status_code,
            url: mem::take(&mut self.url),
            headers: mem::take(&mut self.headers),
            trailers: mem::take(&mut self.trailers),
            body: mem::take(&mut self.body),
            keep_alive: head.keep_alive,
            upgrade: head.upgrade,
        });
        HandlerAction::Continue
    }
}
