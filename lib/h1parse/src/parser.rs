/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use memchr::memchr2;

use crate::chars::{CR, HT, LF, SP, token, unhex};
use crate::debug::{log_debug, log_trace};
use crate::header::{HeaderMatchState, HeaderMatcher, ValueStart, ValueStep};
use crate::state::{DeadReason, State};
use crate::{
    HandlerAction, HttpMethod, HttpParseError, HttpParseErrorKind, HttpParserHandler,
    MessageHead, ParserConfig, ParserFlags, UrlState, parse_url_char,
};

const MAX_VERSION_PART: u16 = 999;
const MAX_STATUS_CODE: u16 = 999;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserMode {
    Request,
    Response,
    /// Decide from the first message, later messages must be of the same kind.
    Either,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Response,
}

/// Incremental HTTP/1.x parser for one connection.
#[derive(Clone, Debug)]
pub struct HttpParser {
    mode: ParserMode,
    config: ParserConfig,
    kind: Option<MessageKind>,
    state: State,
    header: HeaderMatcher,
    index: usize,
    flags: ParserFlags,
    nread: usize,
    content_length: Option<u64>,
    remaining: u64,
    http_major: u16,
    http_minor: u16,
    status_code: u16,
    method: Option<HttpMethod>,
    upgrade: bool,
    stream_position: u64,
}

impl HttpParser {
    pub fn new(mode: ParserMode) -> Self {
        HttpParser::with_config(mode, ParserConfig::default())
    }

    pub fn with_config(mode: ParserMode, config: ParserConfig) -> Self {
        let kind = match mode {
            ParserMode::Request => Some(MessageKind::Request),
            ParserMode::Response => Some(MessageKind::Response),
            ParserMode::Either => None,
        };
        HttpParser {
            mode,
            config,
            kind,
            state: HttpParser::initial_state(mode),
            header: HeaderMatcher::default(),
            index: 0,
            flags: ParserFlags::empty(),
            nread: 0,
            content_length: None,
            remaining: 0,
            http_major: 0,
            http_minor: 0,
            status_code: 0,
            method: None,
            upgrade: false,
            stream_position: 0,
        }
    }

    fn initial_state(mode: ParserMode) -> State {
        match mode {
            ParserMode::Request => State::StartReq,
            ParserMode::Response => State::StartRes,
            ParserMode::Either => State::StartReqOrRes,
        }
    }

    /// Forget everything, as if newly created for another connection.
    pub fn reset(&mut self) {
        *self = HttpParser::with_config(self.mode, self.config);
    }

    #[inline]
    pub fn mode(&self) -> ParserMode {
        self.mode
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The detected message kind, `None` before the first byte in `Either` mode.
    #[inline]
    pub fn kind(&self) -> Option<MessageKind> {
        self.kind
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Recognition progress of the header line being parsed.
    #[inline]
    pub fn header_state(&self) -> HeaderMatchState {
        self.header.state()
    }

    #[inline]
    pub fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    #[inline]
    pub fn http_major(&self) -> u16 {
        self.http_major
    }

    #[inline]
    pub fn http_minor(&self) -> u16 {
        self.http_minor
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The declared Content-Length of the current message.
    #[inline]
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    #[inline]
    pub fn flags(&self) -> ParserFlags {
        self.flags
    }

    #[inline]
    pub fn is_upgrade(&self) -> bool {
        self.upgrade
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self.state, State::Dead(_))
    }

    /// Bytes consumed since creation or the last reset.
    #[inline]
    pub fn stream_position(&self) -> u64 {
        self.stream_position
    }

    /// Whether the end of the message can only be known from connection close.
    pub fn needs_eof(&self) -> bool {
        if self.kind == Some(MessageKind::Request) {
            return false;
        }
        // RFC 2616 section 4.4
        if self.status_code / 100 == 1
            || self.status_code == 204
            || self.status_code == 304
            || self.flags.contains(ParserFlags::SKIP_BODY)
        {
            return false;
        }
        if self.flags.contains(ParserFlags::CHUNKED) || self.content_length.is_some() {
            return false;
        }
        true
    }

    pub fn should_keep_alive(&self) -> bool {
        let keep_alive = if (self.http_major, self.http_minor) >= (1, 1) {
            !self.flags.contains(ParserFlags::CONNECTION_CLOSE)
        } else {
            self.flags.contains(ParserFlags::CONNECTION_KEEP_ALIVE)
        };
        keep_alive && !self.needs_eof()
    }

    fn head(&self) -> MessageHead {
        MessageHead {
            kind: self.kind.unwrap_or(MessageKind::Request),
            method: self.method,
            http_major: self.http_major,
            http_minor: self.http_minor,
            status_code: self.status_code,
            content_length: self.content_length,
            flags: self.flags,
            upgrade: self.upgrade,
            keep_alive: self.should_keep_alive(),
        }
    }

    fn start_state(&self) -> State {
        match self.kind {
            Some(MessageKind::Request) => State::StartReq,
            Some(MessageKind::Response) => State::StartRes,
            None => State::StartReqOrRes,
        }
    }

    fn begin_message(&mut self) {
        self.flags = ParserFlags::empty();
        self.content_length = None;
        self.remaining = 0;
        self.http_major = 0;
        self.http_minor = 0;
        self.status_code = 0;
        self.method = None;
        self.upgrade = false;
        self.index = 0;
        self.header.reset();
    }

    fn complete_message<H>(&mut self, handler: &mut H) -> HandlerAction
    where
        H: HttpParserHandler + ?Sized,
    {
        let head = self.head();
        self.state = if head.keep_alive {
            self.start_state()
        } else {
            State::Dead(DeadReason::Closed)
        };
        self.nread = 0;
        log_trace!("message complete, keep-alive: {}", head.keep_alive);
        handler.on_message_complete(&head)
    }

    fn fail<H>(
        &mut self,
        handler: &mut H,
        kind: HttpParseErrorKind,
        data: &[u8],
        offset: usize,
    ) -> HttpParseError
    where
        H: HttpParserHandler + ?Sized,
    {
        let err = HttpParseError::new(
            kind,
            self.state,
            data,
            offset,
            self.stream_position + offset as u64,
        );
        log_debug!("{err}\n{}", err.context());
        handler.on_error(&err);
        self.state = State::Dead(DeadReason::Failed);
        err
    }

    /// Signal end of stream, same as calling `execute` with an empty slice.
    pub fn finish<H>(&mut self, handler: &mut H) -> Result<usize, HttpParseError>
    where
        H: HttpParserHandler + ?Sized,
    {
        match self.state {
            State::BodyIdentityEof => {
                self.complete_message(handler);
                Ok(0)
            }
            s if s.is_start() => Ok(0),
            State::Dead(_) | State::Upgraded => Ok(0),
            _ => Err(self.fail(handler, HttpParseErrorKind::UnexpectedEof, &[], 0)),
        }
    }

    /// Feed the next piece of the stream.
    ///
    /// Returns the number of bytes consumed. It is less than `data.len()` only
    /// if a callback asked to stop, or if the connection has been upgraded, in
    /// which case the remaining bytes belong to the new protocol.
    pub fn execute<H>(&mut self, handler: &mut H, data: &[u8]) -> Result<usize, HttpParseError>
    where
        H: HttpParserHandler + ?Sized,
    {
        if data.is_empty() {
            return self.finish(handler);
        }
        match self.state {
            State::Upgraded => return Ok(0),
            State::Dead(DeadReason::Failed) => {
                return Err(self.fail(handler, HttpParseErrorKind::ParserDead, data, 0));
            }
            _ => {}
        }

        let strict = self.config.strict();
        let max_header_size = self.config.max_header_size();

        let mut header_field_mark = (self.state == State::HeaderField).then_some(0);
        let mut header_value_mark = (self.state == State::HeaderValue).then_some(0);
        let mut url_mark = matches!(self.state, State::Url(_)).then_some(0);

        let len = data.len();
        let mut pos = 0usize;
        let mut p = 0usize;
        let mut ch = 0u8;
        let mut reexecute = false;
        let mut stop = false;

        macro_rules! fail {
            ($kind:expr) => {
                return Err(self.fail(handler, $kind, data, p))
            };
        }

        macro_rules! callback {
            ($call:expr) => {
                if $call == HandlerAction::Stop {
                    stop = true;
                }
            };
        }

        macro_rules! emit {
            ($mark:ident, $cb:ident) => {
                if let Some(m) = $mark.take() {
                    callback!(handler.$cb(&data[m..p]));
                }
            };
        }

        macro_rules! flush {
            ($end:expr) => {
                for (mark, field) in [
                    (header_field_mark, 0u8),
                    (header_value_mark, 1),
                    (url_mark, 2),
                ] {
                    let Some(m) = mark else {
                        continue;
                    };
                    if m >= $end {
                        continue;
                    }
                    let piece = &data[m..$end];
                    // the call ends here, nothing is left to stop
                    let _ = match field {
                        0 => handler.on_header_field(piece),
                        1 => handler.on_header_value(piece),
                        _ => handler.on_url(piece),
                    };
                }
            };
        }

        while pos < len || reexecute {
            if !reexecute {
                p = pos;
                ch = data[p];
                pos += 1;

                if self.state.is_header_state() {
                    self.nread += 1;
                    if self.nread > max_header_size {
                        fail!(HttpParseErrorKind::HeaderOverflow(max_header_size));
                    }
                }
            }
            reexecute = false;

            match self.state {
                State::Dead(DeadReason::Closed) => {
                    if ch != CR && ch != LF {
                        fail!(HttpParseErrorKind::ExcessData);
                    }
                }
                State::Dead(DeadReason::Failed) => fail!(HttpParseErrorKind::ParserDead),
                State::Upgraded => {
                    // unreachable as execute returns right after the upgrade
                    pos = p;
                    break;
                }

                State::StartReqOrRes => {
                    if ch == CR || ch == LF {
                        continue;
                    }
                    self.begin_message();
                    if ch == b'H' {
                        self.state = State::ResOrRespH;
                    } else {
                        self.kind = Some(MessageKind::Request);
                        let Some(method) = HttpMethod::from_first_byte(ch) else {
                            fail!(HttpParseErrorKind::InvalidMethod);
                        };
                        self.method = Some(method);
                        self.index = 1;
                        self.state = State::ReqMethod;
                    }
                    log_trace!("message begin");
                    callback!(handler.on_message_begin());
                }
                State::ResOrRespH => {
                    if ch == b'T' {
                        self.kind = Some(MessageKind::Response);
                        self.state = State::ResHT;
                    } else {
                        // some method starting with 'H', the byte is checked as a method byte
                        self.kind = Some(MessageKind::Request);
                        self.method = Some(HttpMethod::Head);
                        self.index = 1;
                        self.state = State::ReqMethod;
                        reexecute = true;
                    }
                }

                State::StartRes => match ch {
                    CR | LF => {}
                    b'H' => {
                        self.begin_message();
                        self.state = State::ResH;
                        log_trace!("message begin");
                        callback!(handler.on_message_begin());
                    }
                    _ => fail!(HttpParseErrorKind::InvalidConstant),
                },
                State::ResH => {
                    if strict && ch != b'T' {
                        fail!(HttpParseErrorKind::InvalidConstant);
                    }
                    self.state = State::ResHT;
                }
                State::ResHT => {
                    if strict && ch != b'T' {
                        fail!(HttpParseErrorKind::InvalidConstant);
                    }
                    self.state = State::ResHTT;
                }
                State::ResHTT => {
                    if strict && ch != b'P' {
                        fail!(HttpParseErrorKind::InvalidConstant);
                    }
                    self.state = State::ResHTTP;
                }
                State::ResHTTP => {
                    if strict && ch != b'/' {
                        fail!(HttpParseErrorKind::InvalidConstant);
                    }
                    self.state = State::ResFirstHttpMajor;
                }
                State::ResFirstHttpMajor | State::ReqFirstHttpMajor => {
                    if !ch.is_ascii_digit() {
                        fail!(HttpParseErrorKind::InvalidVersion);
                    }
                    self.http_major = (ch - b'0') as u16;
                    self.state = if self.state == State::ResFirstHttpMajor {
                        State::ResHttpMajor
                    } else {
                        State::ReqHttpMajor
                    };
                }
                State::ResHttpMajor | State::ReqHttpMajor => {
                    if ch == b'.' {
                        self.state = if self.state == State::ResHttpMajor {
                            State::ResFirstHttpMinor
                        } else {
                            State::ReqFirstHttpMinor
                        };
                        continue;
                    }
                    if !ch.is_ascii_digit() {
                        fail!(HttpParseErrorKind::InvalidVersion);
                    }
                    self.http_major = self.http_major * 10 + (ch - b'0') as u16;
                    if self.http_major > MAX_VERSION_PART {
                        fail!(HttpParseErrorKind::InvalidVersion);
                    }
                }
                State::ResFirstHttpMinor | State::ReqFirstHttpMinor => {
                    if !ch.is_ascii_digit() {
                        fail!(HttpParseErrorKind::InvalidVersion);
                    }
                    self.http_minor = (ch - b'0') as u16;
                    self.state = if self.state == State::ResFirstHttpMinor {
                        State::ResHttpMinor
                    } else {
                        State::ReqHttpMinor
                    };
                }
                State::ResHttpMinor => {
                    if ch == SP {
                        self.state = State::ResFirstStatusCode;
                        continue;
                    }
                    if !ch.is_ascii_digit() {
                        fail!(HttpParseErrorKind::InvalidVersion);
                    }
                    self.http_minor = self.http_minor * 10 + (ch - b'0') as u16;
                    if self.http_minor > MAX_VERSION_PART {
                        fail!(HttpParseErrorKind::InvalidVersion);
                    }
                }
                State::ResFirstStatusCode => {
                    if ch == SP {
                        continue;
                    }
                    if !ch.is_ascii_digit() {
                        fail!(HttpParseErrorKind::InvalidStatusCode);
                    }
                    self.status_code = (ch - b'0') as u16;
                    self.state = State::ResStatusCode;
                }
                State::ResStatusCode => match ch {
                    b'0'..=b'9' => {
                        self.status_code = self.status_code * 10 + (ch - b'0') as u16;
                        if self.status_code > MAX_STATUS_CODE {
                            fail!(HttpParseErrorKind::InvalidStatusCode);
                        }
                        if self.status_code > 99 {
                            callback!(handler.on_status_complete(self.status_code));
                        }
                    }
                    SP => self.state = State::ResStatus,
                    CR => self.state = State::ResLineAlmostDone,
                    LF => self.state = State::HeaderFieldStart,
                    _ => fail!(HttpParseErrorKind::InvalidStatusCode),
                },
                State::ResStatus => match ch {
                    CR => self.state = State::ResLineAlmostDone,
                    LF => self.state = State::HeaderFieldStart,
                    _ => {}
                },
                State::ResLineAlmostDone => {
                    if strict && ch != LF {
                        fail!(HttpParseErrorKind::LfExpected);
                    }
                    self.state = State::HeaderFieldStart;
                }

                State::StartReq => {
                    if ch == CR || ch == LF {
                        continue;
                    }
                    self.begin_message();
                    let Some(method) = HttpMethod::from_first_byte(ch) else {
                        fail!(HttpParseErrorKind::InvalidMethod);
                    };
                    self.method = Some(method);
                    self.index = 1;
                    self.state = State::ReqMethod;
                    log_trace!("message begin");
                    callback!(handler.on_message_begin());
                }
                State::ReqMethod => {
                    let Some(method) = self.method else {
                        fail!(HttpParseErrorKind::InvalidMethod);
                    };
                    let name = method.as_bytes();
                    if ch == SP && self.index == name.len() {
                        self.state = State::SpacesBeforeUrl;
                    } else if name.get(self.index) != Some(&ch) {
                        let Some(m) = method.refine(self.index, ch) else {
                            fail!(HttpParseErrorKind::InvalidMethod);
                        };
                        self.method = Some(m);
                    }
                    self.index += 1;
                }

                State::SpacesBeforeUrl => {
                    if ch == SP {
                        continue;
                    }
                    url_mark = Some(p);
                    let start = if self.method == Some(HttpMethod::Connect) {
                        UrlState::HostStart
                    } else {
                        UrlState::Start
                    };
                    let Some(next) = parse_url_char(start, ch, strict) else {
                        fail!(HttpParseErrorKind::InvalidUrlChar);
                    };
                    self.state = State::Url(next);
                }
                State::Url(s) => {
                    if matches!(ch, SP | CR | LF) {
                        if !s.can_end() {
                            fail!(HttpParseErrorKind::InvalidUrlChar);
                        }
                        emit!(url_mark, on_url);
                        self.state = match ch {
                            SP => State::ReqHttpStart,
                            CR => State::ReqLineAlmostDone,
                            _ => State::HeaderFieldStart,
                        };
                        if ch != SP {
                            // HTTP/0.9
                            self.http_major = 0;
                            self.http_minor = 9;
                        }
                    } else {
                        let Some(next) = parse_url_char(s, ch, strict) else {
                            fail!(HttpParseErrorKind::InvalidUrlChar);
                        };
                        self.state = State::Url(next);
                    }
                }

                State::ReqHttpStart => match ch {
                    b'H' => self.state = State::ReqHttpH,
                    SP => {}
                    _ => fail!(HttpParseErrorKind::InvalidConstant),
                },
                State::ReqHttpH => {
                    if strict && ch != b'T' {
                        fail!(HttpParseErrorKind::InvalidConstant);
                    }
                    self.state = State::ReqHttpHT;
                }
                State::ReqHttpHT => {
                    if strict && ch != b'T' {
                        fail!(HttpParseErrorKind::InvalidConstant);
                    }
                    self.state = State::ReqHttpHTT;
                }
                State::ReqHttpHTT => {
                    if strict && ch != b'P' {
                        fail!(HttpParseErrorKind::InvalidConstant);
                    }
                    self.state = State::ReqHttpHTTP;
                }
                State::ReqHttpHTTP => {
                    if strict && ch != b'/' {
                        fail!(HttpParseErrorKind::InvalidConstant);
                    }
                    self.state = State::ReqFirstHttpMajor;
                }
                State::ReqHttpMinor => {
                    match ch {
                        CR => {
                            self.state = State::ReqLineAlmostDone;
                            continue;
                        }
                        LF => {
                            self.state = State::HeaderFieldStart;
                            continue;
                        }
                        _ => {}
                    }
                    if !ch.is_ascii_digit() {
                        fail!(HttpParseErrorKind::InvalidVersion);
                    }
                    self.http_minor = self.http_minor * 10 + (ch - b'0') as u16;
                    if self.http_minor > MAX_VERSION_PART {
                        fail!(HttpParseErrorKind::InvalidVersion);
                    }
                }
                State::ReqLineAlmostDone => {
                    if ch != LF {
                        fail!(HttpParseErrorKind::LfExpected);
                    }
                    self.state = State::HeaderFieldStart;
                }

                State::HeaderFieldStart => {
                    if ch == CR {
                        self.state = State::HeadersAlmostDone;
                        continue;
                    }
                    if ch == LF {
                        // bare LF as the end of headers
                        self.state = State::HeadersAlmostDone;
                        reexecute = true;
                        continue;
                    }
                    let c = token(ch, strict);
                    if c == 0 {
                        fail!(HttpParseErrorKind::InvalidHeaderToken);
                    }
                    header_field_mark = Some(p);
                    self.header.start_name(c);
                    self.state = State::HeaderField;
                }
                State::HeaderField => {
                    let c = token(ch, strict);
                    if c != 0 {
                        self.header.feed_name(ch, c);
                    } else if ch == b':' {
                        emit!(header_field_mark, on_header_field);
                        self.state = State::HeaderValueStart;
                    } else if ch == CR || ch == LF {
                        if strict {
                            fail!(HttpParseErrorKind::InvalidHeaderField);
                        }
                        emit!(header_field_mark, on_header_field);
                        callback!(handler.on_header_value(&data[p..p]));
                        self.header.reset();
                        self.state = if ch == CR {
                            State::HeaderAlmostDone
                        } else {
                            State::HeaderFieldStart
                        };
                    } else {
                        fail!(HttpParseErrorKind::InvalidHeaderToken);
                    }
                }
                State::HeaderValueStart => {
                    if ch == SP || ch == HT {
                        continue;
                    }
                    header_value_mark = Some(p);
                    if ch == CR || ch == LF {
                        emit!(header_value_mark, on_header_value);
                        self.header.reset();
                        self.state = State::HeaderAlmostDone;
                        reexecute = ch == LF;
                    } else {
                        self.state = State::HeaderValue;
                        match self.header.start_value(ch) {
                            ValueStart::Plain => {}
                            ValueStart::Upgrade => self.flags.insert(ParserFlags::UPGRADE),
                            ValueStart::ContentLength(d) => {
                                self.content_length = Some(d as u64)
                            }
                            ValueStart::InvalidContentLength => {
                                fail!(HttpParseErrorKind::InvalidContentLength)
                            }
                        }
                    }
                }
                State::HeaderValue => {
                    if ch == CR || ch == LF {
                        emit!(header_value_mark, on_header_value);
                        self.state = State::HeaderAlmostDone;
                        reexecute = ch == LF;
                    } else if self.header.state() == HeaderMatchState::General {
                        // nothing to match, skip to the line end
                        let skip = memchr2(CR, LF, &data[pos..]).unwrap_or(len - pos);
                        if self.nread + skip > max_header_size {
                            let offset = p + max_header_size - self.nread + 1;
                            p = offset.min(len - 1);
                            fail!(HttpParseErrorKind::HeaderOverflow(max_header_size));
                        }
                        self.nread += skip;
                        pos += skip;
                    } else {
                        match self.header.feed_value(ch) {
                            ValueStep::Plain => {}
                            ValueStep::ContentLengthDigit(d) => {
                                let Some(v) = self
                                    .content_length
                                    .unwrap_or(0)
                                    .checked_mul(10)
                                    .and_then(|v| v.checked_add(d as u64))
                                else {
                                    fail!(HttpParseErrorKind::ContentLengthOverflow);
                                };
                                self.content_length = Some(v);
                            }
                            ValueStep::InvalidContentLength => {
                                fail!(HttpParseErrorKind::InvalidContentLength)
                            }
                        }
                    }
                }
                State::HeaderAlmostDone => {
                    if strict && ch != LF {
                        fail!(HttpParseErrorKind::LfExpected);
                    }
                    self.flags.insert(self.header.finish_line());
                    self.state = State::HeaderValueLws;
                }
                State::HeaderValueLws => {
                    if ch == SP || ch == HT {
                        // obs-fold, the value continues on this line
                        self.state = State::HeaderValueStart;
                    } else {
                        self.state = State::HeaderFieldStart;
                        reexecute = true;
                    }
                }

                State::HeadersAlmostDone => {
                    if ch != LF {
                        fail!(HttpParseErrorKind::LfExpected);
                    }
                    if self.flags.contains(ParserFlags::TRAILING) {
                        // end of the trailer section of a chunked message
                        callback!(self.complete_message(handler));
                    } else {
                        self.upgrade = match self.kind {
                            Some(MessageKind::Response) => {
                                self.flags.contains(ParserFlags::UPGRADE) && self.status_code == 101
                            }
                            _ => {
                                self.flags.contains(ParserFlags::UPGRADE)
                                    || self.method == Some(HttpMethod::Connect)
                            }
                        };
                        self.state = State::HeadersDone;
                        let head = self.head();
                        match handler.on_headers_complete(&head) {
                            HandlerAction::Continue => {}
                            HandlerAction::Stop => stop = true,
                            HandlerAction::SkipBody => self.flags.insert(ParserFlags::SKIP_BODY),
                        }
                        reexecute = true;
                    }
                }
                State::HeadersDone => {
                    self.nread = 0;

                    if self.upgrade {
                        log_debug!("connection upgraded, {} bytes left", len - pos);
                        self.complete_message(handler);
                        self.state = State::Upgraded;
                        flush!(pos);
                        self.stream_position += pos as u64;
                        return Ok(pos);
                    }

                    if self.flags.contains(ParserFlags::SKIP_BODY) {
                        callback!(self.complete_message(handler));
                    } else if self.flags.contains(ParserFlags::CHUNKED) {
                        log_trace!("chunked body");
                        self.state = State::ChunkSizeStart;
                    } else {
                        match self.content_length {
                            Some(0) => callback!(self.complete_message(handler)),
                            Some(n) => {
                                log_trace!("identity body of {n} bytes");
                                self.remaining = n;
                                self.state = State::BodyIdentity;
                            }
                            None => {
                                if self.kind == Some(MessageKind::Request) || !self.needs_eof() {
                                    callback!(self.complete_message(handler));
                                } else {
                                    log_trace!("body until connection close");
                                    self.state = State::BodyIdentityEof;
                                }
                            }
                        }
                    }
                }

                State::BodyIdentity => {
                    let to_read = (self.remaining).min((len - p) as u64) as usize;
                    callback!(handler.on_body(&data[p..p + to_read]));
                    pos = p + to_read;
                    self.remaining -= to_read as u64;
                    if self.remaining == 0 {
                        self.state = State::MessageDone;
                        reexecute = true;
                    }
                }
                State::BodyIdentityEof => {
                    callback!(handler.on_body(&data[p..]));
                    pos = len;
                }
                State::MessageDone => {
                    callback!(self.complete_message(handler));
                }

                State::ChunkSizeStart => {
                    let Some(d) = unhex(ch) else {
                        fail!(HttpParseErrorKind::InvalidChunkSize);
                    };
                    self.remaining = d as u64;
                    self.state = State::ChunkSize;
                }
                State::ChunkSize => {
                    if ch == CR {
                        self.state = State::ChunkSizeAlmostDone;
                        continue;
                    }
                    if ch == LF {
                        self.state = State::ChunkSizeAlmostDone;
                        reexecute = true;
                        continue;
                    }
                    match unhex(ch) {
                        Some(d) => {
                            let Some(v) = self
                                .remaining
                                .checked_mul(16)
                                .and_then(|v| v.checked_add(d as u64))
                            else {
                                fail!(HttpParseErrorKind::ChunkSizeOverflow);
                            };
                            self.remaining = v;
                        }
                        None => {
                            if ch == b';' || ch == SP {
                                self.state = State::ChunkParameters;
                            } else {
                                fail!(HttpParseErrorKind::InvalidChunkSize);
                            }
                        }
                    }
                }
                State::ChunkParameters => {
                    // chunk extensions are ignored
                    if ch == CR {
                        self.state = State::ChunkSizeAlmostDone;
                    } else if ch == LF {
                        self.state = State::ChunkSizeAlmostDone;
                        reexecute = true;
                    }
                }
                State::ChunkSizeAlmostDone => {
                    if strict && ch != LF {
                        fail!(HttpParseErrorKind::LfExpected);
                    }
                    self.nread = 0;
                    if self.remaining == 0 {
                        self.flags.insert(ParserFlags::TRAILING);
                        self.state = State::HeaderFieldStart;
                    } else {
                        self.state = State::ChunkData;
                    }
                }
                State::ChunkData => {
                    let to_read = (self.remaining).min((len - p) as u64) as usize;
                    callback!(handler.on_body(&data[p..p + to_read]));
                    pos = p + to_read;
                    self.remaining -= to_read as u64;
                    if self.remaining == 0 {
                        self.state = State::ChunkDataAlmostDone;
                    }
                }
                State::ChunkDataAlmostDone => {
                    if strict && ch != CR {
                        fail!(HttpParseErrorKind::InvalidChunkData);
                    }
                    self.state = State::ChunkDataDone;
                }
                State::ChunkDataDone => {
                    if strict && ch != LF {
                        fail!(HttpParseErrorKind::InvalidChunkData);
                    }
                    self.state = State::ChunkSizeStart;
                }
            }

            if stop && !reexecute {
                flush!(pos);
                self.stream_position += pos as u64;
                return Ok(pos);
            }
        }

        flush!(len);
        self.stream_position += pos as u64;
        Ok(pos)
    }
}
