/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};

use h1parse::{
    HandlerAction, HttpMessage, HttpParseError, HttpParserHandler, MessageHead, MessageKind,
};

/// Prints every parser event as one line.
pub(crate) struct EventPrinter<W: Write> {
    out: W,
    head_response: bool,
    io_error: Option<io::Error>,
}

impl<W: Write> EventPrinter<W> {
    pub(crate) fn new(out: W, head_response: bool) -> Self {
        EventPrinter {
            out,
            head_response,
            io_error: None,
        }
    }

    /// The first write error, output stops after it.
    pub(crate) fn take_io_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }

    fn print(&mut self, args: std::fmt::Arguments<'_>) -> HandlerAction {
        if self.io_error.is_some() {
            return HandlerAction::Stop;
        }
        match self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            Ok(_) => HandlerAction::Continue,
            Err(e) => {
                self.io_error = Some(e);
                HandlerAction::Stop
            }
        }
    }
}

fn describe(head: &MessageHead) -> String {
    let mut s = match head.kind {
        MessageKind::Request => format!(
            "{} HTTP/{}.{}",
            head.method.map(|m| m.as_str()).unwrap_or("-"),
            head.http_major,
            head.http_minor
        ),
        MessageKind::Response => format!(
            "HTTP/{}.{} {}",
            head.http_major, head.http_minor, head.status_code
        ),
    };
    if let Some(len) = head.content_length {
        s.push_str(&format!(" content-length={len}"));
    }
    if !head.flags.is_empty() {
        s.push_str(&format!(" flags={:?}", head.flags));
    }
    s.push_str(&format!(" keep-alive={} upgrade={}", head.keep_alive, head.upgrade));
    s
}

impl<W: Write> HttpParserHandler for EventPrinter<W> {
    fn on_message_begin(&mut self) -> HandlerAction {
        self.print(format_args!("message begin"))
    }

    fn on_url(&mut self, data: &[u8]) -> HandlerAction {
        self.print(format_args!("url: {}", data.escape_ascii()))
    }

    fn on_status_complete(&mut self, status_code: u16) -> HandlerAction {
        self.print(format_args!("status: {status_code}"))
    }

    fn on_header_field(&mut self, data: &[u8]) -> HandlerAction {
        self.print(format_args!("header field: {}", data.escape_ascii()))
    }

    fn on_header_value(&mut self, data: &[u8]) -> HandlerAction {
        self.print(format_args!("header value: {}", data.escape_ascii()))
    }

    fn on_headers_complete(&mut self, head: &MessageHead) -> HandlerAction {
        let action = self.print(format_args!("headers complete: {}", describe(head)));
        if action == HandlerAction::Continue
            && self.head_response
            && head.kind == MessageKind::Response
        {
            HandlerAction::SkipBody
        } else {
            action
        }
    }

    fn on_body(&mut self, data: &[u8]) -> HandlerAction {
        self.print(format_args!("body: {} bytes", data.len()))
    }

    fn on_message_complete(&mut self, head: &MessageHead) -> HandlerAction {
        self.print(format_args!("message complete: {}", describe(head)))
    }

    fn on_error(&mut self, err: &HttpParseError) {
        let _ = self.print(format_args!("error: {err}"));
    }
}

/// Print a collected message in wire-like form.
pub(crate) fn write_message<W: Write>(out: &mut W, msg: &HttpMessage) -> io::Result<()> {
    match msg.kind {
        MessageKind::Request => writeln!(
            out,
            "{} {} HTTP/{}.{}",
            msg.method.map(|m| m.as_str()).unwrap_or("-"),
            msg.url.escape_ascii(),
            msg.http_major,
            msg.http_minor
        )?,
        MessageKind::Response => writeln!(
            out,
            "HTTP/{}.{} {}",
            msg.http_major, msg.http_minor, msg.status_code
        )?,
    }
    for (name, value) in &msg.headers {
        for v in value.iter() {
            writeln!(out, "{name}: {v}")?;
        }
    }
    writeln!(out, "<{} body bytes>", msg.body.len())?;
    for (name, value) in &msg.trailers {
        for v in value.iter() {
            writeln!(out, "{name}: {v}")?;
        }
    }
    writeln!(out)
}
