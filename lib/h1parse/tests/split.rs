/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod common;

use common::{Event, EventRecorder};
use h1parse::{
    HttpMethod, HttpParseErrorKind, HttpParser, ParserConfig, ParserFlags, ParserMode, State,
};

#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    events: Vec<Event>,
    consumed: usize,
    method: Option<HttpMethod>,
    status_code: u16,
    version: (u16, u16),
    content_length: Option<u64>,
    flags: ParserFlags,
    state: State,
}

fn run(mode: ParserMode, pieces: &[&[u8]]) -> Outcome {
    let mut parser = HttpParser::new(mode);
    let mut r = EventRecorder::default();
    let mut consumed = 0;
    for piece in pieces.iter().filter(|p| !p.is_empty()) {
        consumed += parser.execute(&mut r, piece).unwrap();
    }
    parser.finish(&mut r).unwrap();
    assert_eq!(parser.stream_position(), consumed as u64);
    Outcome {
        events: r.events,
        consumed,
        method: parser.method(),
        status_code: parser.status_code(),
        version: (parser.http_major(), parser.http_minor()),
        content_length: parser.content_length(),
        flags: parser.flags(),
        state: parser.state(),
    }
}

fn check_splits(mode: ParserMode, data: &[u8]) {
    let whole = run(mode, &[data]);
    for i in 0..=data.len() {
        let two = run(mode, &[&data[..i], &data[i..]]);
        assert_eq!(two, whole, "split at {i}");
    }
    for i in (0..data.len()).step_by(7) {
        for j in (i..=data.len()).step_by(5) {
            let three = run(mode, &[&data[..i], &data[i..j], &data[j..]]);
            assert_eq!(three, whole, "split at {i} and {j}");
        }
    }
    let bytes: Vec<&[u8]> = data.chunks(1).collect();
    assert_eq!(run(mode, &bytes), whole, "byte by byte");
}

#[test]
fn request_with_body() {
    check_splits(
        ParserMode::Request,
        b"POST /cgi-bin/process.cgi?a=1#top HTTP/1.1\r\n\
          User-Agent: Mozilla/4.0 (compatible; MSIE5.01; Windows NT)\r\n\
          Host: www.example.com\r\n\
          X-Empty:\r\n\
          Content-Length: 11\r\n\
          Connection: Keep-Alive\r\n\
          \r\n\
          hello=world",
    );
}

#[test]
fn chunked_response() {
    check_splits(
        ParserMode::Response,
        b"HTTP/1.1 200 OK\r\n\
          Content-Type: text/plain\r\n\
          Transfer-Encoding: chunked\r\n\
          \r\n\
          1a; ignore-stuff-here\r\n\
          abcdefghijklmnopqrstuvwxyz\r\n\
          2\r\n\
          \r\n\r\n\
          0\r\n\
          Vary: *\r\n\
          Content-Type: text/plain\r\n\
          \r\n",
    );
}

#[test]
fn response_until_eof() {
    check_splits(
        ParserMode::Response,
        b"HTTP/1.0 301 Moved Permanently\r\nLocation: http://example.org/\r\n\r\nmoved",
    );
}

#[test]
fn pipelined_either() {
    check_splits(
        ParserMode::Either,
        b"HEAD / HTTP/1.1\r\nHost: a\r\n\r\nHEAD /b HTTP/1.1\r\nX-Folded: one\r\n two\r\n\r\n",
    );
}

#[test]
fn lenient_input() {
    check_splits(
        ParserMode::Request,
        b"\r\nGET /\xe4\xb8\xad HTTP/1.1\nNo-Colon\nBad Name : v\r\n\n",
    );
}

#[test]
fn upgrade() {
    let data = b"GET /chat HTTP/1.1\r\nUpgrade: websocket\r\nConnection: Upgrade\r\n\r\n\x81\x05hello";
    let whole = run(ParserMode::Request, &[data]);
    assert_eq!(whole.state, State::Upgraded);
    assert_eq!(whole.consumed, data.len() - 7);
    for i in 0..=data.len() {
        assert_eq!(
            run(ParserMode::Request, &[&data[..i], &data[i..]]),
            whole,
            "split at {i}"
        );
    }
}

#[test]
fn overflow_offset() {
    let mut config = ParserConfig::default();
    config.set_max_header_size(64);
    let mut data = b"GET / HTTP/1.1\r\nX-Long: ".to_vec();
    data.resize(data.len() + 100, b'a');

    let mut parser = HttpParser::with_config(ParserMode::Request, config);
    let whole = parser.execute(&mut (), &data).unwrap_err();
    assert_eq!(whole.kind(), HttpParseErrorKind::HeaderOverflow(64));
    assert_eq!(whole.stream_offset(), 64);

    for size in [1, 3, 10, 30] {
        let mut parser = HttpParser::with_config(ParserMode::Request, config);
        let e = data
            .chunks(size)
            .find_map(|piece| parser.execute(&mut (), piece).err())
            .unwrap();
        assert_eq!(e.kind(), whole.kind());
        assert_eq!(e.stream_offset(), whole.stream_offset(), "chunk size {size}");
    }
}
