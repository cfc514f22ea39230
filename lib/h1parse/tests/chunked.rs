/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod common;

use hex_literal::hex;

use common::{Event, EventRecorder, parse_all, strict_config};
use h1parse::{HttpParseErrorKind, HttpParser, ParserConfig, ParserFlags, ParserMode, State};

const CHUNKED_HEAD: &[u8] = b"POST /upload HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n";

fn chunked(body: &[u8]) -> Vec<u8> {
    let mut data = CHUNKED_HEAD.to_vec();
    data.extend_from_slice(body);
    data
}

#[test]
fn single_chunk() {
    let (parser, r) = parse_all(ParserMode::Request, &chunked(b"5\r\nhello\r\n0\r\n\r\n"));
    assert!(parser.flags().contains(ParserFlags::CHUNKED));
    assert_eq!(r.bodies(), [b"hello".as_slice()]);
    assert_eq!(r.completed().len(), 1);
    assert_eq!(parser.state(), State::StartReq);
}

#[test]
fn empty_body() {
    let (_, r) = parse_all(ParserMode::Request, &chunked(b"0\r\n\r\n"));
    assert!(r.bodies().is_empty());
    assert_eq!(r.completed().len(), 1);
}

#[test]
fn chunk_per_call() {
    let mut parser = HttpParser::new(ParserMode::Request);
    let mut r = EventRecorder::default();
    for piece in [
        CHUNKED_HEAD,
        b"3\r\nabc\r\n",
        b"A\r\n0123456789\r\n",
        b"0\r\n\r\n",
    ] {
        assert_eq!(parser.execute(&mut r, piece).unwrap(), piece.len());
    }
    assert_eq!(r.bodies(), [b"abc0123456789".as_slice()]);
    assert_eq!(r.completed().len(), 1);
}

#[test]
fn binary_data() {
    let payload = hex!("0d0a00ff0d0a");
    let mut body = b"6\r\n".to_vec();
    body.extend_from_slice(&payload);
    body.extend_from_slice(b"\r\n0\r\n\r\n");
    let (_, r) = parse_all(ParserMode::Request, &chunked(&body));
    assert_eq!(r.bodies(), [payload.as_slice()]);
}

#[test]
fn extensions() {
    let (_, r) = parse_all(
        ParserMode::Request,
        &chunked(b"5;name=value\r\nhello\r\n6 ; x\r\n world\r\n0;last\r\n\r\n"),
    );
    assert_eq!(r.bodies(), [b"hello world".as_slice()]);
    assert_eq!(r.completed().len(), 1);
}

#[test]
fn trailers() {
    let (_, r) = parse_all(
        ParserMode::Request,
        &chunked(b"3\r\nabc\r\n0\r\nX-Checksum: 42\r\nX-Other: 1\r\n\r\n"),
    );
    let n = r.events.len();
    assert_eq!(r.events[n - 6], Event::Body(b"abc".to_vec()));
    assert_eq!(r.events[n - 5], Event::HeaderField(b"X-Checksum".to_vec()));
    assert_eq!(r.events[n - 4], Event::HeaderValue(b"42".to_vec()));
    assert_eq!(r.events[n - 3], Event::HeaderField(b"X-Other".to_vec()));
    assert_eq!(r.events[n - 2], Event::HeaderValue(b"1".to_vec()));
    assert!(matches!(r.events[n - 1], Event::MessageComplete(_)));

    let headers_complete = r
        .events
        .iter()
        .filter(|e| matches!(e, Event::HeadersComplete(_)))
        .count();
    assert_eq!(headers_complete, 1);
}

#[test]
fn size_overflow() {
    let mut parser = HttpParser::new(ParserMode::Request);
    let e = parser
        .execute(&mut (), &chunked(b"fffffffffffffffff\r\n"))
        .unwrap_err();
    assert_eq!(e.kind(), HttpParseErrorKind::ChunkSizeOverflow);

    let mut parser = HttpParser::new(ParserMode::Request);
    parser
        .execute(&mut (), &chunked(b"ffffffffffffffff\r\nsome data"))
        .unwrap();
    assert_eq!(parser.state(), State::ChunkData);
}

#[test]
fn invalid_size() {
    for body in [b"x\r\n".as_slice(), b"5x\r\nhello\r\n", b"\r\n"] {
        let mut parser = HttpParser::new(ParserMode::Request);
        let e = parser.execute(&mut (), &chunked(body)).unwrap_err();
        assert_eq!(e.kind(), HttpParseErrorKind::InvalidChunkSize);
    }
}

#[test]
fn data_terminator() {
    let data = chunked(b"5\r\nhelloXX0\r\n\r\n");

    let mut parser = HttpParser::with_config(ParserMode::Request, strict_config());
    let e = parser.execute(&mut (), &data).unwrap_err();
    assert_eq!(e.kind(), HttpParseErrorKind::InvalidChunkData);

    let (_, r) = parse_all(ParserMode::Request, &data);
    assert_eq!(r.bodies(), [b"hello".as_slice()]);
    assert_eq!(r.completed().len(), 1);
}

#[test]
fn bare_lf() {
    let (_, r) = parse_all(ParserMode::Request, &chunked(b"5\nhello\r\n0\n\n"));
    assert_eq!(r.bodies(), [b"hello".as_slice()]);
    assert_eq!(r.completed().len(), 1);
}

#[test]
fn data_not_counted_as_header() {
    let mut config = ParserConfig::default();
    config.set_max_header_size(64);

    let mut body = Vec::new();
    for _ in 0..10 {
        body.extend_from_slice(b"14\r\n");
        body.extend_from_slice(&[b'z'; 20]);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(b"0\r\n\r\n");

    let mut parser = HttpParser::with_config(ParserMode::Request, config);
    let data = chunked(&body);
    assert_eq!(parser.execute(&mut (), &data).unwrap(), data.len());
}
