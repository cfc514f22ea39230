/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod chars;
mod debug;

mod collect;
mod config;
mod diagnostic;
mod error;
mod flags;
mod handler;
mod header;
mod method;
mod parser;
mod state;
mod url;

pub use collect::{HeaderValue, HeaderValueType, HttpMessage, MessageCollector};
pub use config::{DEFAULT_MAX_HEADER_SIZE, ParserConfig};
pub use debug::PARSER_LOG_TARGET;
pub use diagnostic::ErrorContext;
pub use error::{HttpParseError, HttpParseErrorClass, HttpParseErrorKind, UrlParseError};
pub use flags::ParserFlags;
pub use handler::{HandlerAction, HttpParserHandler, MessageHead};
pub use header::HeaderMatchState;
pub use method::HttpMethod;
pub use parser::{HttpParser, MessageKind, ParserMode};
pub use state::{DeadReason, State};
pub use url::{UrlField, UrlFields, UrlState, parse_url, parse_url_char};
