/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::ops::Range;

use atoi::FromRadix10Checked;

use crate::UrlParseError;
use crate::chars::{is_alpha, is_digit, is_hex, is_host_char, is_url_char};

/// Position inside a request target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UrlState {
    /// Nothing consumed yet, an origin-form or absolute-form target follows.
    Start,
    Schema,
    SchemaSlash,
    SchemaSlashSlash,
    HostStart,
    HostV6Start,
    HostV6,
    HostV6End,
    Host,
    PortStart,
    Port,
    Path,
    QueryStringStart,
    QueryString,
    FragmentStart,
    Fragment,
}

impl UrlState {
    /// Whether a SP or line end may terminate the target in this state.
    pub(crate) fn can_end(&self) -> bool {
        matches!(
            self,
            UrlState::Host
                | UrlState::HostV6End
                | UrlState::Port
                | UrlState::Path
                | UrlState::QueryStringStart
                | UrlState::QueryString
                | UrlState::FragmentStart
                | UrlState::Fragment
        )
    }
}

/// Advance the target grammar by one byte. `None` means the byte is invalid here.
pub fn parse_url_char(state: UrlState, ch: u8, strict: bool) -> Option<UrlState> {
    if ch == b' ' {
        return None;
    }

    match state {
        UrlState::Start => {
            if ch == b'/' || ch == b'*' {
                return Some(UrlState::Path);
            }
            if is_alpha(ch) {
                return Some(UrlState::Schema);
            }
        }
        UrlState::Schema => {
            if is_alpha(ch) {
                return Some(UrlState::Schema);
            }
            if ch == b':' {
                return Some(UrlState::SchemaSlash);
            }
        }
        UrlState::SchemaSlash => {
            if ch == b'/' {
                return Some(UrlState::SchemaSlashSlash);
            }
        }
        UrlState::SchemaSlashSlash => {
            if ch == b'/' {
                return Some(UrlState::HostStart);
            }
        }
        UrlState::HostStart => {
            if ch == b'[' {
                return Some(UrlState::HostV6Start);
            }
            if is_host_char(ch, strict) {
                return Some(UrlState::Host);
            }
        }
        UrlState::Host | UrlState::HostV6End => {
            if state == UrlState::Host && is_host_char(ch, strict) {
                return Some(UrlState::Host);
            }
            match ch {
                b':' => return Some(UrlState::PortStart),
                b'/' => return Some(UrlState::Path),
                b'?' => return Some(UrlState::QueryStringStart),
                _ => {}
            }
        }
        UrlState::HostV6 | UrlState::HostV6Start => {
            if state == UrlState::HostV6 && ch == b']' {
                return Some(UrlState::HostV6End);
            }
            if is_hex(ch) || ch == b':' {
                return Some(UrlState::HostV6);
            }
        }
        UrlState::Port | UrlState::PortStart => {
            if state == UrlState::Port {
                match ch {
                    b'/' => return Some(UrlState::Path),
                    b'?' => return Some(UrlState::QueryStringStart),
                    _ => {}
                }
            }
            if is_digit(ch) {
                return Some(UrlState::Port);
            }
        }
        UrlState::Path => {
            if is_url_char(ch, strict) {
                return Some(UrlState::Path);
            }
            match ch {
                b'?' => return Some(UrlState::QueryStringStart),
                b'#' => return Some(UrlState::FragmentStart),
                _ => {}
            }
        }
        UrlState::QueryStringStart | UrlState::QueryString => {
            if is_url_char(ch, strict) {
                return Some(UrlState::QueryString);
            }
            match ch {
                // extra '?' is allowed in query string
                b'?' => return Some(UrlState::QueryString),
                b'#' => return Some(UrlState::FragmentStart),
                _ => {}
            }
        }
        UrlState::FragmentStart => {
            if is_url_char(ch, strict) {
                return Some(UrlState::Fragment);
            }
            match ch {
                b'?' => return Some(UrlState::Fragment),
                b'#' => return Some(UrlState::FragmentStart),
                _ => {}
            }
        }
        UrlState::Fragment => {
            if is_url_char(ch, strict) || ch == b'?' || ch == b'#' {
                return Some(UrlState::Fragment);
            }
        }
    }

    None
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UrlField {
    Schema = 0,
    Host = 1,
    Port = 2,
    Path = 3,
    Query = 4,
    Fragment = 5,
}

const URL_FIELD_COUNT: usize = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FieldData {
    offset: usize,
    len: usize,
}

/// Component extents of a parsed request target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UrlFields {
    fields: [FieldData; URL_FIELD_COUNT],
    field_set: u8,
    port: u16,
}

impl UrlFields {
    #[inline]
    pub fn has(&self, field: UrlField) -> bool {
        self.field_set & (1 << field as u8) != 0
    }

    pub fn range(&self, field: UrlField) -> Option<Range<usize>> {
        if self.has(field) {
            let f = &self.fields[field as usize];
            Some(f.offset..f.offset + f.len)
        } else {
            None
        }
    }

    /// Slice the component out of the bytes that were parsed.
    pub fn get<'a>(&self, field: UrlField, data: &'a [u8]) -> Option<&'a [u8]> {
        self.range(field).and_then(|r| data.get(r))
    }

    pub fn port(&self) -> Option<u16> {
        if self.has(UrlField::Port) {
            Some(self.port)
        } else {
            None
        }
    }

    fn set(&mut self, field: UrlField, offset: usize) {
        self.fields[field as usize] = FieldData { offset, len: 1 };
        self.field_set |= 1 << field as u8;
    }

    fn extend(&mut self, field: UrlField) {
        self.fields[field as usize].len += 1;
    }
}

/// Split a complete request target into its components.
///
/// CONNECT targets are in authority form and must consist of exactly a host
/// and a port.
pub fn parse_url(data: &[u8], is_connect: bool, strict: bool) -> Result<UrlFields, UrlParseError> {
    if data.is_empty() {
        return Err(UrlParseError::Empty);
    }

    let mut u = UrlFields::default();
    let mut state = if is_connect {
        UrlState::HostStart
    } else {
        UrlState::Start
    };
    let mut last_field: Option<UrlField> = None;

    for (i, ch) in data.iter().enumerate() {
        state = parse_url_char(state, *ch, strict).ok_or(UrlParseError::InvalidChar(i))?;
        let field = match state {
            UrlState::Schema => UrlField::Schema,
            UrlState::Host | UrlState::HostV6 => UrlField::Host,
            UrlState::Port => UrlField::Port,
            UrlState::Path => UrlField::Path,
            UrlState::QueryString => UrlField::Query,
            UrlState::Fragment => UrlField::Fragment,
            // delimiters
            _ => continue,
        };
        if last_field == Some(field) {
            u.extend(field);
        } else {
            u.set(field, i);
            last_field = Some(field);
        }
    }

    if matches!(
        state,
        UrlState::HostV6Start
            | UrlState::HostV6
            | UrlState::HostV6End
            | UrlState::Host
            | UrlState::PortStart
    ) {
        return Err(UrlParseError::Incomplete);
    }

    if is_connect
        && (state != UrlState::Port
            || u.field_set != (1 << UrlField::Host as u8) | (1 << UrlField::Port as u8))
    {
        return Err(UrlParseError::InvalidConnectTarget);
    }

    if let Some(port) = u.get(UrlField::Port, data) {
        let (v, used) = u16::from_radix_10_checked(port);
        match v {
            Some(v) if used == port.len() => u.port = v,
            _ => return Err(UrlParseError::InvalidPort),
        }
    }

    Ok(u)
}
