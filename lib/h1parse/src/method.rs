/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Delete,
    Get,
    Head,
    Post,
    Put,
    Connect,
    Options,
    Trace,
    Copy,
    Lock,
    Mkcol,
    Move,
    Propfind,
    Proppatch,
    Unlock,
    Report,
    Mkactivity,
    Checkout,
    Merge,
    MSearch,
    Notify,
    Subscribe,
    Unsubscribe,
    Patch,
    Purge,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Copy => "COPY",
            HttpMethod::Lock => "LOCK",
            HttpMethod::Mkcol => "MKCOL",
            HttpMethod::Move => "MOVE",
            HttpMethod::Propfind => "PROPFIND",
            HttpMethod::Proppatch => "PROPPATCH",
            HttpMethod::Unlock => "UNLOCK",
            HttpMethod::Report => "REPORT",
            HttpMethod::Mkactivity => "MKACTIVITY",
            HttpMethod::Checkout => "CHECKOUT",
            HttpMethod::Merge => "MERGE",
            HttpMethod::MSearch => "M-SEARCH",
            HttpMethod::Notify => "NOTIFY",
            HttpMethod::Subscribe => "SUBSCRIBE",
            HttpMethod::Unsubscribe => "UNSUBSCRIBE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Purge => "PURGE",
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    /// The candidate method for a request starting with `b`.
    ///
    /// Several methods share a first letter, the candidate is refined later
    /// by [`HttpMethod::refine`].
    pub(crate) fn from_first_byte(b: u8) -> Option<Self> {
        match b {
            b'C' => Some(HttpMethod::Connect), // or COPY, CHECKOUT
            b'D' => Some(HttpMethod::Delete),
            b'G' => Some(HttpMethod::Get),
            b'H' => Some(HttpMethod::Head),
            b'L' => Some(HttpMethod::Lock),
            b'M' => Some(HttpMethod::Mkcol), // or MOVE, MKACTIVITY, MERGE, M-SEARCH
            b'N' => Some(HttpMethod::Notify),
            b'O' => Some(HttpMethod::Options),
            b'P' => Some(HttpMethod::Post), // or PROPFIND, PROPPATCH, PUT, PATCH, PURGE
            b'R' => Some(HttpMethod::Report),
            b'S' => Some(HttpMethod::Subscribe),
            b'T' => Some(HttpMethod::Trace),
            b'U' => Some(HttpMethod::Unlock), // or UNSUBSCRIBE
            _ => None,
        }
    }

    /// Switch to the method sharing the prefix `[0..index]` whose byte at
    /// `index` is `ch`, if there is one.
    pub(crate) fn refine(self, index: usize, ch: u8) -> Option<Self> {
        let m = match (self, index, ch) {
            (HttpMethod::Connect, 1, b'H') => HttpMethod::Checkout,
            (HttpMethod::Connect, 2, b'P') => HttpMethod::Copy,
            (HttpMethod::Mkcol, 1, b'O') => HttpMethod::Move,
            (HttpMethod::Mkcol, 1, b'E') => HttpMethod::Merge,
            (HttpMethod::Mkcol, 1, b'-') => HttpMethod::MSearch,
            (HttpMethod::Mkcol, 2, b'A') => HttpMethod::Mkactivity,
            (HttpMethod::Post, 1, b'R') => HttpMethod::Propfind,
            (HttpMethod::Post, 1, b'U') => HttpMethod::Put,
            (HttpMethod::Post, 1, b'A') => HttpMethod::Patch,
            (HttpMethod::Put, 2, b'R') => HttpMethod::Purge,
            (HttpMethod::Unlock, 2, b'S') => HttpMethod::Unsubscribe,
            (HttpMethod::Propfind, 4, b'P') => HttpMethod::Proppatch,
            _ => return None,
        };
        Some(m)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_method(s: &[u8]) -> Option<HttpMethod> {
        let mut m = HttpMethod::from_first_byte(s[0])?;
        for (i, ch) in s.iter().enumerate().skip(1) {
            if m.as_bytes().get(i) == Some(ch) {
                continue;
            }
            m = m.refine(i, *ch)?;
        }
        if m.as_bytes().len() == s.len() {
            Some(m)
        } else {
            None
        }
    }

    #[test]
    fn shared_prefix() {
        assert_eq!(match_method(b"POST"), Some(HttpMethod::Post));
        assert_eq!(match_method(b"PUT"), Some(HttpMethod::Put));
        assert_eq!(match_method(b"PURGE"), Some(HttpMethod::Purge));
        assert_eq!(match_method(b"PATCH"), Some(HttpMethod::Patch));
        assert_eq!(match_method(b"PROPFIND"), Some(HttpMethod::Propfind));
        assert_eq!(match_method(b"PROPPATCH"), Some(HttpMethod::Proppatch));
        assert_eq!(match_method(b"CONNECT"), Some(HttpMethod::Connect));
        assert_eq!(match_method(b"COPY"), Some(HttpMethod::Copy));
        assert_eq!(match_method(b"CHECKOUT"), Some(HttpMethod::Checkout));
        assert_eq!(match_method(b"M-SEARCH"), Some(HttpMethod::MSearch));
        assert_eq!(match_method(b"MKACTIVITY"), Some(HttpMethod::Mkactivity));
        assert_eq!(match_method(b"UNSUBSCRIBE"), Some(HttpMethod::Unsubscribe));
    }

    #[test]
    fn unknown() {
        assert_eq!(match_method(b"PAST"), None);
        assert_eq!(match_method(b"CONXECT"), None);
        assert_eq!(match_method(b"GETS"), None);
        assert_eq!(HttpMethod::from_first_byte(b'g'), None);
    }

    #[test]
    fn display() {
        assert_eq!(HttpMethod::MSearch.to_string(), "M-SEARCH");
        assert_eq!(HttpMethod::Get.as_bytes(), b"GET");
    }
}
