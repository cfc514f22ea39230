/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

pub(crate) const CR: u8 = b'\r';
pub(crate) const LF: u8 = b'\n';
pub(crate) const SP: u8 = b' ';
pub(crate) const HT: u8 = b'\t';

/// RFC 2616 token characters, already upper-cased. Zero for separators and CTLs.
static TOKENS: [u8; 256] = build_tokens();

const fn build_tokens() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 128 {
        let c = i as u8;
        table[i] = match c {
            b'a'..=b'z' => c - 0x20,
            b'A'..=b'Z' | b'0'..=b'9' => c,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
            | b'`' | b'|' | b'~' => c,
            _ => 0,
        };
        i += 1;
    }
    table
}

/// Map a header name byte to its upper-cased token form, or 0 if it is not allowed.
///
/// Lenient mode lets SP through so that `Name : value` is accepted.
#[inline]
pub(crate) fn token(b: u8, strict: bool) -> u8 {
    if !strict && b == SP {
        SP
    } else {
        TOKENS[b as usize]
    }
}

#[inline]
pub(crate) fn unhex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[inline]
pub(crate) fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub(crate) fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

#[inline]
pub(crate) fn is_hex(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// Characters that may appear in a path, query or fragment without escaping.
///
/// Bytes with the high bit set show up in the wild from clients sending raw
/// UTF-8 paths, so they are accepted unless strict mode is on.
#[inline]
pub(crate) fn is_url_char(b: u8, strict: bool) -> bool {
    match b {
        b'#' | b'?' => false,
        0x21..=0x7e => true,
        0x80..=0xff => !strict,
        _ => false,
    }
}

#[inline]
pub(crate) fn is_host_char(b: u8, strict: bool) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || (!strict && b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_table() {
        assert_eq!(token(b'a', true), b'A');
        assert_eq!(token(b'Z', true), b'Z');
        assert_eq!(token(b'-', true), b'-');
        assert_eq!(token(b'~', true), b'~');
        assert_eq!(token(b':', true), 0);
        assert_eq!(token(b'(', true), 0);
        assert_eq!(token(0x7f, true), 0);
        assert_eq!(token(0xc3, false), 0);

        assert_eq!(token(SP, true), 0);
        assert_eq!(token(SP, false), SP);
    }

    #[test]
    fn hex() {
        assert_eq!(unhex(b'0'), Some(0));
        assert_eq!(unhex(b'a'), Some(10));
        assert_eq!(unhex(b'F'), Some(15));
        assert_eq!(unhex(b'g'), None);
        assert!(is_hex(b'c'));
        assert!(!is_hex(b':'));
    }

    #[test]
    fn url_chars() {
        assert!(is_url_char(b'/', true));
        assert!(is_url_char(b'"', true));
        assert!(!is_url_char(b'?', false));
        assert!(!is_url_char(b'#', false));
        assert!(!is_url_char(SP, false));
        assert!(!is_url_char(0x7f, false));
        assert!(is_url_char(0xe4, false));
        assert!(!is_url_char(0xe4, true));
    }

    #[test]
    fn host_chars() {
        assert!(is_host_char(b'a', true));
        assert!(is_host_char(b'9', true));
        assert!(is_host_char(b'-', true));
        assert!(!is_host_char(b'_', true));
        assert!(is_host_char(b'_', false));
        assert!(!is_host_char(b'/', false));
    }
}
