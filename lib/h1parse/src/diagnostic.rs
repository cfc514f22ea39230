/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt::{self, Write};

const WINDOW_RADIUS: usize = 32;

/// A copy of the input around the byte that failed to parse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    window: Vec<u8>,
    marker: usize,
}

impl ErrorContext {
    pub(crate) fn capture(data: &[u8], pos: usize) -> Self {
        let pos = pos.min(data.len());
        let start = pos.saturating_sub(WINDOW_RADIUS);
        let end = pos.saturating_add(WINDOW_RADIUS + 1).min(data.len());
        ErrorContext {
            window: data[start..end].to_vec(),
            marker: pos - start,
        }
    }

    #[inline]
    pub fn window(&self) -> &[u8] {
        &self.window
    }

    /// Index of the failing byte in [`ErrorContext::window`].
    ///
    /// Equal to the window length if the failure is at the end of input.
    #[inline]
    pub fn marker(&self) -> usize {
        self.marker
    }
}

fn escape_byte(b: u8, buf: &mut String) {
    match b {
        b'\r' => buf.push_str("\\r"),
        b'\n' => buf.push_str("\\n"),
        b'\t' => buf.push_str("\\t"),
        b'\\' => buf.push_str("\\\\"),
        0x20..=0x7e => buf.push(b as char),
        _ => {
            let _ = write!(buf, "\\x{b:02x}");
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = String::with_capacity(self.window.len() * 2);
        let mut column = 0;
        for (i, b) in self.window.iter().enumerate() {
            if i == self.marker {
                column = line.len();
            }
            escape_byte(*b, &mut line);
        }
        if self.marker >= self.window.len() {
            column = line.len();
        }
        writeln!(f, "{line}")?;
        write!(f, "{:column$}^", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker() {
        let ctx = ErrorContext::capture(b"GET / HTTP/1.1\r\n", 6);
        assert_eq!(ctx.marker(), 6);
        assert_eq!(ctx.to_string(), "GET / HTTP/1.1\\r\\n\n      ^");

        let ctx = ErrorContext::capture(b"a\r\nb", 3);
        assert_eq!(ctx.to_string(), "a\\r\\nb\n     ^");
    }

    #[test]
    fn bounded() {
        let data = [b'x'; 200];
        let ctx = ErrorContext::capture(&data, 100);
        assert_eq!(ctx.window().len(), 65);
        assert_eq!(ctx.marker(), 32);

        let ctx = ErrorContext::capture(&data, 200);
        assert_eq!(ctx.window().len(), 32);
        assert_eq!(ctx.marker(), 32);
        assert!(ctx.to_string().ends_with(&format!("{:32}^", "")));
    }

    #[test]
    fn non_printable() {
        let ctx = ErrorContext::capture(&[b'A', 0x01, 0xff], 1);
        assert_eq!(ctx.to_string(), "A\\x01\\xff\n ^");
    }
}
