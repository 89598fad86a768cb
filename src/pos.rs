// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Both line and col are zero based; Emacs uses 1-based line
/// numbering, so line is incremented by 1 in Display. col counts
/// bytes, not characters.

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    /// Derive the position of byte `offset` by scanning the consumed
    /// part of `input`. Offsets past the end are clamped.
    pub fn from_offset(input: &[u8], offset: usize) -> Pos {
        let consumed = &input[..offset.min(input.len())];
        let line = consumed.iter().filter(|&&b| b == b'\n').count();
        let col = match consumed.iter().rposition(|&b| b == b'\n') {
            Some(i) => consumed.len() - i - 1,
            None => consumed.len(),
        };
        Pos {
            line: u32::try_from(line).unwrap_or(u32::MAX),
            col: u32::try_from(col).unwrap_or(u32::MAX),
        }
    }

    /// Move past `bytes`, for walking an input front to back without
    /// rescanning it.
    pub fn advance(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if b == b'\n' {
                self.line = self.line.saturating_add(1);
                self.col = 0;
            } else {
                self.col = self.col.saturating_add(1);
            }
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        // This, when prefixed with a Debug style path string, is
        // following the Emacs convention for location information.
        f.write_fmt(format_args!("@{}.{}", self.line + 1, self.col))
    }
}

#[cfg(test)]
mod tests {
    use super::Pos;

    #[test]
    fn from_offset() {
        let s = b"(a\n  b\nc)";
        assert_eq!(Pos::from_offset(s, 0), Pos { line: 0, col: 0 });
        assert_eq!(Pos::from_offset(s, 5), Pos { line: 1, col: 2 });
        assert_eq!(Pos::from_offset(s, 7), Pos { line: 2, col: 0 });
        assert_eq!(Pos::from_offset(s, 100), Pos { line: 2, col: 2 });
        assert_eq!(Pos::from_offset(s, 5).to_string(), "@2.2");
    }

    #[test]
    fn advance_matches_from_offset() {
        let s = b"(a\n  b\nc)";
        let mut pos = Pos { line: 0, col: 0 };
        let mut last = 0;
        for offset in [1, 5, 7, 9] {
            pos.advance(&s[last..offset]);
            last = offset;
            assert_eq!(pos, Pos::from_offset(s, offset));
        }
    }
}
