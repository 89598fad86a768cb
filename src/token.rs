// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a byte buffer to a token stream. Tokens are only
//! classified here, not converted: a token carries the exact slice of
//! the input it was scanned from, and turning that into a value is
//! left to [parse](../parse/index.html). Scanning never fails; bad
//! input is reported as a `TokenKind::Invalid` token.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    EndOfInput,
    Invalid,
    LeftParen,
    RightParen,
    Quote,
    Integer,
    String,
    Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: TokenKind,
    /// Exact source bytes, e.g. including the quotes of a string;
    /// empty for `EndOfInput`.
    pub text: &'s [u8],
    /// Byte offset of `text` in the input
    pub offset: usize,
}

impl<'s> std::fmt::Display for Token<'s> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self.kind {
            TokenKind::EndOfInput => f.write_str("#<eof>"),
            _ => f.write_str(&String::from_utf8_lossy(self.text)),
        }
    }
}

// Whitespace and control characters share the same range.
fn is_whitespace(b: u8) -> bool {
    b <= 0x20
}

fn is_symbol_byte(b: u8) -> bool {
    !is_whitespace(b) && b < 0x7f && !matches!(b, b'(' | b')' | b'"')
}

pub struct Tokenizer<'s> {
    input: &'s [u8],
    pos: usize,
}

impl<'s> Tokenizer<'s> {
    /// Skips leading whitespace right away.
    pub fn new(input: &'s [u8]) -> Tokenizer<'s> {
        let mut t = Tokenizer { input, pos: 0 };
        t.skip_whitespace();
        t
    }

    /// Byte offset of the next token.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The part of the input not yet consumed.
    pub fn remaining(&self) -> &'s [u8] {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && is_whitespace(self.input[self.pos]) {
            self.pos += 1;
        }
    }

    fn skip_while(&self, start: usize, pred: fn(u8) -> bool) -> usize {
        let mut end = start;
        while end < self.input.len() && pred(self.input[end]) {
            end += 1;
        }
        end
    }

    // Returns the end of the token and whether the closing quote was
    // found.
    fn scan_string(&self, start: usize) -> (usize, bool) {
        let len = self.input.len();
        let mut i = start + 1;
        while i < len {
            match self.input[i] {
                b'\\' => i += 2,
                b'"' => return (i + 1, true),
                _ => i += 1,
            }
        }
        (len, false)
    }

    pub fn next_token(&mut self) -> Token<'s> {
        let input = self.input;
        let start = self.pos;
        let (kind, end) = match input.get(start) {
            None => (TokenKind::EndOfInput, start),
            Some(&b) if is_whitespace(b) || b >= 0x7f => (TokenKind::Invalid, start + 1),
            Some(b'(') => (TokenKind::LeftParen, start + 1),
            Some(b')') => (TokenKind::RightParen, start + 1),
            Some(b'\'') => (TokenKind::Quote, start + 1),
            Some(&b) if b == b'-' || b.is_ascii_digit() =>
                (TokenKind::Integer, Tokenizer::skip_while(self, start + 1, |b| b.is_ascii_digit())),
            Some(b'"') => match self.scan_string(start) {
                (end, true) => (TokenKind::String, end),
                (end, false) => (TokenKind::Invalid, end),
            }
            Some(_) => (TokenKind::Symbol, Tokenizer::skip_while(self, start + 1, is_symbol_byte)),
        };
        self.pos = end;
        self.skip_whitespace();
        let token = Token {
            kind,
            text: &input[start..end],
            offset: start,
        };
        log::trace!("token {:?} {}", kind, token);
        token
    }
}

/// Yields tokens up to, but not including, `EndOfInput`.
impl<'s> Iterator for Tokenizer<'s> {
    type Item = Token<'s>;
    fn next(&mut self) -> Option<Token<'s>> {
        let t = self.next_token();
        if t.kind == TokenKind::EndOfInput {
            None
        } else {
            Some(t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(s: &str) -> Vec<(TokenKind, &str)> {
        Tokenizer::new(s.as_bytes())
            .map(|t| (t.kind, std::str::from_utf8(t.text).unwrap()))
            .collect()
    }

    #[test]
    fn punctuation_and_atoms() {
        use TokenKind::*;
        assert_eq!(kinds_and_texts("  ('foo -12 \"a b\")  "),
                   vec![(LeftParen, "("), (Quote, "'"), (Symbol, "foo"),
                        (Integer, "-12"), (String, "\"a b\""), (RightParen, ")")]);
    }

    #[test]
    fn lone_minus_is_an_integer_token() {
        use TokenKind::*;
        assert_eq!(kinds_and_texts("- -x"),
                   vec![(Integer, "-"), (Integer, "-"), (Symbol, "x")]);
    }

    #[test]
    fn symbols_stop_at_delimiters_only() {
        use TokenKind::*;
        assert_eq!(kinds_and_texts("a'b+c(d\"e\""),
                   vec![(Symbol, "a'b+c"), (LeftParen, "("), (Symbol, "d"),
                        (String, "\"e\"")]);
        assert_eq!(kinds_and_texts("12ab"), vec![(Integer, "12"), (Symbol, "ab")]);
    }

    #[test]
    fn escapes_inside_strings() {
        use TokenKind::*;
        assert_eq!(kinds_and_texts(r#""a\"b" "c\\""#),
                   vec![(String, r#""a\"b""#), (String, r#""c\\""#)]);
    }

    #[test]
    fn unterminated_string_spans_rest() {
        let mut t = Tokenizer::new(b"x \"abc\\\"");
        assert_eq!(t.next_token().kind, TokenKind::Symbol);
        let s = t.next_token();
        assert_eq!(s.kind, TokenKind::Invalid);
        assert_eq!(s.text, b"\"abc\\\"");
        assert_eq!(s.offset, 2);
        assert_eq!(t.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn high_bytes_are_invalid() {
        let mut t = Tokenizer::new(b"\xc3\xa9");
        let a = t.next_token();
        assert_eq!((a.kind, a.text), (TokenKind::Invalid, &b"\xc3"[..]));
        assert_eq!(t.next_token().kind, TokenKind::Invalid);
        assert_eq!(t.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn delete_byte_is_invalid() {
        let mut t = Tokenizer::new(b"a \x7f b");
        assert_eq!(t.next_token().kind, TokenKind::Symbol);
        let d = t.next_token();
        assert_eq!((d.kind, d.text, d.offset), (TokenKind::Invalid, &b"\x7f"[..], 2));
        assert_eq!(t.next_token().kind, TokenKind::Symbol);
        // 0x7f also ends a symbol
        assert_eq!(kinds_and_texts("ab\x7f").len(), 2);
    }

    #[test]
    fn control_bytes_separate_tokens() {
        use TokenKind::*;
        assert_eq!(kinds_and_texts("\x00a\x01b\x1f(c\x0b)\x20"),
                   vec![(Symbol, "a"), (Symbol, "b"), (LeftParen, "("),
                        (Symbol, "c"), (RightParen, ")")]);
    }

    #[test]
    fn end_of_input_repeats() {
        let mut t = Tokenizer::new(b"   ");
        assert_eq!(t.offset(), 3);
        assert!(t.remaining().is_empty());
        for _ in 0..3 {
            let e = t.next_token();
            assert_eq!((e.kind, e.text, e.offset), (TokenKind::EndOfInput, &b""[..], 3));
        }
    }
}
