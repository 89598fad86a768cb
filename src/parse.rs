// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building a value tree from the token stream of
//! [token](../token/index.html). The whole input is read as the
//! elements of one implicit top-level list, terminated by the end of
//! input instead of a closing paren.
//!
//! String literals are decoded here: `\"`, `\\`, `\n`, `\t`, `\r`,
//! `\0`, `\a`, `\b`, `\v`, `\f` and `\xHH` become the bytes they
//! stand for, any other escaped byte stands for itself. This is the
//! inverse of what [print](../print/index.html) emits.

use crate::pos::Pos;
use crate::settings::{Settings, DEFAULT_SETTINGS};
use crate::token::{Token, TokenKind, Tokenizer};
use crate::value::{AllocError, Arena, ValueRef};
use kstring::KString;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("invalid token")]
    InvalidToken,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("integer literal out of range or malformed")]
    NumericOverflow,
    #[error("out of memory")]
    OutOfMemory,
    #[error("nesting too deep")]
    NestingTooDeep,
}

impl From<AllocError> for ParseError {
    fn from(_: AllocError) -> ParseError {
        ParseError::OutOfMemory
    }
}

/// A `ParseError` together with the token that caused it.
#[derive(Error, Debug)]
pub struct ParseErrorWithPos {
    pub err: ParseError,
    /// Raw text of the offending token (lossily decoded)
    pub text: KString,
    /// Byte offset of the offending token
    pub offset: usize,
    pub pos: Pos,
}

impl Display for ParseErrorWithPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        if self.text.is_empty() {
            f.write_fmt(format_args!("{} {}", self.err, self.pos))
        } else {
            f.write_fmt(format_args!("{} '{}' {}", self.err, self.text, self.pos))
        }
    }
}

impl ParseError {
    fn at(self, t: &Token<'_>, input: &[u8]) -> ParseErrorWithPos {
        ParseErrorWithPos {
            err: self,
            text: KString::from_string(String::from_utf8_lossy(t.text).into_owned()),
            offset: t.offset,
            pos: Pos::from_offset(input, t.offset),
        }
    }
}

trait At<T> {
    fn at(self, t: &Token<'_>, input: &[u8]) -> Result<T, ParseErrorWithPos>;
}

impl<T, E: Into<ParseError>> At<T> for Result<T, E> {
    fn at(self, t: &Token<'_>, input: &[u8]) -> Result<T, ParseErrorWithPos> {
        self.map_err(|e| {
            let e: ParseError = e.into();
            e.at(t, input)
        })
    }
}

fn read_integer(text: &[u8]) -> Option<i64> {
    std::str::from_utf8(text).ok()?.parse().ok()
}

fn parse_hexdigit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

fn parse_hexbyte(s: Option<&[u8]>) -> Option<u8> {
    let s = s?;
    Some(parse_hexdigit(s[0])? * 16 + parse_hexdigit(s[1])?)
}

/// Decode the contents of a string literal (without its quotes).
pub fn unescape(s: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        let b = s[i];
        i += 1;
        if b != b'\\' || i == s.len() {
            out.push(b);
            continue;
        }
        let c = s[i];
        i += 1;
        let decoded = match c {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'0' => b'\0',
            b'a' => 0x07, // alarm
            b'b' => 0x08, // backspace
            b'v' => 0x0B,
            b'f' => 0x0C,
            b'x' => match parse_hexbyte(s.get(i..i + 2)) {
                Some(v) => {
                    i += 2;
                    v
                }
                None => b'x',
            },
            // \" \\ and everything unknown
            _ => c,
        };
        out.push(decoded);
    }
    out
}

struct Parser<'a, 's> {
    arena: &'a mut Arena,
    input: &'s [u8],
    tokens: Tokenizer<'s>,
}

impl<'a, 's> Parser<'a, 's> {
    // Read values up to the `end` token and link them into a proper
    // list, front to back.
    fn parse_list(&mut self, end: TokenKind, depth_fuel: u32)
                  -> Result<ValueRef, ParseErrorWithPos> {
        let mut head = ValueRef::NIL;
        let mut tail = ValueRef::NIL;
        loop {
            let token = self.tokens.next_token();
            if token.kind == end {
                return Ok(head);
            }
            let v = self.parse_value(token, depth_fuel)?;
            let cell = self.arena.pair(v, ValueRef::NIL).at(&token, self.input)?;
            if tail.is_nil() {
                head = cell;
            } else {
                self.arena.set_rest(tail, cell);
            }
            tail = cell;
        }
    }

    fn parse_value(&mut self, token: Token<'s>, depth_fuel: u32)
                   -> Result<ValueRef, ParseErrorWithPos> {
        let input = self.input;
        match token.kind {
            TokenKind::EndOfInput =>
                Err(ParseError::EndOfInput.at(&token, input)),
            TokenKind::Invalid =>
                Err(ParseError::InvalidToken.at(&token, input)),
            TokenKind::RightParen =>
                Err(ParseError::UnexpectedToken.at(&token, input)),
            TokenKind::LeftParen => {
                if depth_fuel == 0 {
                    return Err(ParseError::NestingTooDeep.at(&token, input));
                }
                self.parse_list(TokenKind::RightParen, depth_fuel - 1)
            }
            TokenKind::Quote => {
                if depth_fuel == 0 {
                    return Err(ParseError::NestingTooDeep.at(&token, input));
                }
                let next = self.tokens.next_token();
                let v = self.parse_value(next, depth_fuel - 1)?;
                let quote = self.arena.symbol("quote").at(&token, input)?;
                self.arena.list2(quote, v).at(&token, input)
            }
            TokenKind::Integer => {
                let n = read_integer(token.text)
                    .ok_or(ParseError::NumericOverflow)
                    .at(&token, input)?;
                self.arena.integer(n).at(&token, input)
            }
            TokenKind::String => {
                let body = &token.text[1..token.text.len() - 1];
                self.arena.string(unescape(body)).at(&token, input)
            }
            TokenKind::Symbol => {
                let s = std::str::from_utf8(token.text)
                    .map_err(|_| ParseError::InvalidToken)
                    .at(&token, input)?;
                self.arena.symbol(s).at(&token, input)
            }
        }
    }
}

/// Parse all of `input` into a list of its top-level forms, with the
/// nodes allocated in `arena`. On error, nodes allocated so far stay
/// in the arena but are unreachable from any result.
pub fn parse_with(
    arena: &mut Arena,
    input: &[u8],
    settings: &Settings,
) -> Result<ValueRef, ParseErrorWithPos> {
    let nodes_before = arena.len();
    let mut parser = Parser {
        arena,
        input,
        tokens: Tokenizer::new(input),
    };
    match parser.parse_list(TokenKind::EndOfInput, settings.depth_fuel) {
        Ok(v) => {
            log::debug!("parsed {} bytes into {} nodes",
                        input.len(), parser.arena.len() - nodes_before);
            Ok(v)
        }
        Err(e) => {
            log::debug!("parse failed: {}", e);
            Err(e)
        }
    }
}

pub fn parse(arena: &mut Arena, input: &[u8]) -> Result<ValueRef, ParseErrorWithPos> {
    parse_with(arena, input, &DEFAULT_SETTINGS)
}
