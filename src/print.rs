// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rendering values back to their canonical text.

use crate::value::{Arena, Value, ValueRef};
use std::fmt::{Display, Formatter, Write};

// Short escapes understood by the reader, besides `\"` and `\\`.
fn byte2escape(b: u8) -> Option<char> {
    match b {
        b'\n' => Some('n'),
        b'\t' => Some('t'),
        b'\r' => Some('r'),
        b'\0' => Some('0'),
        0x07 => Some('a'),
        0x08 => Some('b'),
        0x0B => Some('v'),
        0x0C => Some('f'),
        _ => None
    }
}

fn fmt_string(f: &mut Formatter<'_>, s: &[u8]) -> Result<(), std::fmt::Error> {
    f.write_char('"')?;
    for &b in s {
        if b == b'"' || b == b'\\' {
            f.write_char('\\')?;
            f.write_char(b as char)?;
        } else if let Some(c) = byte2escape(b) {
            f.write_char('\\')?;
            f.write_char(c)?;
        } else if (0x20..0x7f).contains(&b) {
            f.write_char(b as char)?;
        } else {
            f.write_fmt(format_args!("\\x{:02x}", b))?;
        }
    }
    f.write_char('"')
}

/// A value together with its arena, for formatting via `Display`.
#[derive(Clone, Copy)]
pub struct Printed<'a> {
    arena: &'a Arena,
    value: ValueRef,
}

impl<'a> Display for Printed<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self.arena.get(self.value) {
            Value::Nil => f.write_str("()"),
            Value::Symbol(s) => f.write_str(s),
            Value::Integer(n) => f.write_fmt(format_args!("{}", n)),
            Value::String(s) => fmt_string(f, s),
            Value::Pair(first, rest) => {
                f.write_char('(')?;
                self.arena.display(*first).fmt(f)?;
                let mut cur = *rest;
                loop {
                    match self.arena.get(cur) {
                        Value::Nil => break,
                        Value::Pair(item, next) => {
                            f.write_char(' ')?;
                            self.arena.display(*item).fmt(f)?;
                            cur = *next;
                        }
                        _ => {
                            // improper tail, never produced by the reader
                            f.write_str(" . ")?;
                            self.arena.display(cur).fmt(f)?;
                            break;
                        }
                    }
                }
                f.write_char(')')
            }
        }
    }
}

impl Arena {
    pub fn display(&self, value: ValueRef) -> Printed<'_> {
        Printed { arena: self, value }
    }
}

pub fn to_string(arena: &Arena, value: ValueRef) -> String {
    arena.display(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_escaped() {
        let mut arena = Arena::new();
        let s = arena.string(b"q\"b\\s\n\t\x01\xff~ ").unwrap();
        assert_eq!(to_string(&arena, s), r#""q\"b\\s\n\t\x01\xff~ ""#);
    }

    #[test]
    fn atoms_and_lists() {
        let mut arena = Arena::new();
        let items = [
            arena.symbol("foo").unwrap(),
            arena.integer(-7).unwrap(),
            ValueRef::NIL,
            arena.string("").unwrap(),
        ];
        let l = arena.list(items).unwrap();
        assert_eq!(to_string(&arena, l), r#"(foo -7 () "")"#);
        assert_eq!(to_string(&arena, ValueRef::NIL), "()");
    }

    #[test]
    fn improper_tail() {
        let mut arena = Arena::new();
        let a = arena.integer(1).unwrap();
        let b = arena.integer(2).unwrap();
        let p = arena.pair(a, b).unwrap();
        assert_eq!(to_string(&arena, p), "(1 . 2)");
    }
}
