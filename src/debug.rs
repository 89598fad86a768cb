// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Utilities for debugging the reader

use crate::value::{AllocError, Arena, Value, ValueRef};

impl Arena {
    /// Build a tree spelling out the structure of `v`: lists become
    /// `(list ...)`, strings and symbols `(string ...)` and `(symbol
    /// ...)` holding their byte values, integers `(integer n)`.
    pub fn dump(&mut self, v: ValueRef) -> Result<ValueRef, AllocError> {
        match self.get(v).clone() {
            Value::Nil => {
                let tag = self.symbol("list")?;
                self.pair(tag, ValueRef::NIL)
            }
            Value::Pair(..) => {
                let elements: Vec<ValueRef> = self.list_iter(v).collect();
                let mut dumped = Vec::with_capacity(elements.len() + 1);
                dumped.push(self.symbol("list")?);
                for e in elements {
                    dumped.push(self.dump(e)?);
                }
                self.list(dumped)
            }
            Value::String(s) => self.listn("string", &s),
            Value::Symbol(s) => self.listn("symbol", s.as_bytes()),
            Value::Integer(_) => {
                let tag = self.symbol("integer")?;
                self.list2(tag, v)
            }
        }
    }

    /// Dump each element of the top-level list `forms` on its own, so
    /// that `write_all` prints one dump per form.
    pub fn dump_forms(&mut self, forms: ValueRef) -> Result<ValueRef, AllocError> {
        let elements: Vec<ValueRef> = self.list_iter(forms).collect();
        let mut dumped = Vec::with_capacity(elements.len());
        for e in elements {
            dumped.push(self.dump(e)?);
        }
        self.list(dumped)
    }

    fn listn(&mut self, symname: &str, bytes: &[u8]) -> Result<ValueRef, AllocError> {
        let mut vals = Vec::with_capacity(bytes.len() + 1);
        vals.push(self.symbol(symname)?);
        for &b in bytes {
            vals.push(self.integer(i64::from(b))?);
        }
        self.list(vals)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;
    use crate::print::to_string;
    use crate::read::write_all;
    use crate::value::Arena;

    #[test]
    fn dump() {
        let mut arena = Arena::new();
        let v = parse(&mut arena, b"(ab \"\\n\" -3 ())").unwrap();
        let d = arena.dump(v).unwrap();
        assert_eq!(to_string(&arena, d),
                   "(list (list (symbol 97 98) (string 10) (integer -3) (list)))");
    }

    #[test]
    fn dump_forms_one_per_form() {
        let mut arena = Arena::new();
        let forms = parse(&mut arena, b"(a \"b\" 1) x").unwrap();
        let d = arena.dump_forms(forms).unwrap();
        let mut out = Vec::<u8>::new();
        write_all(&mut out, &arena, d).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(),
                   "(list (symbol 97) (string 98) (integer 1))\n\n(symbol 120)\n");

        let forms = parse(&mut arena, b"  ").unwrap();
        let d = arena.dump_forms(forms).unwrap();
        let mut out = Vec::<u8>::new();
        write_all(&mut out, &arena, d).unwrap();
        assert!(out.is_empty());
    }
}
