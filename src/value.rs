// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runtime data types representing an S-expression value, and the
//! arena owning them.

//! Values never own other values directly: a [Pair](Value::Pair)
//! holds two [ValueRef](ValueRef)s, indices into the [Arena](Arena)
//! that allocated it. Slot 0 of every arena is the shared `Nil`, so
//! the empty list is never allocated and all lists end in the same
//! node. Nodes are only ever released together with the whole arena.

use kstring::KString;
use thiserror::Error;

/// Reference to a node in an [Arena](Arena). Only meaningful
/// together with the arena that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRef(u32);

impl ValueRef {
    /// The empty list; valid in every arena.
    pub const NIL: ValueRef = ValueRef(0);

    pub fn is_nil(self) -> bool {
        self == ValueRef::NIL
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Pair(ValueRef, ValueRef),
    /// Decoded contents, i.e. without quotes and escapes
    String(Box<[u8]>),
    Symbol(KString),
    Integer(i64),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("arena exhausted after {0} nodes")]
pub struct AllocError(pub usize);

#[derive(Debug)]
pub struct Arena {
    nodes: Vec<Value>,
    limit: Option<usize>,
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new()
    }
}

impl Arena {
    pub fn new() -> Arena {
        Arena {
            nodes: vec![Value::Nil],
            limit: None,
        }
    }

    /// An arena that refuses to hold more than `max_nodes` allocated
    /// nodes (the shared `Nil` is not counted).
    pub fn with_limit(max_nodes: usize) -> Arena {
        Arena {
            nodes: vec![Value::Nil],
            limit: Some(max_nodes),
        }
    }

    /// Number of allocated nodes, not counting `Nil`.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release all nodes at once. Every `ValueRef` other than `NIL`
    /// handed out before is dangling afterwards.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
    }

    /// # Panics
    ///
    /// If `v` was not handed out by this arena, or was handed out
    /// before the last `clear`, and lies beyond the allocated nodes.
    /// See `try_get` for a checked version.
    pub fn get(&self, v: ValueRef) -> &Value {
        &self.nodes[v.index()]
    }

    /// `None` if `v` lies beyond the allocated nodes. A stale `v` that
    /// still lies within them is not detected.
    pub fn try_get(&self, v: ValueRef) -> Option<&Value> {
        self.nodes.get(v.index())
    }

    fn alloc(&mut self, value: Value) -> Result<ValueRef, AllocError> {
        let n = self.len();
        if let Some(limit) = self.limit {
            if n >= limit {
                return Err(AllocError(n));
            }
        }
        let idx = u32::try_from(self.nodes.len()).map_err(|_| AllocError(n))?;
        self.nodes.try_reserve(1).map_err(|_| AllocError(n))?;
        self.nodes.push(value);
        Ok(ValueRef(idx))
    }

    pub fn pair(&mut self, first: ValueRef, rest: ValueRef)
                -> Result<ValueRef, AllocError> {
        self.alloc(Value::Pair(first, rest))
    }

    /// `s` is the logical (decoded) contents.
    pub fn string(&mut self, s: impl AsRef<[u8]>) -> Result<ValueRef, AllocError> {
        self.alloc(Value::String(s.as_ref().into()))
    }

    pub fn symbol(&mut self, s: &str) -> Result<ValueRef, AllocError> {
        self.alloc(Value::Symbol(KString::from_ref(s)))
    }

    pub fn integer(&mut self, n: i64) -> Result<ValueRef, AllocError> {
        self.alloc(Value::Integer(n))
    }

    /// Build a proper list of the given items, in order.
    pub fn list(&mut self, items: impl IntoIterator<Item = ValueRef>)
                -> Result<ValueRef, AllocError> {
        let mut head = ValueRef::NIL;
        let mut tail = ValueRef::NIL;
        for item in items {
            let cell = self.pair(item, ValueRef::NIL)?;
            if tail.is_nil() {
                head = cell;
            } else {
                self.set_rest(tail, cell);
            }
            tail = cell;
        }
        Ok(head)
    }

    /// Easily create a list with two entries
    pub fn list2(&mut self, a: ValueRef, b: ValueRef)
                 -> Result<ValueRef, AllocError> {
        let rest = self.pair(b, ValueRef::NIL)?;
        self.pair(a, rest)
    }

    /// Link a freshly built cell to its successor. Only used while a
    /// list is under construction; the slot must still be `Nil`.
    pub(crate) fn set_rest(&mut self, cell: ValueRef, rest: ValueRef) {
        match &mut self.nodes[cell.index()] {
            Value::Pair(_, slot) => {
                assert!(slot.is_nil(), "list tail of {:?} already set", cell);
                *slot = rest;
            }
            other => panic!("set_rest on non-pair {:?}", other),
        }
    }

    /// Iterate over the elements of a list. Stops at the first
    /// non-pair, so an improper tail is silently ignored.
    pub fn list_iter(&self, list: ValueRef) -> ListIter<'_> {
        ListIter { arena: self, cur: list }
    }

    /// Structural equality between `a` in this arena and `b` in
    /// `other` (which may be the same arena).
    pub fn equal(&self, a: ValueRef, other: &Arena, b: ValueRef) -> bool {
        match (self.get(a), other.get(b)) {
            (Value::Nil, Value::Nil) => true,
            (Value::Pair(a1, a2), Value::Pair(b1, b2)) =>
                self.equal(*a1, other, *b1) && self.equal(*a2, other, *b2),
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Symbol(x), Value::Symbol(y)) => x == y,
            (Value::Integer(x), Value::Integer(y)) => x == y,
            _ => false,
        }
    }
}

pub struct ListIter<'a> {
    arena: &'a Arena,
    cur: ValueRef,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = ValueRef;
    fn next(&mut self) -> Option<ValueRef> {
        match self.arena.get(self.cur) {
            Value::Pair(first, rest) => {
                self.cur = *rest;
                Some(*first)
            }
            _ => None,
        }
    }
}
