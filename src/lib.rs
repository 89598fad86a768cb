// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A small S-Expression reader and printer. The notation knows
//! lists, symbols, strings, integers and the `'x` shorthand for
//! `(quote x)`; nothing else.
//!
//! * [token](token/index.html) classifies the input bytes into
//!   tokens, [parse](parse/index.html) builds cons-cell trees from
//!   them, [print](print/index.html) renders trees back to text that
//!   reads as the same tree.
//!
//! * All nodes live in an [Arena](value::Arena) and are referred to by
//!   [ValueRef](value::ValueRef); the empty list is a single shared
//!   slot. Nodes are never freed one by one, drop or clear the arena
//!   instead.
//!
//! * Reading stops at the first error. There is no error recovery and
//!   no streaming; [read](read/index.html) slurps whole files.
//!
//! ```
//! use tinysexpr::{parse::parse, print::to_string, value::Arena};
//!
//! let mut arena = Arena::new();
//! let forms = parse(&mut arena, b"(a 'b) \"c\" -1").unwrap();
//! assert_eq!(to_string(&arena, forms), "((a (quote b)) \"c\" -1)");
//! ```

pub mod context;
pub mod debug;
pub mod parse;
pub mod pos;
pub mod print;
pub mod read;
pub mod settings;
pub mod token;
pub mod value;
