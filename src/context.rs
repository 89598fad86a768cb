// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Naming the source an input was read from, for error messages.

use crate::pos::Pos;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    /// Something without a path, like stdin
    Special(String),
}

impl Source {
    /// Location to be put *after* the error reason and a space,
    /// includes "in" or "from".
    pub fn with_pos(&self, pos: Pos) -> WithPos<'_> {
        WithPos(self, pos)
    }
}

/// Location to be put *before* a colon and the error reason.
impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Source::File(path) => f.write_fmt(format_args!("{:?}", path)),
            Source::Special(name) => f.write_fmt(format_args!("({})", name)),
        }
    }
}

pub struct WithPos<'t>(&'t Source, Pos);

impl<'t> Display for WithPos<'t> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self.0 {
            Source::File(_) => f.write_fmt(format_args!("in {}{}", self.0, self.1)),
            Source::Special(_) => f.write_fmt(format_args!("from {}{}", self.0, self.1)),
        }
    }
}
