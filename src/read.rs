// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading whole inputs from files or other `Read` sources, and
//! writing top-level forms out again.

use crate::context::Source;
use crate::parse::{parse, ParseErrorWithPos};
use crate::value::{Arena, ValueRef};
use std::fmt::{Display, Formatter};
use std::io::{Read, Write};
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{0}")]
    PE(#[from] ParseErrorWithPos),
    #[error("{0}")]
    IO(#[from] std::io::Error),
}

/// A parse error with the source it happened in.
#[derive(Error, Debug)]
pub struct ParseErrorWithSource {
    pub err_with_pos: ParseErrorWithPos,
    pub origin: Source,
}

impl Display for ParseErrorWithSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        let e = &self.err_with_pos;
        f.write_fmt(format_args!("{} ", e.err))?;
        if !e.text.is_empty() {
            f.write_fmt(format_args!("'{}' ", e.text))?;
        }
        self.origin.with_pos(e.pos).fmt(f)
    }
}

#[derive(Error, Debug)]
pub enum ReadErrorWithLocation {
    #[error("{0}")]
    PC(Box<ParseErrorWithSource>),
    #[error("{1}: {0}")]
    IO(std::io::Error, Source),
}

impl ReadError {
    fn with_source(self, source: Source) -> ReadErrorWithLocation {
        match self {
            ReadError::PE(err_with_pos) => ReadErrorWithLocation::PC(
                Box::new(ParseErrorWithSource { err_with_pos, origin: source })),
            ReadError::IO(e) => ReadErrorWithLocation::IO(e, source),
        }
    }
}

/// Slurp in all of `fh` and parse it as a list of top-level forms.
pub fn read_all(
    fh: impl Read,
    arena: &mut Arena,
) -> Result<ValueRef, ReadError>
{
    let mut fh = fh;
    let mut buf = Vec::new();
    fh.read_to_end(&mut buf)?;
    Ok(parse(arena, &buf)?)
}

/// Same as `read_all`, but errors mention `source`.
pub fn read_from(
    fh: impl Read,
    arena: &mut Arena,
    source: Source,
) -> Result<ValueRef, ReadErrorWithLocation>
{
    read_all(fh, arena).map_err(|e| e.with_source(source))
}

pub fn read_file(path: &Path, arena: &mut Arena)
                 -> Result<ValueRef, ReadErrorWithLocation> {
    let source = Source::File(path.to_path_buf());
    match File::open(path) {
        Ok(fh) => read_from(fh, arena, source),
        Err(e) => Err(ReadErrorWithLocation::IO(e, source)),
    }
}

/// Write each element of the top-level list `forms`, separated by an
/// empty line.
pub fn write_all(
    out: impl Write,
    arena: &Arena,
    forms: ValueRef,
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    let mut seen_item = false;
    for v in arena.list_iter(forms) {
        write!(out, "{}{}\n", if seen_item {"\n"} else {""}, arena.display(v))?;
        seen_item = true;
    }
    out.flush()
}

pub fn write_file(path: &Path, arena: &Arena, forms: ValueRef)
                  -> Result<(), std::io::Error> {
    write_all(File::create(path)?, arena, forms)
}
