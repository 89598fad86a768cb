// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use tinysexpr::context::Source;
use tinysexpr::pos::Pos;
use tinysexpr::read::{read_file, read_from, write_all};
use tinysexpr::token::{TokenKind, Tokenizer};
use tinysexpr::value::{Arena, ValueRef};
use clap::Parser as ClapParser;
use std::io::{stdin, stdout, BufWriter, Read};
use std::path::PathBuf;
use anyhow::{Result, bail};


fn indentstr(i: usize) -> Option<&'static str> {
    "                                                                  ".get(0..i)
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Build up a tree of all content (default: stream tokens)
    #[clap(short, long, value_parser)]
    ast: bool,
    /// Print the parsed data
    #[clap(long, value_parser)]
    print: bool,
    /// Print the structure dump of the tree (only with --ast)
    #[clap(short, long, value_parser)]
    dump: bool,
    /// Show the token position (only with --print and no --ast)
    #[clap(long, value_parser)]
    pos: bool,
    /// Maximum number of nodes to allocate (only with --ast)
    #[clap(long, value_parser)]
    max_nodes: Option<usize>,
    /// Path to the input file, `-` for stdin
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let is_stdin = args.input_path.as_os_str() == "-";

    if args.ast {

        // Slurp in the whole input as one top-level list, then
        // optionally print it.

        let mut arena = match args.max_nodes {
            Some(n) => Arena::with_limit(n),
            None => Arena::new(),
        };
        let forms: ValueRef = if is_stdin {
            read_from(stdin(), &mut arena, Source::Special("stdin".into()))?
        } else {
            read_file(&args.input_path, &mut arena)?
        };
        let forms = if args.dump { arena.dump_forms(forms)? } else { forms };
        if args.print || args.dump {
            write_all(BufWriter::new(stdout()), &arena, forms)?;
        }
        log::info!("{} nodes allocated", arena.len());

    } else {

        // Walk the token stream and just do some bookkeeping and
        // optionally print the tokens.

        let mut input = Vec::new();
        if is_stdin {
            stdin().read_to_end(&mut input)?;
        } else {
            input = std::fs::read(&args.input_path)?;
        }
        let mut count_toplevel = 0;
        let mut count_enter = 0;
        let mut depth: usize = 0;
        let mut pos = Pos { line: 0, col: 0 };
        let mut last_offset = 0;
        for token in Tokenizer::new(&input) {
            pos.advance(&input[last_offset..token.offset]);
            last_offset = token.offset;
            let indentlevel;
            match token.kind {
                TokenKind::LeftParen => {
                    count_enter += 1;
                    if depth == 0 {
                        count_toplevel += 1;
                    }
                    indentlevel = depth;
                    depth += 1;
                }
                TokenKind::RightParen => {
                    if depth == 0 {
                        bail!("unexpected closing character ')' at {:?}{}",
                              args.input_path, pos)
                    }
                    depth -= 1;
                    indentlevel = depth;
                }
                TokenKind::Quote => {
                    // the quoted value is counted instead
                    indentlevel = depth;
                }
                TokenKind::Invalid => {
                    bail!("invalid token '{}' at {:?}{}",
                          token, args.input_path, pos)
                }
                _ => {
                    if depth == 0 {
                        count_toplevel += 1;
                    }
                    indentlevel = depth;
                }
            }
            if args.print {
                if let Some(indent) = indentstr(indentlevel) {
                    if args.pos {
                        println!("{indent}{pos} {token}");
                    } else {
                        println!("{indent}{token}");
                    }
                } else {
                    bail!("lists nested too deeply at {:?}{}", args.input_path, pos)
                }
            }
        }
        println!(";; count_toplevel = {count_toplevel}, count_enter = {count_enter}");

    }
    Ok(())
}
