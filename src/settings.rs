// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for reading (parsing) data.

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    /// How many levels of nested lists and quotes the parser may
    /// descend into before giving up with `NestingTooDeep`.
    pub depth_fuel: u32,
}

pub const DEFAULT_SETTINGS : Settings = Settings {
    depth_fuel: 500,
};

impl Default for Settings {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}
