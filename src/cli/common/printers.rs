// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tree-shaped summaries of a run, and a place to collect warnings until
//! they can be shown together.

use std::{borrow::Cow, sync::Mutex};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref PENDING_WARNINGS: Mutex<Vec<Vec<Cow<'static, str>>>> = Mutex::new(vec![]);
}

pub(super) type Block = Vec<Cow<'static, str>>;

/// Prefix every line of `blocks` with a tree glyph. The first line of a block
/// gets a branch, except in the last single-line block, where the tree ends.
pub(super) fn tree_lines(blocks: &[Block]) -> Vec<String> {
    let num_blocks = blocks.len();
    let mut lines = vec![];
    for (i_block, block) in blocks.iter().enumerate() {
        let last_block = i_block + 1 == num_blocks;
        for (i_line, line) in block.iter().enumerate() {
            let last_line = i_line + 1 == block.len();
            let glyph = match (i_line, last_line && last_block) {
                (0, true) => UP_AND_RIGHT,
                (0, false) => VERTICAL_AND_RIGHT,
                _ => VERTICAL,
            };
            lines.push(format!("{glyph} {line}"));
        }
    }
    lines
}

/// Collects what a subcommand is about to do, then logs it as a titled tree.
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Block>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        for line in tree_lines(&self.blocks) {
            log::info!("{line}");
        }
        log::info!("");
    }
}

/// Something that can be queued as a warning.
pub(crate) trait Warn {
    fn warn(self);
}

fn queue(block: Block) {
    match PENDING_WARNINGS.lock() {
        Ok(mut pending) => pending.push(block),
        // A poisoned lock means another thread panicked; don't lose the
        // warning.
        Err(_) => block.iter().for_each(|line| log::warn!("{line}")),
    }
}

impl Warn for &'static str {
    fn warn(self) {
        queue(vec![self.into()]);
    }
}

impl Warn for String {
    fn warn(self) {
        queue(vec![self.into()]);
    }
}

impl Warn for Block {
    fn warn(self) {
        queue(self);
    }
}

/// Log every queued warning as one block and forget them. Subcommands call
/// this once their arguments have been turned into parameters.
pub(crate) fn display_warnings() {
    let blocks = match PENDING_WARNINGS.lock() {
        Ok(mut pending) => std::mem::take(&mut *pending),
        Err(_) => return,
    };
    log::debug!("Displaying {} warnings", blocks.len());
    if blocks.is_empty() {
        return;
    }

    log::warn!("{}", console::style("Warnings").bold());
    for line in tree_lines(&blocks) {
        log::warn!("{line}");
    }
    log::warn!("");
}
