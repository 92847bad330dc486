// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printers for reporting parameters and warnings.

use std::{
    borrow::Cow,
    sync::{Mutex, MutexGuard},
};

use log::Level;

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNINGS: Mutex<Blocks> = Mutex::new(Blocks::default());
}

/// Groups of lines, drawn as a tree under a title.
#[derive(Default)]
struct Blocks(Vec<Vec<Cow<'static, str>>>);

impl Blocks {
    fn draw(&self, title: &str, level: Level) {
        log::log!(level, "{}", console::style(title).bold());
        let num_blocks = self.0.len();
        for (i_block, block) in self.0.iter().enumerate() {
            let last_block = i_block + 1 == num_blocks;
            for (i_line, line) in block.iter().enumerate() {
                let symbol = match (i_line, last_block && block.len() == 1) {
                    (0, true) => UP_AND_RIGHT,
                    (0, false) => VERTICAL_AND_RIGHT,
                    _ => VERTICAL,
                };
                log::log!(level, "{symbol} {line}");
            }
        }
        log::log!(level, "");
    }
}

/// Collects information on parsed parameters and prints it at info level.
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Blocks,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: Blocks::default(),
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.0.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.0.push(block);
    }

    pub(crate) fn display(self) {
        self.blocks.draw(&self.title, Level::Info);
    }
}

fn warnings() -> MutexGuard<'static, Blocks> {
    // A poisoned lock still holds usable warnings.
    WARNINGS.lock().unwrap_or_else(|e| e.into_inner())
}

/// Things that can be queued up as a warning for the user.
pub(crate) trait Warn {
    fn warn(self);
}

impl Warn for &'static str {
    fn warn(self) {
        warnings().0.push(vec![self.into()]);
    }
}

impl Warn for String {
    fn warn(self) {
        warnings().0.push(vec![self.into()]);
    }
}

impl Warn for Vec<Cow<'static, str>> {
    fn warn(self) {
        warnings().0.push(self);
    }
}

/// Print out any warnings that have been collected while arguments were
/// parsed, then forget them.
pub(crate) fn display_warnings() {
    let mut blocks = warnings();
    if blocks.0.is_empty() {
        return;
    }
    blocks.draw("Warnings", Level::Warn);
    blocks.0.clear();
}
