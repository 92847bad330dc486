// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The hera-skymask binary.

use clap::Parser;

use hera_skymask::Skymask;

fn main() {
    if let Err(e) = Skymask::parse().run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
