//! `treenav-patch-select` - apply a JSON Patch and print the selection an
//! editor would show afterwards.
//!
//! Usage:
//!   treenav-patch-select '<patch-array-json>'
//!
//! The document is read from stdin. The patch operations are the first
//! argument. Prints `null` when the patch leaves nothing to select.

use std::io::{self, Read, Write};
use treenav::cli::patch_select;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let patch = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprintln!("First argument must be a JSON patch array.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match patch_select(buf.trim(), &patch) {
        Ok(result) => {
            let mut out = io::stdout().lock();
            if let Err(e) = writeln!(out, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
