//! `treenav-copy` - print the text a selection would copy.
//!
//! Usage:
//!   treenav-copy '<selection-request-json>' [indent]
//!
//! The document is read from stdin. The request is the first argument, e.g.
//! `{"anchorPath": ["arr", 0], "focusPath": ["arr", 2]}` or
//! `{"type": "value", "path": ["name"]}`.

use std::io::{self, Read, Write};
use treenav::cli::copy_selection;
use treenav::DEFAULT_INDENT;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let request = match args.get(1) {
        Some(r) => r.clone(),
        None => {
            eprintln!("First argument must be a selection request.");
            std::process::exit(1);
        }
    };
    let indent = match args.get(2).map(|s| s.parse::<usize>()) {
        None => DEFAULT_INDENT,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("Invalid indent: {e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match copy_selection(buf.trim(), &request, indent) {
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
