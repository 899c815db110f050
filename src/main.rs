//! codetempl binary

use codetempl::Cli;
use std::process;

fn main() {
    let mut cli = Cli::new();

    match cli.run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
