//! Interactive REPL over a single emulated session.
//!
//! Reads one line at a time from stdin, prints the prompt and command
//! output, and exits on EOF or `exit`. `TAB` completion is not wired
//! here; pass a partial line prefixed with `?` to see what the
//! predictor would suggest.

use std::io::{self, BufRead, Write};

use mirage_shell::{Session, SubmitOutcome};
use mirage_types::SessionConfig;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = match std::env::var("MIRAGE_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)?;
            match SessionConfig::from_toml_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("mirage: {e}");
                    std::process::exit(2);
                }
            }
        }
        Err(_) => SessionConfig::default(),
    };

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{}", session.prompt());
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed == "exit" || trimmed == "logout" {
            break;
        }

        if let Some(partial) = trimmed.strip_prefix('?') {
            match session.suggest(partial) {
                Some(suggestion) => println!("suggestion: {suggestion}"),
                None => println!("no suggestion"),
            }
        } else {
            match session.submit(&line) {
                SubmitOutcome::Executed(record) => {
                    if !record.output.is_empty() {
                        println!("{}", record.output);
                    }
                }
                SubmitOutcome::Cleared => {
                    // A real terminal would wipe the screen here.
                    print!("\x1b[2J\x1b[H");
                }
                SubmitOutcome::Empty | SubmitOutcome::Busy => {}
            }
        }

        print!("{}", session.prompt());
        stdout.flush()?;
    }

    println!();
    Ok(())
}
