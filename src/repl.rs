use kern::eval::builtin_names;
use kern::{Config, Session};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::print_help;
use crate::rcfile::load_prelude;
use crate::terminal::{execute_source, is_balanced};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const PROMPT: &str = "kern> ";
const CONTINUATION: &str = "  ... ";

/// Handle a dot-command. Returns false if the line is not one.
fn repl_command(line: &str) -> bool {
    match line {
        ".help" | ".h" => {
            print_help();
            true
        }
        ".builtins" | ".b" => {
            let names: Vec<&str> = builtin_names().collect();
            println!("{}", names.join(" "));
            true
        }
        _ => false,
    }
}

pub(crate) fn run_repl(session: &mut Session, config: &Config) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;

    if let Some(path) = &config.history_file {
        let _ = rl.load_history(path);
    }

    load_prelude(session, config);

    if config.banner {
        println!("kern-{} (.help for help, exit to quit)", VERSION);
    }

    // Lines accumulate until parentheses balance
    let mut pending = String::new();

    loop {
        let prompt = if pending.is_empty() { PROMPT } else { CONTINUATION };
        match rl.readline(prompt) {
            Ok(line) => {
                if pending.is_empty() {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if trimmed == "exit" || trimmed == "quit" {
                        break;
                    }
                    if repl_command(trimmed) {
                        continue;
                    }
                }

                pending.push_str(&line);
                pending.push('\n');
                if !is_balanced(&pending) {
                    continue;
                }

                let _ = rl.add_history_entry(pending.trim_end());
                execute_source(session, &pending, true);
                pending.clear();
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C drops a half-typed form
                pending.clear();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = &config.history_file {
        let _ = rl.save_history(path);
    }

    Ok(())
}
