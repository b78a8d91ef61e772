use crate::terminal::execute_source;
use kern::Session;
use std::fs;
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "-c" => {
                // Everything after -c is the source
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                if !path.starts_with('-') {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    cli
}

pub(crate) fn print_help() {
    println!(
        r#"kern-{} - a small evaluator with file and network effects

USAGE:
    kern                    Start interactive REPL
    kern -c <forms>         Evaluate forms and print each result
    kern <script.kern>      Run a script file
    kern --help             Show this help message
    kern --version          Show version

STARTUP:
    ~/.kern/config.toml     Configuration (KERN_CONFIG overrides the path)
    ~/.kernrc               Forms run on REPL startup (if exists)
    KERN_LOG=debug          Diagnostic tracing on stderr
    KERN_MAX_DEPTH=N        Recursion limit
    KERN_BANNER=1           Show startup banner

SYNTAX:
    42  -1.5  +inf.0        Numbers
    "text\n"                Strings (escapes: \" \\ \n \t \r)
    #t  #f                  Booleans
    name                    Symbol (looked up when evaluated)
    (f a b)                 Call f with a and b
    'datum                  Quote: (quote datum)
    ; comment               Ignored to end of line

FORMS:
    (define name expr)      Bind at top level
    (define (f x) body)     Define a function
    (lambda (x) body)       Anonymous function
    (let ((x 1)) body)      Local bindings
    (if c then else)        Conditional (only #f is false)
    (begin a b ...)         Sequence, value of the last
    (load "file.kern")      Run a file's forms at top level

EFFECTS:
    (slurp path)            Read a whole file (IOFailure if missing)
    (put path text)         Write (truncate) and return text
    (append path text)      Append and return text
    (fileExists path)       #t or #f, never fails for a missing file
    (wslurp url)            GET a URL, return the body

CODEC:
    (show value)            Value to text; functions cannot be shown
    (parse text)            Text to value
    (eval value)            Evaluate a value as code

EXAMPLES:
    (put "tmp1" (show (list 1 2 3)))
    (parse (slurp "tmp1"))                 ; => (1 2 3)
    (eval (parse (slurp "expr.kern")))

REPL COMMANDS:
    .help, .h               Show this help
    .builtins, .b           List builtin primitives
    exit, quit              Exit the REPL
"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("kern-{}", VERSION);
}

/// Run forms given with -c
pub(crate) fn run_command(session: &mut Session, source: &str) -> ExitCode {
    if execute_source(session, source, true) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Run a script file. Every form runs; exit code 1 if any faulted.
pub(crate) fn run_script(session: &mut Session, path: &str) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::from(1);
        }
    };

    if execute_source(session, &content, false) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn command_takes_rest() {
        let cli = parse_args(&args(&["kern", "-c", "(+", "1", "2)"]));
        assert_eq!(cli.command.as_deref(), Some("(+ 1 2)"));
    }

    #[test]
    fn script_path() {
        let cli = parse_args(&args(&["kern", "prog.kern"]));
        assert_eq!(cli.script.as_deref(), Some("prog.kern"));
    }

    #[test]
    fn flags() {
        let cli = parse_args(&args(&["kern", "--help", "-V"]));
        assert!(cli.help);
        assert!(cli.version);
    }
}
