use kern::display;
use kern::Session;
use std::io::IsTerminal;

/// Run source through the session and print every outcome.
///
/// Values go to stdout, faults to stderr. Returns true if any form faulted.
pub(crate) fn execute_source(session: &mut Session, input: &str, print_values: bool) -> bool {
    let color = std::io::stderr().is_terminal();
    let mut faulted = false;

    for outcome in session.run(input) {
        if outcome.is_fault() {
            faulted = true;
            eprintln!("{}", display::format_outcome(&outcome, color));
        } else if print_values {
            println!("{}", display::format_outcome(&outcome, false));
        }
    }

    faulted
}

/// Check whether every '(' in the input has been closed, ignoring
/// parentheses inside strings and comments. Used to keep reading lines.
pub(crate) fn is_balanced(input: &str) -> bool {
    let mut depth: i64 = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut in_comment = false;

    for c in input.chars() {
        if in_comment {
            if c == '\n' {
                in_comment = false;
            }
            continue;
        }
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            ';' => in_comment = true,
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }

    // Extra ')' is balanced enough: let the parser report it
    depth <= 0 && !in_string
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_inputs() {
        assert!(is_balanced("(+ 1 2)"));
        assert!(is_balanced("\"(\""));
        assert!(is_balanced("(a) ; ("));
        assert!(is_balanced("x)"));
    }

    #[test]
    fn unbalanced_inputs() {
        assert!(!is_balanced("(define (f x)"));
        assert!(!is_balanced("(put \"a"));
        assert!(!is_balanced("(concat \"\\\"\" "));
    }
}
