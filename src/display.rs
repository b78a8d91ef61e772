//! Display formatting for evaluation outcomes
//!
//! Values print in their readable form. Faults print as
//! `Error[Kind]: message`, in red when writing to a terminal.

use crate::eval::Fault;
use crate::executor::Outcome;

/// Format an outcome for terminal display
pub fn format_outcome(outcome: &Outcome, color: bool) -> String {
    match outcome {
        Outcome::Value(v) => v.to_string(),
        Outcome::Fault(f) => format_fault(f, color),
    }
}

/// Format a fault as a one-line diagnostic
pub fn format_fault(fault: &Fault, color: bool) -> String {
    if color {
        format!("\x1b[31mError[{}]\x1b[0m: {}", fault.kind(), fault)
    } else {
        format!("Error[{}]: {}", fault.kind(), fault)
    }
}
