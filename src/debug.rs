//! The interactive step debugger.
//!
//! A thin controller around array execution: before each child statement
//! runs, the debugger decides whether to stop based on the current array
//! nesting depth and the breakpoint set, prints the source line to standard
//! error and reads single-letter commands from standard input.

use std::collections::HashSet;
use std::io::{BufRead, Write};

use crate::diag::{Diags, Range, RuntimeError};
use crate::parser;
use crate::runtime::{from_ast, Array};

pub struct Debugger {
    lines: Vec<String>,
    breakpoints: HashSet<usize>,
    /// Stop whenever the nesting depth is at or below this. `None` means
    /// run until a breakpoint.
    stop_depth: Option<i64>,
    depth: i64,
}

impl Debugger {
    /// A debugger that stops at the very first statement.
    pub fn new(src_code: &str) -> Debugger {
        Debugger {
            lines: src_code.lines().map(str::to_owned).collect(),
            breakpoints: HashSet::new(),
            stop_depth: Some(i64::max_value()),
            depth: 0,
        }
    }

    pub(crate) fn enter_array(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn exit_array(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn break_before(
        &mut self,
        gca: &Array,
        range: Range,
        input: &mut dyn BufRead,
        err: &mut dyn Write,
    ) -> Result<(), RuntimeError> {
        let line = range.start.line;
        let stop = self.stop_depth.map_or(false, |depth| self.depth <= depth)
            || self.breakpoints.contains(&(line + 1));
        if !stop {
            return Ok(());
        }

        let text = self.lines.get(line).map(String::as_str).unwrap_or("");
        writeln!(err, "{}: {}", line + 1, text)?;

        loop {
            write!(err, "> ")?;
            let mut command = String::new();
            if input.read_line(&mut command)? == 0 {
                // end of input behaves like continue
                self.stop_depth = None;
                return Ok(());
            }
            let command = command.trim();

            if command == "i" {
                self.stop_depth = Some(self.depth + 1);
                return Ok(());
            } else if command == "o" {
                self.stop_depth = Some(self.depth - 1);
                return Ok(());
            } else if command == "n" {
                self.stop_depth = Some(self.depth);
                return Ok(());
            } else if command == "c" {
                self.stop_depth = None;
                return Ok(());
            } else if let Some(argument) = command.strip_prefix("b ") {
                match argument.trim().parse::<usize>() {
                    Ok(line) => {
                        self.breakpoints.insert(line);
                    }
                    Err(_) => writeln!(err, "Breakpoint requires a line number.")?,
                }
            } else if let Some(expression) = command.strip_prefix("e ") {
                evaluate_expression(expression, gca, err)?;
            } else if command == "g" {
                dump_gca(gca, err)?;
            } else if command.is_empty() {
                continue;
            } else {
                writeln!(err, "Unrecognized command.")?;
            }
        }
    }
}

/// Parses and evaluates an ad-hoc expression against the global circular
/// array, printing the result or whatever went wrong.
fn evaluate_expression(
    expression: &str,
    gca: &Array,
    err: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let mut diags = Diags::new();
    match parser::parse_expression(expression, &mut diags) {
        Some(node) => match from_ast(node).evaluate(gca) {
            Ok(obj) => writeln!(err, "{}", obj)?,
            Err(error) => writeln!(err, "{}", error)?,
        },
        None => write!(err, "{}", diags)?,
    }
    Ok(())
}

fn dump_gca(gca: &Array, err: &mut dyn Write) -> Result<(), RuntimeError> {
    let mut cells: Vec<String> = gca
        .cells()
        .map(|(index, obj)| format!("{} := {}", index.value(), obj))
        .collect();
    cells.sort();
    for cell in cells {
        writeln!(err, "{}", cell)?;
    }
    Ok(())
}
