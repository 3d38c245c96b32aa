//! Source positions, diagnostics and runtime errors.
//!
//! Positions are zero indexed internally; the rendered form is one based
//! with an exclusive end column, e.g. `2:15-2:16` for a two character token
//! starting at line 2, column 15.

use std::fmt;
use std::io;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Range {
        Range {
            start: Position {
                line: start.0,
                column: start.1,
            },
            end: Position {
                line: end.0,
                column: end.1,
            },
        }
    }

    /// Spans from the start of `self` to the end of `other`.
    pub fn to(self, other: Range) -> Range {
        Range {
            start: self.start,
            end: other.end,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line + 1,
            self.start.column + 1,
            self.end.line + 1,
            self.end.column
        )
    }
}

/// A value paired with the source range it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct WithInfo<T> {
    pub range: Range,
    pub t: T,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub range: Range,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let level = match self.level {
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        };
        write!(f, "[{}] {}: {}", level, self.range, self.message)
    }
}

/// The diagnostic bag shared by the lexer and the parser passes.
#[derive(Debug, Default)]
pub struct Diags {
    diagnostics: Vec<Diagnostic>,
}

impl Diags {
    pub fn new() -> Diags {
        Diags::default()
    }

    pub fn error(&mut self, range: Range, message: String) {
        self.diagnostics.push(Diagnostic {
            level: Level::Error,
            range,
            message,
        });
    }

    pub fn warning(&mut self, range: Range, message: String) {
        self.diagnostics.push(Diagnostic {
            level: Level::Warning,
            range,
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for Diags {
    /// Renders every diagnostic sorted by start position, one per line.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sorted: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        sorted.sort_by_key(|d| d.range.start);
        for diagnostic in sorted {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

/// Raised from deep inside `execute`/`evaluate`, caught once in
/// `Runtime::run`.
#[derive(Debug)]
pub enum RuntimeError {
    IndexNonArray(Range),
    IndexNonNumber(Range),
    OperateNonNumber(Range),
    DivisionByZero(Range),
    OutOfPiDigits(Range),
    OutputNotNumber,
    OutputNotPi,
    OutputNotAscii,
    DecomposeNotNumber,
    Io(io::Error),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::IndexNonArray(range) => {
                write!(f, "{} Attempting to index non array object.", range)
            }
            RuntimeError::IndexNonNumber(range) => {
                write!(f, "{} Attempting to index an array with a non number.", range)
            }
            RuntimeError::OperateNonNumber(range) => {
                write!(f, "{} Can not operate on non number", range)
            }
            RuntimeError::DivisionByZero(range) => write!(f, "{} Division by zero.", range),
            RuntimeError::OutOfPiDigits(range) => write!(
                f,
                "{} Ran out of pi digits while comparing numbers.",
                range
            ),
            RuntimeError::OutputNotNumber => write!(f, "(std_output_char) isn't a number."),
            RuntimeError::OutputNotPi => write!(f, "(std_output_char) isn't a multiple of pi."),
            RuntimeError::OutputNotAscii => {
                write!(f, "(std_output_char) isn't within the range of ascii value.")
            }
            RuntimeError::DecomposeNotNumber => {
                write!(f, "(std_decompose_number) isn't a number.")
            }
            RuntimeError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(err: io::Error) -> RuntimeError {
        RuntimeError::Io(err)
    }
}
