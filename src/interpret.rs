//! The whole pipeline in one call: lex, recover structure, build the
//! runtime and execute.

use std::io::{BufRead, Write};

use crate::debug::Debugger;
use crate::diag::Diags;
use crate::runtime::Runtime;
use crate::{lexer, parser};

#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    pub debug: bool,
}

/// Interprets `src_code`. All diagnostics collected while lowering are
/// printed to `err` sorted by position; any error-level diagnostic stops
/// the program from running. Warnings alone never block execution.
pub fn interpret(
    src_code: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    err: &mut dyn Write,
    config: &Config,
) {
    let mut diags = Diags::new();
    let parsed = lexer::lex(src_code, &mut diags)
        .and_then(|tokens| parser::parse(tokens, &mut diags));
    if let Some(code) = &parsed {
        // an empty program would loop forever on the miss-default of 1
        if code.t.elements.is_empty() {
            diags.error(code.range, "Zero sized array are not allowed".to_owned());
        }
    }
    if !diags.is_empty() {
        let _ = writeln!(err, "{}", diags);
    }
    let code = match parsed {
        Some(code) if !diags.has_errors() => code,
        _ => return,
    };

    let debugger = if config.debug {
        Some(Debugger::new(src_code))
    } else {
        None
    };
    Runtime::new(code).run(input, output, err, debugger);
}
