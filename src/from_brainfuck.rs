//! Brainfuck to circle-lang transpilation.
//!
//! The tape pointer lives in `(P)` and steps by `1*1` (the integer 1, which
//! is pi), so cells sit on the integer-multiple-of-pi sub-lattice of the
//! global circular array. A cell holding the Brainfuck value `v` stores the
//! integer `v + 1`, keeping the unassigned-cell default of 1 aligned with
//! an empty tape. `[` opens an array whose first element tests the current
//! cell, `]` closes it; the whole program is bracketed by `(S);` and
//! `(S) := 0;` so the outermost loop runs exactly once.

/// Emits a circle-lang program equivalent to the Brainfuck `src_code`.
/// Non-command characters are dropped.
pub fn from_brainfuck(src_code: &str) -> String {
    let mut out = String::from("(S);\n");
    let mut indent = 0;
    for c in src_code.chars() {
        match c {
            '>' => push_line(&mut out, indent, "(P) := (P) + 1*1;"),
            '<' => push_line(&mut out, indent, "(P) := (P) - 1*1;"),
            '+' => push_line(&mut out, indent, "( (P) ) := ( (P) ) + 1;"),
            '-' => push_line(&mut out, indent, "( (P) ) := ( (P) ) - 1;"),
            '.' => {
                push_line(&mut out, indent, "(std_output_char) := ( (P) ) - 1;");
                push_line(&mut out, indent, "(std_output);");
            }
            ',' => {
                push_line(&mut out, indent, "(std_input);");
                push_line(&mut out, indent, "( (P) ) := (std_input_char) + 1;");
            }
            '[' => {
                push_line(&mut out, indent, "((");
                indent += 1;
                push_line(&mut out, indent, "( (P) ) - 1;");
            }
            ']' => {
                indent = if indent > 0 { indent - 1 } else { 0 };
                push_line(&mut out, indent, "));");
            }
            _ => {}
        }
    }
    out.push_str("(S) := 0;\n");
    out
}

fn push_line(out: &mut String, indent: usize, line: &str) {
    for _ in 0..indent {
        out.push_str("    ");
    }
    out.push_str(line);
    out.push('\n');
}
