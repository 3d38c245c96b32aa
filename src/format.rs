//! Source formatter: lex, recover the bracket structure, and print it back
//! one element per line with four-space indentation per block depth.
//!
//! Numbers render through `Value`'s display, so identifiers come back in
//! their canonical (minimally rotated) spelling. On a fatal lex or bracket
//! error the source is returned untouched and the diagnostics printed.

use std::io::Write;

use crate::diag::Diags;
use crate::lexer;
use crate::parser::de_bracket::{DoubleBracket, Item, SingleBracket};
use crate::parser::{de_bracket, de_double_bracket};

pub fn format(src_code: &str, err: &mut dyn Write) -> String {
    let mut diags = Diags::new();
    let formatted = lexer::lex(src_code, &mut diags)
        .and_then(|tokens| de_double_bracket::parse(tokens, &mut diags))
        .map(|node| {
            let bracketed = de_bracket::parse(node, &mut diags);
            let mut out = String::new();
            write_double_bracket(&mut out, &bracketed.t, 0);
            out
        });
    if !diags.is_empty() {
        let _ = writeln!(err, "{}", diags);
    }
    formatted.unwrap_or_else(|| src_code.to_owned())
}

pub fn write_double_bracket(out: &mut String, node: &DoubleBracket, indent: usize) {
    out.push('\n');
    for element in &node.elements {
        push_indent(out, indent);
        for item in element {
            write_item(out, &item.t, indent);
        }
        out.push('\n');
    }
}

pub fn write_single_bracket(out: &mut String, node: &SingleBracket, indent: usize) {
    out.push_str("( ");
    for child in &node.children {
        write_item(out, &child.t, indent);
    }
    out.push_str(" )");
}

fn write_item(out: &mut String, item: &Item, indent: usize) {
    match item {
        Item::Double(double) => {
            out.push_str("((");
            write_double_bracket(out, double, indent + 1);
            push_indent(out, indent);
            out.push_str("))");
        }
        Item::Single(single) => write_single_bracket(out, single, indent),
        Item::Token(kind) => out.push_str(&kind.to_string()),
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("    ");
    }
}
