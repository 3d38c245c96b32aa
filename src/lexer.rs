//! Lexical analysis: source text to positioned tokens.
//!
//! The grammar in `lexer.pest` splits the source into maximal runs; the
//! validation here turns runs into tokens and reports the lexical errors.
//! Lexical errors are fatal: when any is found, no token stream is
//! produced.

use num::bigint::BigInt;
use pest::error::{Error as PestError, LineColLocation};
use pest::iterators::Pair;
use pest::{Parser, Span};
use pest_derive::Parser;
use std::fmt;

use crate::diag::{Diags, Range, WithInfo};
use crate::number::{op, Value};

#[derive(Parser)]
#[grammar = "lexer.pest"]
pub struct CircleParser;

#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    OpenBracket,
    CloseBracket,
    Semicolon,
    OpenBracket2,
    CloseBracket2,
    Comment(String),
    Number(Value),
    Assign,
    OperatorBinary(op::Binary),
    OperatorUnary(op::Unary),
}

impl fmt::Display for Kind {
    /// The formatter's rendering of a single token, spacing included.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::OpenBracket => f.write_str("( "),
            Kind::CloseBracket => f.write_str(" )"),
            Kind::Semicolon => f.write_str("; "),
            Kind::OpenBracket2 => f.write_str("(( "),
            Kind::CloseBracket2 => f.write_str(" ))"),
            Kind::Comment(content) => write!(f, "#{}", content),
            Kind::Number(value) => write!(f, "{}", value),
            Kind::Assign => f.write_str(" := "),
            Kind::OperatorBinary(kind) => write!(f, " {} ", kind),
            Kind::OperatorUnary(kind) => write!(f, "{}", kind),
        }
    }
}

pub type Token = WithInfo<Kind>;

fn range_of_span(span: &Span) -> Range {
    let (start_line, start_column) = span.start_pos().line_col();
    let (end_line, end_column) = span.end_pos().line_col();
    Range::new((start_line - 1, start_column - 1), (end_line - 1, end_column - 1))
}

fn range_of_error(error: &PestError<Rule>) -> Range {
    let (line, column) = match error.line_col {
        LineColLocation::Pos((line, column)) => (line, column),
        LineColLocation::Span((line, column), _) => (line, column),
    };
    Range::new((line - 1, column - 1), (line - 1, column))
}

fn match_operator(run: &str) -> Option<Kind> {
    Some(match run {
        ":=" => Kind::Assign,
        "!" => Kind::OperatorUnary(op::Unary::BoolNot),
        "+" => Kind::OperatorBinary(op::Binary::Plus),
        "-" => Kind::OperatorBinary(op::Binary::Minus),
        "*" => Kind::OperatorBinary(op::Binary::Multiply),
        "/" => Kind::OperatorBinary(op::Binary::Divide),
        "&&" => Kind::OperatorBinary(op::Binary::BoolAnd),
        "||" => Kind::OperatorBinary(op::Binary::BoolOr),
        "=" => Kind::OperatorBinary(op::Binary::Equal),
        "!=" => Kind::OperatorBinary(op::Binary::NotEqual),
        "<" => Kind::OperatorBinary(op::Binary::Smaller),
        "<=" => Kind::OperatorBinary(op::Binary::SmallerOrEqual),
        ">" => Kind::OperatorBinary(op::Binary::Greater),
        ">=" => Kind::OperatorBinary(op::Binary::GreaterOrEqual),
        _ => return None,
    })
}

fn word_value(word: &str) -> Value {
    if word.bytes().all(|b| b.is_ascii_digit()) {
        match BigInt::parse_bytes(word.as_bytes(), 10) {
            Some(n) => Value::from(n),
            None => unreachable!(),
        }
    } else {
        Value::from_letters(word)
    }
}

/// Lexes `src_code` into positioned tokens. Diagnostics land in `diags`;
/// `None` means a fatal lexical error was found and no tokens exist.
pub fn lex(src_code: &str, diags: &mut Diags) -> Option<Vec<Token>> {
    let file = match CircleParser::parse(Rule::file, src_code) {
        Ok(mut pairs) => match pairs.next() {
            Some(file) => file,
            None => unreachable!(),
        },
        Err(error) => {
            diags.error(range_of_error(&error), "Invalid character.".to_owned());
            return None;
        }
    };

    let mut tokens = Vec::new();
    let mut fatal = false;
    for pair in file.into_inner() {
        let range = range_of_span(&pair.as_span());
        let kind = match pair.as_rule() {
            Rule::brackets_open => match pair.as_str().len() {
                1 => Kind::OpenBracket,
                2 => Kind::OpenBracket2,
                _ => {
                    diags.error(range, "Too many '(' in a row, split them with spaces.".to_owned());
                    fatal = true;
                    continue;
                }
            },
            Rule::brackets_close => match pair.as_str().len() {
                1 => Kind::CloseBracket,
                2 => Kind::CloseBracket2,
                _ => {
                    diags.error(range, "Too many ')' in a row, split them with spaces.".to_owned());
                    fatal = true;
                    continue;
                }
            },
            Rule::semicolon => Kind::Semicolon,
            Rule::comment => Kind::Comment(comment_content(pair)),
            Rule::word => Kind::Number(word_value(pair.as_str())),
            Rule::operators => match match_operator(pair.as_str()) {
                Some(kind) => kind,
                None => {
                    diags.error(
                        range,
                        format!("\"{}\" is not a valid operator.", pair.as_str()),
                    );
                    fatal = true;
                    continue;
                }
            },
            Rule::EOI => continue,
            _ => unreachable!(),
        };
        tokens.push(Token { range, t: kind });
    }

    if fatal {
        None
    } else {
        Some(tokens)
    }
}

fn comment_content(pair: Pair<Rule>) -> String {
    match pair.into_inner().next() {
        Some(text) => text.as_str().to_owned(),
        None => unreachable!(),
    }
}
