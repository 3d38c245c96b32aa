//! Interpreter for circle-lang, an esoteric language whose only composite
//! data structure is a circular array and whose only scalar is a symbolic
//! number: a rational polynomial in pi with big integer coefficients.
//!
//! # The language in one sitting
//!
//! A program is a sequence of statements separated by `;`. `(( ... ))`
//! builds an array, `(x)` indexes the global circular array, `a(x)` indexes
//! the array `a`, and `:=` assigns through an index chain. Integer literals
//! denote multiples of pi; identifiers denote letter-string numbers that
//! are canonical up to rotation (`abc` and `cab` are the same scalar).
//!
//! Executing an array is the only control flow: element 0 is evaluated and,
//! until it is a number equal to 0, the remaining elements execute in
//! order. The whole program is one implicit array, so the conventional
//! final statement `(S) := 0;` is what terminates it.
//!
//! Reading an absent cell yields the number 1, which keeps fresh loops
//! alive and doubles as the Brainfuck-friendly default for tape cells; the
//! [`from_brainfuck`] transpiler leans on exactly that.
//!
//! # Pipeline
//!
//! | Stage | Module | Product |
//! |-------|--------|---------|
//! | lexing | [`lexer`] | positioned tokens |
//! | bracket recovery | [`parser`] | double/single bracket trees |
//! | expression assembly | [`ast`] | the program array |
//! | execution | [`runtime`] | effects on the global circular array |
//!
//! [`interpret`] drives all of it; diagnostics collect in
//! [`diag::Diags`] and print sorted by source position.

pub mod ast;
pub mod debug;
pub mod diag;
mod from_brainfuck;
pub mod format;
mod interpret;
pub mod lexer;
pub mod number;
pub mod parser;
pub mod pi;
pub mod runtime;

pub use crate::from_brainfuck::from_brainfuck;
pub use crate::interpret::{interpret, Config};

#[cfg(test)]
mod test;
