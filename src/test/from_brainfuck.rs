use std::io::Cursor;

use crate::{from_brainfuck, interpret, Config};

fn transpile_and_run(brainfuck: &str, input: &[u8]) -> (Vec<u8>, String) {
    let src_code = from_brainfuck(brainfuck);
    let mut input = Cursor::new(input.to_vec());
    let mut output = Vec::new();
    let mut err = Vec::new();
    interpret(
        &src_code,
        &mut input,
        &mut output,
        &mut err,
        &Config::default(),
    );
    (output, String::from_utf8(err).unwrap())
}

#[test]
fn emitted_text() {
    assert_eq!(
        from_brainfuck("+"),
        "(S);\n( (P) ) := ( (P) ) + 1;\n(S) := 0;\n"
    );
    assert_eq!(
        from_brainfuck("[-]"),
        "(S);\n((\n    ( (P) ) - 1;\n    ( (P) ) := ( (P) ) - 1;\n));\n(S) := 0;\n"
    );
    // non-command characters vanish
    assert_eq!(from_brainfuck("hello"), "(S);\n(S) := 0;\n");
}

#[test]
fn sum() {
    let (output, err) = transpile_and_run(",>,[<+>-]<.", b"!#");
    assert_eq!(err, "");
    assert_eq!(output, b"D");
}

#[test]
fn hello_world() {
    let (output, err) = transpile_and_run(
        "+++++++++++[>++++++>+++++++++>++++++++>++++>+++>+<<<<<<-]>+++\
         +++.>++.+++++++..+++.>>.>-.<<-.<.+++.------.--------.>>>+.>-.",
        b"",
    );
    assert_eq!(err, "");
    assert_eq!(String::from_utf8(output).unwrap(), "Hello, World!\n");
}

#[test]
fn eof_stores_minus_one() {
    // end of input reads as -1, leaving the cell one below the empty-tape
    // default; a single `+` brings it to zero and `.` writes that byte
    let (output, err) = transpile_and_run(",[+.]", b"");
    assert_eq!(err, "");
    assert_eq!(output, [0u8]);
}
