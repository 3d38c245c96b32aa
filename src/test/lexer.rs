use super::sample_programs;
use crate::diag::Diags;
use crate::lexer::{lex, Kind, Token};
use crate::number::op;

fn tokens_to_string(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.t.to_string()).collect()
}

#[test]
fn empty_source() {
    let mut diags = Diags::new();
    let tokens = lex("", &mut diags).unwrap();
    assert!(tokens.is_empty());
    assert!(diags.is_empty());
}

#[test]
fn invalid_operator() {
    let mut diags = Diags::new();
    let tokens = lex(
        "(( (V) + 1*1 );\n(V) := (V) + 1**1;\n( (V) )(Array) := ( (V) )(0);)\n",
        &mut diags,
    );
    assert!(tokens.is_none());
    assert_eq!(
        diags.to_string(),
        "[ERROR] 2:15-2:16: \"**\" is not a valid operator.\n"
    );
}

#[test]
fn too_many_brackets() {
    let mut diags = Diags::new();
    assert!(lex("((( 1 )));", &mut diags).is_none());
    assert_eq!(
        diags.to_string(),
        "[ERROR] 1:1-1:3: Too many '(' in a row, split them with spaces.\n\
         [ERROR] 1:7-1:9: Too many ')' in a row, split them with spaces.\n"
    );
}

#[test]
fn invalid_character() {
    let mut diags = Diags::new();
    assert!(lex("(V) @ 1;", &mut diags).is_none());
    assert_eq!(diags.to_string(), "[ERROR] 1:5-1:5: Invalid character.\n");
}

#[test]
fn token_rendering() {
    let mut diags = Diags::new();
    let tokens = lex("( (V) )(Array) := (( 1; 0 ));", &mut diags).unwrap();
    assert!(diags.is_empty());
    assert_eq!(
        tokens_to_string(&tokens),
        "( ( V ) )( Array ) := (( {0 1}{1}; {}{1} )); "
    );
}

#[test]
fn operator_tokens() {
    let mut diags = Diags::new();
    let tokens = lex("1 <= 2 != !3 && 4", &mut diags).unwrap();
    let kinds: Vec<&Kind> = tokens.iter().map(|token| &token.t).collect();
    assert!(matches!(kinds[1], Kind::OperatorBinary(op::Binary::SmallerOrEqual)));
    assert!(matches!(kinds[3], Kind::OperatorBinary(op::Binary::NotEqual)));
    assert!(matches!(kinds[4], Kind::OperatorUnary(op::Unary::BoolNot)));
    assert!(matches!(kinds[6], Kind::OperatorBinary(op::Binary::BoolAnd)));
}

#[test]
fn comment_contents() {
    let mut diags = Diags::new();
    let tokens = lex("# hello world\n1;", &mut diags).unwrap();
    assert!(matches!(&tokens[0].t, Kind::Comment(content) if content == " hello world"));
}

#[test]
fn digits_only_words_are_integers() {
    let mut diags = Diags::new();
    let tokens = lex("007 7up up7 _", &mut diags).unwrap();
    let rendered: Vec<String> = tokens.iter().map(|token| token.t.to_string()).collect();
    assert_eq!(rendered, ["{0 7}{1}", "7up", "7up", "_"]);
}

#[test]
fn hello_world_positions() {
    let mut diags = Diags::new();
    let tokens = lex(sample_programs::HELLO_WORLD, &mut diags).unwrap();
    assert!(diags.is_empty());
    // the `F_print_str` word of the call near the end of the program
    let token = &tokens[tokens.len() - 9];
    assert!(matches!(&token.t, Kind::Number(value) if value.to_letters().as_deref() == Some("F_print_str")));
    assert_eq!(token.range.to_string(), "62:2-62:12");
}
