//! The abstract syntax tree and the final parser pass that assembles it
//! from bracketed elements.
//!
//! Operator precedence (higher binds tighter): `*` `/`, then `+` `-`, then
//! the comparisons, then `&&` `||`; all left associative. Unary `!` binds
//! tightest and is right associative. `:=` is only accepted at the head of
//! an element, with an index expression on its left.

use matches::matches;

use crate::diag::{Diags, Range, WithInfo};
use crate::lexer::Kind;
use crate::number::{self, op};
use crate::parser::de_bracket::{DoubleBracket, Item, SingleBracket};

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub range: Range,
    pub ast: Any,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Any {
    Array(Array),
    Assign(Assign),
    Index(Index),
    OperatorBinary(OperatorBinary),
    OperatorUnary(OperatorUnary),
    Number(Number),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Array {
    pub elements: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assign {
    pub lhs: WithInfo<Index>,
    pub rhs: Box<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Index {
    pub subject: Option<Box<Node>>,
    pub index: Box<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperatorBinary {
    pub kind: op::Binary,
    pub lhs: Box<Node>,
    pub rhs: Box<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperatorUnary {
    pub kind: op::Unary,
    pub rhs: Box<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Number {
    pub value: number::Value,
}

/// Lifts the outermost double-bracket node into the program array.
pub fn from_de_bracket(top: WithInfo<DoubleBracket>, diags: &mut Diags) -> WithInfo<Array> {
    WithInfo {
        range: top.range,
        t: build_array(top.t, diags),
    }
}

fn build_array(node: DoubleBracket, diags: &mut Diags) -> Array {
    Array {
        elements: node
            .elements
            .into_iter()
            .map(|element| {
                let range = element_range(&element);
                build_element(element, range, diags)
            })
            .collect(),
    }
}

fn element_range(element: &[WithInfo<Item>]) -> Range {
    match (element.first(), element.last()) {
        (Some(first), Some(last)) => first.range.to(last.range),
        _ => Range::default(),
    }
}

fn placeholder(range: Range) -> Node {
    Node {
        range,
        ast: Any::Number(Number {
            value: number::Value::from_letters("Place_holder_to_continue_parsing"),
        }),
    }
}

enum ExprItem {
    Operand(Node),
    Binary(op::Binary, Range),
    Unary(op::Unary, Range),
}

/// Builds one element (or sub-expression) into a node. Recovery inserts a
/// placeholder number so the rest of the source still gets parsed.
pub fn build_element(element: Vec<WithInfo<Item>>, range: Range, diags: &mut Diags) -> Node {
    let mut items: Vec<ExprItem> = Vec::new();
    let mut iter = element.into_iter();

    while let Some(item) = iter.next() {
        match item.t {
            Item::Token(Kind::Number(value)) => items.push(ExprItem::Operand(Node {
                range: item.range,
                ast: Any::Number(Number { value }),
            })),
            Item::Token(Kind::OperatorBinary(kind)) => {
                items.push(ExprItem::Binary(kind, item.range))
            }
            Item::Token(Kind::OperatorUnary(kind)) => {
                items.push(ExprItem::Unary(kind, item.range))
            }
            Item::Token(Kind::Assign) => {
                // `:=` only makes sense right after a single index operand.
                let lhs_ok = items.len() == 1
                    && matches!(&items[0], ExprItem::Operand(node) if matches!(node.ast, Any::Index(_)));
                if !lhs_ok {
                    diags.error(item.range, "Unexpected ':='".to_owned());
                    return assemble_expression(items, range, diags);
                }
                let lhs_node = match items.pop() {
                    Some(ExprItem::Operand(node)) => node,
                    _ => unreachable!(),
                };
                let lhs = match lhs_node.ast {
                    Any::Index(index) => WithInfo {
                        range: lhs_node.range,
                        t: index,
                    },
                    _ => unreachable!(),
                };
                let rest: Vec<WithInfo<Item>> = iter.collect();
                let rest_range = element_range(&rest);
                let rhs = build_element(rest, rest_range, diags);
                return Node {
                    range,
                    ast: Any::Assign(Assign {
                        lhs,
                        rhs: Box::new(rhs),
                    }),
                };
            }
            Item::Single(single) => {
                let node = build_single_bracket(single, item.range, &mut items, diags);
                items.push(ExprItem::Operand(node));
            }
            Item::Double(double) => items.push(ExprItem::Operand(Node {
                range: item.range,
                ast: Any::Array(build_array(double, diags)),
            })),
            Item::Token(_) => unreachable!(),
        }
    }

    assemble_expression(items, range, diags)
}

/// A `( ... )` group becomes an index expression; when the item before it is
/// a number, array or index operand, that item becomes the subject.
fn build_single_bracket(
    single: SingleBracket,
    range: Range,
    items: &mut Vec<ExprItem>,
    diags: &mut Diags,
) -> Node {
    let inner_range = element_range(&single.children);
    let inner = build_element(
        single.children,
        if inner_range == Range::default() { range } else { inner_range },
        diags,
    );

    let subject_ok = matches!(
        items.last(),
        Some(ExprItem::Operand(node))
            if matches!(node.ast, Any::Number(_) | Any::Array(_) | Any::Index(_))
    );
    let subject = if subject_ok {
        match items.pop() {
            Some(ExprItem::Operand(node)) => Some(node),
            _ => unreachable!(),
        }
    } else {
        None
    };

    let full_range = match &subject {
        Some(subject) => subject.range.to(range),
        None => range,
    };
    Node {
        range: full_range,
        ast: Any::Index(Index {
            subject: subject.map(Box::new),
            index: Box::new(inner),
        }),
    }
}

fn assemble_expression(items: Vec<ExprItem>, range: Range, diags: &mut Diags) -> Node {
    let mut operands: Vec<Node> = Vec::new();
    let mut operators: Vec<(op::Binary, Range)> = Vec::new();
    let mut pending_unary: Vec<(op::Unary, Range)> = Vec::new();
    let mut expect_operand = true;

    for item in items {
        match item {
            ExprItem::Operand(node) => {
                if !expect_operand {
                    diags.error(node.range, "Expected operator".to_owned());
                    continue;
                }
                operands.push(wrap_unary(node, &mut pending_unary));
                expect_operand = false;
            }
            ExprItem::Unary(kind, unary_range) => {
                if !expect_operand {
                    diags.error(unary_range, "Expected operator".to_owned());
                    continue;
                }
                pending_unary.push((kind, unary_range));
            }
            ExprItem::Binary(kind, op_range) => {
                if expect_operand {
                    diags.error(op_range, format!("Unexpected '{}'", kind));
                    operands.push(wrap_unary(placeholder(op_range), &mut pending_unary));
                }
                while operators
                    .last()
                    .map_or(false, |(top, _)| top.precedence() >= kind.precedence())
                {
                    reduce(&mut operands, &mut operators);
                }
                operators.push((kind, op_range));
                expect_operand = true;
            }
        }
    }

    if expect_operand {
        let dangling_unary = pending_unary.last().copied();
        let dangling_binary = operators.last().copied();
        if let Some((kind, unary_range)) = dangling_unary {
            diags.error(unary_range, format!("Unexpected '{}'", kind));
            operands.push(wrap_unary(placeholder(unary_range), &mut pending_unary));
        } else if let Some((kind, op_range)) = dangling_binary {
            diags.error(op_range, format!("Unexpected '{}'", kind));
            operands.push(placeholder(op_range));
        } else {
            diags.error(range, "Empty expression".to_owned());
            return placeholder(range);
        }
    }

    while !operators.is_empty() {
        reduce(&mut operands, &mut operators);
    }

    match operands.pop() {
        Some(node) => node,
        None => placeholder(range),
    }
}

fn wrap_unary(mut node: Node, pending_unary: &mut Vec<(op::Unary, Range)>) -> Node {
    while let Some((kind, unary_range)) = pending_unary.pop() {
        let range = unary_range.to(node.range);
        node = Node {
            range,
            ast: Any::OperatorUnary(OperatorUnary {
                kind,
                rhs: Box::new(node),
            }),
        };
    }
    node
}

fn reduce(operands: &mut Vec<Node>, operators: &mut Vec<(op::Binary, Range)>) {
    let (kind, op_range) = match operators.pop() {
        Some(operator) => operator,
        None => unreachable!(),
    };
    let rhs = operands.pop().unwrap_or_else(|| placeholder(op_range));
    let lhs = operands.pop().unwrap_or_else(|| placeholder(op_range));
    let range = lhs.range.to(rhs.range);
    operands.push(Node {
        range,
        ast: Any::OperatorBinary(OperatorBinary {
            kind,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }),
    });
}
