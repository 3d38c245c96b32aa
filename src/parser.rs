//! Structure recovery: tokens to bracket trees to AST.
//!
//! Two passes run over the token stream before expression assembly. Pass A
//! ([`de_double_bracket`]) treats `((` / `))` as block delimiters and `;` as
//! an element separator. Pass B ([`de_bracket`]) recovers `(` / `)` grouping
//! inside every element. Both passes keep going after an error so the whole
//! source gets reported on; pass A errors are fatal to the parse, pass B
//! recovers by flattening.

use crate::ast;
use crate::diag::{Diags, Range, WithInfo};
use crate::lexer::{Kind, Token};

pub mod de_double_bracket {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Item {
        Node(Node),
        Token(Kind),
    }

    /// A `(( ...; ...; ... ))` block: elements of tokens and nested blocks.
    #[derive(Clone, Debug, PartialEq)]
    pub struct Node {
        pub elements: Vec<Vec<WithInfo<Item>>>,
    }

    struct Frame {
        open: Option<Range>,
        elements: Vec<Vec<WithInfo<Item>>>,
        current: Vec<WithInfo<Item>>,
    }

    impl Frame {
        fn new(open: Option<Range>) -> Frame {
            Frame {
                open,
                elements: Vec::new(),
                current: Vec::new(),
            }
        }

        /// Commits the in-progress element. An empty element at an explicit
        /// `;` is a stray semicolon; at a block close or end of input it is
        /// silently dropped.
        fn commit(&mut self, semicolon: Option<Range>, diags: &mut Diags) {
            if self.current.is_empty() {
                if let Some(range) = semicolon {
                    diags.warning(range, "Extra ';' found".to_owned());
                }
            } else {
                self.elements.push(std::mem::replace(&mut self.current, Vec::new()));
            }
        }
    }

    /// Recovers the double-bracket structure. The whole program acts as one
    /// implicit outermost block. `None` means the structure was too broken
    /// to continue (unmatched `((` / `))`, or an empty block).
    pub fn parse(tokens: Vec<Token>, diags: &mut Diags) -> Option<WithInfo<Node>> {
        let mut stack = vec![Frame::new(None)];
        let mut fatal = false;

        for token in tokens {
            match token.t {
                Kind::OpenBracket2 => stack.push(Frame::new(Some(token.range))),
                Kind::CloseBracket2 => {
                    if stack.len() == 1 {
                        diags.error(token.range, "Can not find matching \"((\"".to_owned());
                        fatal = true;
                        continue;
                    }
                    let mut frame = match stack.pop() {
                        Some(frame) => frame,
                        None => unreachable!(),
                    };
                    frame.commit(None, diags);
                    let open = match frame.open {
                        Some(open) => open,
                        None => unreachable!(),
                    };
                    let range = open.to(token.range);
                    if frame.elements.is_empty() {
                        diags.error(range, "Zero sized array are not allowed".to_owned());
                        fatal = true;
                    }
                    let node = Node {
                        elements: frame.elements,
                    };
                    last_frame(&mut stack).current.push(WithInfo {
                        range,
                        t: Item::Node(node),
                    });
                }
                Kind::Semicolon => last_frame(&mut stack).commit(Some(token.range), diags),
                Kind::Comment(_) => {}
                kind => last_frame(&mut stack).current.push(WithInfo {
                    range: token.range,
                    t: Item::Token(kind),
                }),
            }
        }

        while stack.len() > 1 {
            let frame = match stack.pop() {
                Some(frame) => frame,
                None => unreachable!(),
            };
            let open = match frame.open {
                Some(open) => open,
                None => unreachable!(),
            };
            diags.error(open, "Can not find matching \"))\"".to_owned());
            fatal = true;
        }

        let mut top = match stack.pop() {
            Some(frame) => frame,
            None => unreachable!(),
        };
        top.commit(None, diags);

        let range = match (top.elements.first(), top.elements.last()) {
            (Some(first), Some(last)) => match (first.first(), last.last()) {
                (Some(head), Some(tail)) => head.range.to(tail.range),
                _ => Range::default(),
            },
            _ => Range::default(),
        };

        if fatal {
            None
        } else {
            Some(WithInfo {
                range,
                t: Node {
                    elements: top.elements,
                },
            })
        }
    }

    fn last_frame(stack: &mut Vec<Frame>) -> &mut Frame {
        match stack.last_mut() {
            Some(frame) => frame,
            None => unreachable!(),
        }
    }
}

pub mod de_bracket {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Item {
        Double(DoubleBracket),
        Single(SingleBracket),
        Token(Kind),
    }

    #[derive(Clone, Debug, PartialEq)]
    pub struct DoubleBracket {
        pub elements: Vec<Vec<WithInfo<Item>>>,
    }

    /// A `( ... )` group inside an element.
    #[derive(Clone, Debug, PartialEq)]
    pub struct SingleBracket {
        pub children: Vec<WithInfo<Item>>,
    }

    /// Recovers single-bracket grouping within every element, recursively.
    /// Stray `)` are skipped, unclosed `(` are flattened into their parent;
    /// both leave an error behind.
    pub fn parse(node: WithInfo<de_double_bracket::Node>, diags: &mut Diags) -> WithInfo<DoubleBracket> {
        WithInfo {
            range: node.range,
            t: parse_node(node.t, diags),
        }
    }

    fn parse_node(node: de_double_bracket::Node, diags: &mut Diags) -> DoubleBracket {
        DoubleBracket {
            elements: node
                .elements
                .into_iter()
                .map(|element| parse_element(element, diags))
                .collect(),
        }
    }

    fn parse_element(
        element: Vec<WithInfo<de_double_bracket::Item>>,
        diags: &mut Diags,
    ) -> Vec<WithInfo<Item>> {
        let mut base = Vec::new();
        let mut frames: Vec<(Range, Vec<WithInfo<Item>>)> = Vec::new();

        for item in element {
            match item.t {
                de_double_bracket::Item::Node(node) => {
                    let double = parse_node(node, diags);
                    push(&mut base, &mut frames, WithInfo {
                        range: item.range,
                        t: Item::Double(double),
                    });
                }
                de_double_bracket::Item::Token(Kind::OpenBracket) => {
                    frames.push((item.range, Vec::new()));
                }
                de_double_bracket::Item::Token(Kind::CloseBracket) => match frames.pop() {
                    Some((open, children)) => {
                        let range = open.to(item.range);
                        push(&mut base, &mut frames, WithInfo {
                            range,
                            t: Item::Single(SingleBracket { children }),
                        });
                    }
                    None => {
                        diags.error(item.range, "Can not find matching '('".to_owned());
                    }
                },
                de_double_bracket::Item::Token(kind) => {
                    push(&mut base, &mut frames, WithInfo {
                        range: item.range,
                        t: Item::Token(kind),
                    });
                }
            }
        }

        while let Some((open, children)) = frames.pop() {
            diags.error(open, "Can not find matching ')'".to_owned());
            match frames.last_mut() {
                Some((_, parent)) => parent.extend(children),
                None => base.extend(children),
            }
        }

        base
    }

    fn push(
        base: &mut Vec<WithInfo<Item>>,
        frames: &mut Vec<(Range, Vec<WithInfo<Item>>)>,
        item: WithInfo<Item>,
    ) {
        match frames.last_mut() {
            Some((_, children)) => children.push(item),
            None => base.push(item),
        }
    }
}

/// The full pipeline: pass A, pass B, then expression assembly into the
/// top-level program array.
pub fn parse(tokens: Vec<Token>, diags: &mut Diags) -> Option<WithInfo<ast::Array>> {
    let double_bracketed = de_double_bracket::parse(tokens, diags)?;
    let bracketed = de_bracket::parse(double_bracketed, diags);
    Some(ast::from_de_bracket(bracketed, diags))
}

/// Parses a single stand-alone expression, as typed at the debugger prompt.
pub fn parse_expression(src_code: &str, diags: &mut Diags) -> Option<ast::Node> {
    let tokens = crate::lexer::lex(src_code, diags)?;
    let double_bracketed = de_double_bracket::parse(tokens, diags)?;
    let bracketed = de_bracket::parse(double_bracketed, diags);
    if diags.has_errors() {
        return None;
    }
    let range = bracketed.range;
    let mut elements = bracketed.t.elements;
    if elements.len() != 1 {
        diags.error(range, "Expected a single expression".to_owned());
        return None;
    }
    match elements.pop() {
        Some(element) => Some(ast::build_element(element, range, diags)),
        None => unreachable!(),
    }
}
