//! Executable objects: the AST reinterpreted as a stateful, clonable tree.

use std::collections::HashMap;
use std::fmt;

use crate::ast;
use crate::diag::{Range, RuntimeError, WithInfo};
use crate::number::{self, op, Value};
use crate::runtime::{intrinsic, Io};

/// Every runtime object. `execute` runs an object for its side effects
/// against the global circular array; `evaluate` purely computes an owned
/// result. Arrays, assignments, numbers and intrinsics evaluate to
/// themselves (cloned); indexing and operators actually compute.
#[derive(Clone, Debug)]
pub enum Obj {
    Array(Array),
    Assign(Assign),
    Index(Index),
    OperatorBinary(OperatorBinary),
    OperatorUnary(OperatorUnary),
    Number(Number),
    StdInput,
    StdOutput,
    StdDecompose,
}

impl Obj {
    pub fn range(&self) -> Option<Range> {
        match self {
            Obj::Array(array) => array.range,
            Obj::Assign(assign) => assign.range,
            Obj::Index(index) => index.range,
            Obj::OperatorBinary(operator) => operator.range,
            Obj::OperatorUnary(operator) => operator.range,
            Obj::Number(number) => number.range,
            Obj::StdInput | Obj::StdOutput | Obj::StdDecompose => None,
        }
    }

    pub fn execute(&self, gca: &mut Array, io: &mut Io) -> Result<(), RuntimeError> {
        match self {
            Obj::Array(array) => array.execute(gca, io),
            Obj::Assign(assign) => assign.execute(gca),
            Obj::Index(index) => index.evaluate(gca)?.execute(gca, io),
            Obj::OperatorBinary(operator) => operator.evaluate(gca)?.execute(gca, io),
            Obj::OperatorUnary(operator) => operator.evaluate(gca)?.execute(gca, io),
            Obj::Number(_) => Ok(()),
            Obj::StdInput => intrinsic::std_input(gca, io),
            Obj::StdOutput => intrinsic::std_output(gca, io),
            Obj::StdDecompose => intrinsic::std_decompose(gca),
        }
    }

    pub fn evaluate(&self, gca: &Array) -> Result<Obj, RuntimeError> {
        match self {
            Obj::Index(index) => index.evaluate(gca),
            Obj::OperatorBinary(operator) => operator.evaluate(gca),
            Obj::OperatorUnary(operator) => operator.evaluate(gca),
            other => Ok(other.clone()),
        }
    }
}

impl fmt::Display for Obj {
    /// A short human rendering, used by the debugger.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Obj::Array(array) => write!(f, "(( {} elements ))", array.length()),
            Obj::Assign(_) => f.write_str(":="),
            Obj::Index(_) => f.write_str("(index)"),
            Obj::OperatorBinary(operator) => write!(f, "{}", operator.kind),
            Obj::OperatorUnary(operator) => write!(f, "{}", operator.kind),
            Obj::Number(number) => write!(f, "{}", number.value),
            Obj::StdInput => f.write_str("std_input"),
            Obj::StdOutput => f.write_str("std_output"),
            Obj::StdDecompose => f.write_str("std_decompose"),
        }
    }
}

pub fn from_ast(node: ast::Node) -> Obj {
    let range = node.range;
    match node.ast {
        ast::Any::Array(array) => Obj::Array(Array::from_ast(array, Some(range))),
        ast::Any::Assign(assign) => Obj::Assign(Assign {
            lhs: Box::new(Index::from_ast(assign.lhs.t, assign.lhs.range)),
            rhs: Box::new(from_ast(*assign.rhs)),
            range: Some(range),
        }),
        ast::Any::Index(index) => Obj::Index(Index::from_ast(index, range)),
        ast::Any::OperatorBinary(operator) => Obj::OperatorBinary(OperatorBinary {
            kind: operator.kind,
            lhs: Box::new(from_ast(*operator.lhs)),
            rhs: Box::new(from_ast(*operator.rhs)),
            range: Some(range),
        }),
        ast::Any::OperatorUnary(operator) => Obj::OperatorUnary(OperatorUnary {
            kind: operator.kind,
            rhs: Box::new(from_ast(*operator.rhs)),
            range: Some(range),
        }),
        ast::Any::Number(number) => Obj::Number(Number {
            value: number.value,
            range: Some(range),
        }),
    }
}

/// A circular array: a map from [`number::Index`] equivalence classes to
/// owned objects. Reading an absent key yields the number 1, the truthy
/// sentinel that keeps loops alive until a cell is explicitly zeroed.
#[derive(Clone, Debug)]
pub struct Array {
    length: i64,
    elements: HashMap<number::Index, Obj>,
    range: Option<Range>,
}

impl Array {
    pub fn with_length(length: i64, range: Option<Range>) -> Array {
        Array {
            length,
            elements: HashMap::new(),
            range,
        }
    }

    pub fn from_ast(node: ast::Array, range: Option<Range>) -> Array {
        let length = node.elements.len() as i64;
        let mut elements = HashMap::new();
        for (i, element) in node.elements.into_iter().enumerate() {
            elements.insert(
                number::Index::new(Value::from(i as i64), length),
                from_ast(element),
            );
        }
        Array {
            length,
            elements,
            range,
        }
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn cells(&self) -> impl Iterator<Item = (&number::Index, &Obj)> {
        self.elements.iter()
    }

    /// Inserts or replaces a single cell. This and [`insert`] are the only
    /// mutation paths into an array.
    ///
    /// [`insert`]: Array::insert
    pub fn insert_value(&mut self, index: Value, obj: Obj) {
        self.elements
            .insert(number::Index::new(index, self.length), obj);
    }

    /// Descends `path[..n-1]`, each step demanding an existing array cell,
    /// then inserts at the final step.
    pub fn insert(&mut self, path: Vec<WithInfo<Value>>, obj: Obj) -> Result<(), RuntimeError> {
        let mut path = path;
        let last = match path.pop() {
            Some(last) => last,
            None => unreachable!(),
        };
        let mut walk = self;
        for step in path {
            let key = number::Index::new(step.t, walk.length);
            walk = match walk.elements.get_mut(&key) {
                Some(Obj::Array(array)) => array,
                _ => return Err(RuntimeError::IndexNonArray(step.range)),
            };
        }
        walk.insert_value(last.t, obj);
        Ok(())
    }

    /// Looks a value up, cloning the stored object; misses read as the
    /// number 1.
    pub fn index(&self, value: &Value) -> Obj {
        match self
            .elements
            .get(&number::Index::new(value.clone(), self.length))
        {
            Some(obj) => obj.clone(),
            None => Obj::Number(Number::synthesized(Value::from(1))),
        }
    }

    /// The loop. Element 0 is the condition: evaluate it, stop once it is a
    /// number equal to 0, otherwise execute elements `1..length-1` in key
    /// order and test again. Element 0 is never executed as part of the
    /// body.
    pub fn execute(&self, gca: &mut Array, io: &mut Io) -> Result<(), RuntimeError> {
        io.enter_array();
        let zero = Value::from(0);
        loop {
            let first = self.index(&zero).evaluate(gca)?;
            if let Obj::Number(number) = &first {
                if number.value.equal(&zero) {
                    break;
                }
            }
            for i in 1..self.length {
                let element = self.index(&Value::from(i));
                io.break_before(gca, element.range())?;
                element.execute(gca, io)?;
            }
        }
        io.exit_array();
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Assign {
    lhs: Box<Index>,
    rhs: Box<Obj>,
    range: Option<Range>,
}

impl Assign {
    /// Evaluates the right-hand side, resolves the left-hand side to a path
    /// into the global circular array and writes. A left-hand side rooted in
    /// a non-gca array resolves to no path and the assignment is a no-op.
    fn execute(&self, gca: &mut Array) -> Result<(), RuntimeError> {
        let rhs = self.rhs.evaluate(gca)?;
        if let Some(location) = self.lhs.gca_location(gca)? {
            gca.insert(location, rhs)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Index {
    subject: Option<Box<Obj>>,
    index: Box<Obj>,
    range: Option<Range>,
}

impl Index {
    fn from_ast(node: ast::Index, range: Range) -> Index {
        Index {
            subject: node.subject.map(|subject| Box::new(from_ast(*subject))),
            index: Box::new(from_ast(*node.index)),
            range: Some(range),
        }
    }

    fn range_or_default(&self) -> Range {
        self.range.unwrap_or_default()
    }

    /// Resolves the subject (the global circular array when absent),
    /// demands an array, evaluates the index to a number, and evaluates
    /// whatever the lookup finds.
    pub fn evaluate(&self, gca: &Array) -> Result<Obj, RuntimeError> {
        let subject_obj;
        let array = match &self.subject {
            Some(subject) => {
                subject_obj = subject.evaluate(gca)?;
                match &subject_obj {
                    Obj::Array(array) => array,
                    _ => return Err(RuntimeError::IndexNonArray(self.range_or_default())),
                }
            }
            None => gca,
        };
        let index = self.index.evaluate(gca)?;
        let value = match &index {
            Obj::Number(number) => &number.value,
            _ => return Err(RuntimeError::IndexNonNumber(self.range_or_default())),
        };
        array.index(value).evaluate(gca)
    }

    /// The write path into the global circular array described by this
    /// index chain, or `None` when the chain roots in an array literal
    /// (writes there are unobservable and dropped).
    fn gca_location(&self, gca: &Array) -> Result<Option<Vec<WithInfo<Value>>>, RuntimeError> {
        let index = self.index.evaluate(gca)?;
        let index = match index {
            Obj::Number(number) => number,
            _ => return Err(RuntimeError::IndexNonNumber(self.range_or_default())),
        };
        let step = WithInfo {
            range: index.range.unwrap_or_default(),
            t: index.value,
        };
        match &self.subject {
            Some(subject) => match subject.as_ref() {
                Obj::Index(parent) => Ok(parent.gca_location(gca)?.map(|mut location| {
                    location.push(step);
                    location
                })),
                Obj::Array(_) => Ok(None),
                _ => Err(RuntimeError::IndexNonArray(self.range_or_default())),
            },
            None => Ok(Some(vec![step])),
        }
    }
}

#[derive(Clone, Debug)]
pub struct OperatorBinary {
    kind: op::Binary,
    lhs: Box<Obj>,
    rhs: Box<Obj>,
    range: Option<Range>,
}

impl OperatorBinary {
    fn evaluate(&self, gca: &Array) -> Result<Obj, RuntimeError> {
        let rhs = self.rhs.evaluate(gca)?;
        let lhs = self.lhs.evaluate(gca)?;
        let (lhs, rhs) = match (&lhs, &rhs) {
            (Obj::Number(lhs), Obj::Number(rhs)) => (lhs, rhs),
            _ => return Err(RuntimeError::OperateNonNumber(self.range.unwrap_or_default())),
        };
        let value = number::binary(self.kind, &lhs.value, &rhs.value).map_err(|error| {
            let range = self.range.unwrap_or_default();
            match error {
                number::EvalError::DivisionByZero => RuntimeError::DivisionByZero(range),
                number::EvalError::OutOfPiDigits => RuntimeError::OutOfPiDigits(range),
            }
        })?;
        Ok(Obj::Number(Number::synthesized(value)))
    }
}

#[derive(Clone, Debug)]
pub struct OperatorUnary {
    kind: op::Unary,
    rhs: Box<Obj>,
    range: Option<Range>,
}

impl OperatorUnary {
    fn evaluate(&self, gca: &Array) -> Result<Obj, RuntimeError> {
        let rhs = self.rhs.evaluate(gca)?;
        let rhs = match &rhs {
            Obj::Number(rhs) => rhs,
            _ => return Err(RuntimeError::OperateNonNumber(self.range.unwrap_or_default())),
        };
        Ok(Obj::Number(Number::synthesized(number::unary(
            self.kind, &rhs.value,
        ))))
    }
}

#[derive(Clone, Debug)]
pub struct Number {
    value: Value,
    range: Option<Range>,
}

impl Number {
    /// A number with no source position, e.g. an intrinsic result or a
    /// missed read.
    pub fn synthesized(value: Value) -> Number {
        Number { value, range: None }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}
