//! The tree-walking runtime.
//!
//! The parsed program becomes a runtime [`Array`] executed against the
//! global circular array (`gca`), a second array of the same capacity that
//! starts out holding only the intrinsic I/O handles. All observable state
//! lives in the gca; the code array is never written to.

pub mod intrinsic;
mod obj;

use std::io::{BufRead, Write};

pub use self::obj::{from_ast, Array, Assign, Index, Number, Obj, OperatorBinary, OperatorUnary};

use crate::ast;
use crate::debug::Debugger;
use crate::diag::{Range, RuntimeError, WithInfo};
use crate::number::Value;

/// The byte streams a program talks to, plus the optional debugger hooked
/// into array execution. Reads and writes block; there is no other
/// concurrency in the interpreter.
pub struct Io<'a> {
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub debugger: Option<Debugger>,
}

impl<'a> Io<'a> {
    pub(crate) fn enter_array(&mut self) {
        if let Some(debugger) = self.debugger.as_mut() {
            debugger.enter_array();
        }
    }

    pub(crate) fn exit_array(&mut self) {
        if let Some(debugger) = self.debugger.as_mut() {
            debugger.exit_array();
        }
    }

    pub(crate) fn break_before(
        &mut self,
        gca: &Array,
        range: Option<Range>,
    ) -> Result<(), RuntimeError> {
        let Io {
            input,
            err,
            debugger,
            ..
        } = self;
        if let (Some(debugger), Some(range)) = (debugger.as_mut(), range) {
            debugger.break_before(gca, range, &mut **input, &mut **err)?;
        }
        Ok(())
    }
}

pub struct Runtime {
    gca: Array,
    code: Array,
}

impl Runtime {
    /// Builds the runtime tree and seeds the global circular array with the
    /// intrinsics. The gca's capacity is the number of top-level statements.
    pub fn new(code: WithInfo<ast::Array>) -> Runtime {
        let length = code.t.elements.len() as i64;
        let mut gca = Array::with_length(length, None);
        gca.insert_value(Value::from_letters(intrinsic::STD_INPUT), Obj::StdInput);
        gca.insert_value(Value::from_letters(intrinsic::STD_OUTPUT), Obj::StdOutput);
        gca.insert_value(
            Value::from_letters(intrinsic::STD_DECOMPOSE),
            Obj::StdDecompose,
        );
        Runtime {
            gca,
            code: Array::from_ast(code.t, Some(code.range)),
        }
    }

    pub fn gca(&self) -> &Array {
        &self.gca
    }

    /// Runs the program. Runtime errors are caught here, printed to `err`,
    /// and end the run.
    pub fn run(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        err: &mut dyn Write,
        debugger: Option<Debugger>,
    ) {
        let Runtime { gca, code } = self;
        let mut io = Io {
            input,
            output,
            err,
            debugger,
        };
        if let Err(error) = code.execute(gca, &mut io) {
            let _ = writeln!(io.err, "{}", error);
        }
    }
}
