//! The intrinsic I/O handles seeded into the global circular array.
//!
//! Intrinsics are ordinary cells keyed by well-known letter strings, so a
//! bare statement like `(std_output)` invokes them through `Index::execute`,
//! and user code may shadow them by assigning over the cell.

use byteorder::{ReadBytesExt, WriteBytesExt};
use num::bigint::BigInt;
use num::{ToPrimitive, Zero};
use std::io;

use crate::diag::RuntimeError;
use crate::number::Value;
use crate::runtime::obj::{Array, Number, Obj};
use crate::runtime::Io;

pub const STD_INPUT: &str = "std_input";
pub const STD_INPUT_CHAR: &str = "std_input_char";
pub const STD_OUTPUT: &str = "std_output";
pub const STD_OUTPUT_CHAR: &str = "std_output_char";
pub const STD_DECOMPOSE: &str = "std_decompose";
pub const STD_DECOMPOSE_NUMBER: &str = "std_decompose_number";
pub const STD_DECOMPOSE_NUMERATOR: &str = "std_decompose_numerator";
pub const STD_DECOMPOSE_DENOMINATOR: &str = "std_decompose_denominator";

/// Reads one byte from standard input into `(std_input_char)`. End of input
/// stores the integer -1.
pub fn std_input(gca: &mut Array, io: &mut Io) -> Result<(), RuntimeError> {
    let value = match io.input.read_u8() {
        Ok(byte) => Value::from(i64::from(byte)),
        Err(error) => {
            if error.kind() == io::ErrorKind::UnexpectedEof {
                Value::from(-1)
            } else {
                return Err(RuntimeError::Io(error));
            }
        }
    };
    gca.insert_value(
        Value::from_letters(STD_INPUT_CHAR),
        Obj::Number(Number::synthesized(value)),
    );
    Ok(())
}

/// Writes the byte held in `(std_output_char)`, which must be an integer
/// (a multiple of pi) within the ascii range.
pub fn std_output(gca: &mut Array, io: &mut Io) -> Result<(), RuntimeError> {
    let obj = gca.index(&Value::from_letters(STD_OUTPUT_CHAR));
    let number = match &obj {
        Obj::Number(number) => number,
        _ => return Err(RuntimeError::OutputNotNumber),
    };
    let k = match number.value().div_pi() {
        Some(k) => k,
        None => return Err(RuntimeError::OutputNotPi),
    };
    if k < BigInt::zero() || k > BigInt::from(127) {
        return Err(RuntimeError::OutputNotAscii);
    }
    match k.to_u8() {
        Some(byte) => io.output.write_u8(byte)?,
        None => unreachable!(),
    }
    Ok(())
}

/// Explodes `(std_decompose_number)` into its coefficient arrays at
/// `(std_decompose_numerator)` and `(std_decompose_denominator)`. An empty
/// polynomial becomes a one-cell array holding 0.
pub fn std_decompose(gca: &mut Array) -> Result<(), RuntimeError> {
    let obj = gca.index(&Value::from_letters(STD_DECOMPOSE_NUMBER));
    let number = match &obj {
        Obj::Number(number) => number,
        _ => return Err(RuntimeError::DecomposeNotNumber),
    };
    let numerator = coefficient_array(number.value().numerator());
    let denominator = coefficient_array(number.value().denominator());
    gca.insert_value(
        Value::from_letters(STD_DECOMPOSE_NUMERATOR),
        Obj::Array(numerator),
    );
    gca.insert_value(
        Value::from_letters(STD_DECOMPOSE_DENOMINATOR),
        Obj::Array(denominator),
    );
    Ok(())
}

fn coefficient_array(coefficients: &[BigInt]) -> Array {
    let zero = [BigInt::zero()];
    let coefficients = if coefficients.is_empty() {
        &zero[..]
    } else {
        coefficients
    };
    let mut array = Array::with_length(coefficients.len() as i64, None);
    for (i, c) in coefficients.iter().enumerate() {
        array.insert_value(
            Value::from(i as i64),
            Obj::Number(Number::synthesized(Value::from(c.clone()))),
        );
    }
    array
}
