use num::bigint::BigInt;
use num::{One, Zero};

use super::XorShift;
use crate::number::{
    binary, lexicographically_minimal_rotation, op, unary, Index, OutOfPiDigitsError, Value,
};
use crate::pi;

fn int(n: i64) -> Value {
    Value::from(n)
}

fn big(n: i64) -> BigInt {
    BigInt::from(n)
}

fn poly(coefficients: &[i64]) -> Vec<BigInt> {
    coefficients.iter().map(|&c| big(c)).collect()
}

#[test]
fn minimal_rotation_pins() {
    assert_eq!(lexicographically_minimal_rotation(b"dbca"), 3);
    assert_eq!(lexicographically_minimal_rotation(b"abbab"), 3);
    assert_eq!(lexicographically_minimal_rotation(b"aabaaa"), 3);
    assert_eq!(lexicographically_minimal_rotation(b""), 0);
    assert_eq!(lexicographically_minimal_rotation(b"ababbababababbababb"), 5);
}

fn rotated(s: &[u8], offset: usize) -> Vec<u8> {
    (0..s.len()).map(|i| s[(i + offset) % s.len()]).collect()
}

/// The linear scan must agree with the obvious quadratic reference on the
/// rotated *string* (offsets may tie on periodic inputs).
#[test]
fn minimal_rotation_agrees_with_brute_force() {
    let mut random = XorShift::new(20);
    for _ in 0..200 {
        let len = 1 + random.below(12) as usize;
        let s: Vec<u8> = (0..len).map(|_| b'a' + random.below(3) as u8).collect();
        let best = (0..len).map(|k| rotated(&s, k)).min();
        let fast = rotated(&s, lexicographically_minimal_rotation(&s));
        assert_eq!(Some(fast), best, "input {:?}", s);
    }
}

#[test]
fn letters_round_trip() {
    for s in &["abc", "cab", "V_a", "Temp1", "std_output_char", "a", "zz9"] {
        let value = Value::from_letters(s);
        let offset = lexicographically_minimal_rotation(s.as_bytes());
        let expected = String::from_utf8(rotated(s.as_bytes(), offset)).unwrap();
        assert_eq!(value.to_letters().as_deref(), Some(expected.as_str()));
    }
    assert_eq!(Value::from_letters("Temp1").to_letters().as_deref(), Some("1Temp"));
    assert_eq!(
        Value::from_letters("std_output").to_letters().as_deref(),
        Some("_outputstd")
    );
    // zero and plain integers are not letter strings
    assert_eq!(Value::from_letters("").to_letters(), None);
    assert_eq!(int(1).to_letters(), None);
}

#[test]
fn integer_constructor_shape() {
    assert_eq!(int(0).numerator(), &[] as &[BigInt]);
    assert_eq!(int(0).denominator(), &[big(1)][..]);
    assert_eq!(int(5).numerator(), &poly(&[0, 5])[..]);
    assert_eq!(int(5).denominator(), &[big(1)][..]);
}

fn assert_canonical(value: &Value) {
    let numerator = value.numerator();
    let denominator = value.denominator();
    assert!(!denominator.is_empty());
    assert!(numerator.last().map_or(true, |c| !c.is_zero()));
    assert!(denominator.last().map_or(false, |c| !c.is_zero()));
    if numerator.is_empty() {
        assert_eq!(denominator, &[BigInt::one()][..]);
        return;
    }
    // no shared leading block of zeros
    assert!(!(numerator[0].is_zero() && denominator[0].is_zero()));
    let mut gcd = BigInt::zero();
    for c in numerator.iter().chain(denominator.iter()) {
        gcd = num::Integer::gcd(&gcd, c);
    }
    assert!(gcd.is_one());
}

fn random_value(random: &mut XorShift) -> Value {
    let numerator: Vec<BigInt> = (0..random.below(4)).map(|_| big(random.below(7) as i64 - 3)).collect();
    let denominator: Vec<BigInt> = (0..random.below(3)).map(|_| big(random.below(5) as i64 - 2)).collect();
    let mut denominator = denominator;
    denominator.push(big(1 + random.below(4) as i64));
    Value::new(numerator, denominator)
}

#[test]
fn simplification_invariants() {
    let mut random = XorShift::new(7);
    for _ in 0..300 {
        let value = random_value(&mut random);
        assert_canonical(&value);
        let sum = &value + &random_value(&mut random);
        assert_canonical(&sum);
        let product = &value * &random_value(&mut random);
        assert_canonical(&product);
    }
}

#[test]
fn ring_laws() {
    let mut random = XorShift::new(99);
    for _ in 0..100 {
        let a = random_value(&mut random);
        let b = random_value(&mut random);
        let c = random_value(&mut random);
        assert_eq!(&a + &b, &b + &a);
        assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        // the two sides can differ by a common polynomial factor that
        // canonicalisation leaves alone, so compare with the language's
        // equality
        let left = &a * &(&b + &c);
        let right = &(&a * &b) + &(&a * &c);
        assert!(left.equal(&right), "{} vs {}", left, right);
    }
}

#[test]
fn pi_squared_identity() {
    let pi_value = int(1);
    let pi_squared = Value::new(poly(&[0, 0, 1]), poly(&[1]));
    assert_eq!(&(&pi_squared + &pi_value) - &pi_squared, pi_value);
}

#[test]
fn multiplication_is_pi_normalized() {
    // 1*1 is the integer 1 again, not pi squared
    assert_eq!(&int(1) * &int(1), int(1));
    assert_eq!(&int(2) * &int(3), int(6));
    assert_eq!(int(6).checked_div(&int(2)), Some(int(3)));
    assert_eq!(int(1).checked_div(&int(0)), None);
    // (a / b) * b restores a
    let quotient = int(7).checked_div(&int(4)).unwrap();
    assert_eq!(&quotient * &int(4), int(7));
}

#[test]
fn truthiness() {
    assert!(!int(0).is_truthy());
    assert!(int(1).is_truthy());
    assert!(int(-2).is_truthy());
    assert!(Value::from_letters("a").is_truthy());
    // a plain constant is truthy even though it equals 0 modulo constants
    let constant = Value::new(poly(&[3]), poly(&[1]));
    assert!(constant.is_truthy());
    assert!(constant.equal(&int(0)));
}

#[test]
fn equality_ignores_constant_terms() {
    assert!(int(1).equal(&int(1)));
    assert!(!int(1).equal(&int(2)));
    let shifted = &int(5) + &Value::new(poly(&[9]), poly(&[1]));
    assert!(shifted.equal(&int(5)));
}

#[test]
fn ordering() {
    assert_eq!(int(1).less_than(&int(2)), Ok(true));
    assert_eq!(int(2).less_than(&int(1)), Ok(false));
    assert_eq!(int(1).less_than(&int(1)), Ok(false));
    assert_eq!(int(-1).less_than(&int(0)), Ok(true));
    // pi < pi^2
    let pi_squared = Value::new(poly(&[0, 0, 1]), poly(&[1]));
    assert_eq!(int(1).less_than(&pi_squared), Ok(true));
    assert_eq!(pi_squared.less_than(&int(1)), Ok(false));
    // 3 < pi < 4 in units of pi: the constant 3 against the integer 1
    let three = Value::new(poly(&[3]), poly(&[1]));
    assert_eq!(three.less_than(&int(1)), Ok(true));
    let four = Value::new(poly(&[4]), poly(&[1]));
    assert_eq!(four.less_than(&int(1)), Ok(false));
}

#[test]
fn comparison_operators() {
    let t = int(1);
    let f = int(0);
    assert_eq!(binary(op::Binary::Smaller, &int(1), &int(2)), Ok(t.clone()));
    assert_eq!(binary(op::Binary::SmallerOrEqual, &int(2), &int(2)), Ok(t.clone()));
    assert_eq!(binary(op::Binary::Greater, &int(1), &int(2)), Ok(f.clone()));
    assert_eq!(binary(op::Binary::GreaterOrEqual, &int(2), &int(2)), Ok(t.clone()));
    assert_eq!(binary(op::Binary::Equal, &int(2), &int(2)), Ok(t.clone()));
    assert_eq!(binary(op::Binary::NotEqual, &int(2), &int(2)), Ok(f.clone()));
    assert_eq!(binary(op::Binary::BoolAnd, &int(2), &int(0)), Ok(f.clone()));
    assert_eq!(binary(op::Binary::BoolOr, &int(2), &int(0)), Ok(t.clone()));
    assert_eq!(
        binary(op::Binary::Divide, &int(1), &int(0)),
        Err(crate::number::EvalError::DivisionByZero)
    );
    assert_eq!(unary(op::Unary::BoolNot, &int(0)), t);
    assert_eq!(unary(op::Unary::BoolNot, &int(3)), f);
}

#[test]
fn precedence_pin() {
    // 1 + 2 * 3 = 7 is truthy, = 6 is falsey
    let sum = binary(
        op::Binary::Plus,
        &int(1),
        &binary(op::Binary::Multiply, &int(2), &int(3)).unwrap(),
    )
    .unwrap();
    assert_eq!(binary(op::Binary::Equal, &sum, &int(7)), Ok(int(1)));
    assert_eq!(binary(op::Binary::Equal, &sum, &int(6)), Ok(int(0)));
}

#[test]
fn div_pi_shapes() {
    assert_eq!(int(68).div_pi(), Some(big(68)));
    assert_eq!(int(0).div_pi(), Some(big(0)));
    assert_eq!(int(-1).div_pi(), Some(big(-1)));
    assert_eq!(int(1).checked_div(&int(2)).unwrap().div_pi(), None);
    assert_eq!(Value::from_letters("a").div_pi(), None);
    // k * pi * (1 + pi) / (1 + pi)
    let value = Value::new(poly(&[0, 5, 5]), poly(&[1, 1]));
    assert_eq!(value.div_pi(), Some(big(5)));
}

/// The best rational approximation the table itself can express is not
/// separable from pi: the comparison must fail loudly instead of guessing.
#[test]
fn out_of_pi_digits_is_an_error() {
    let sf = pi::max_significant_figures();
    let p = pi::evaluate(&poly(&[0, 1]), sf);
    let q = num::pow(big(10), sf - 1);
    let almost_pi = Value::new(vec![p], vec![q]);
    assert_eq!(almost_pi.less_than(&int(1)), Err(OutOfPiDigitsError));
}

#[test]
fn index_wrap_equality_and_hash() {
    let length = 13;
    let a = Index::new(int(13), length);
    let b = Index::new(int(0), length);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    assert_ne!(Index::new(int(1), length), Index::new(int(0), length));
    assert_ne!(Index::new(int(13), 14), Index::new(int(0), 13));

    // an offset off the integer lattice never wraps
    let letters = Value::from_letters("abc");
    let shifted = &letters + &int(2 * 5);
    assert_eq!(Index::new(shifted, 5), Index::new(letters.clone(), 5));
    let shifted_by_one = &letters + &int(1);
    assert_ne!(Index::new(shifted_by_one, 5), Index::new(letters, 5));

    // denominators participate in the wrap rule
    let half = int(1).checked_div(&int(2)).unwrap();
    let wrapped = &half + &int(2 * 2);
    assert_eq!(Index::new(wrapped, 2), Index::new(half, 2));
}

fn hash_of(index: &Index) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    index.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn pi_evaluation() {
    assert_eq!(pi::evaluate(&poly(&[0, 1]), 5), big(31415));
    assert_eq!(pi::evaluate(&poly(&[1]), 3), big(1));
    assert_eq!(
        pi::evaluate_with_margin(&poly(&[0, 1]), 5),
        (big(31415), big(31416))
    );
    assert_eq!(
        pi::evaluate_with_margin(&poly(&[0, 0, 1]), 4),
        (&big(3141) * &big(3141), &big(3142) * &big(3142))
    );
}

#[test]
fn less_than_error_type_displays() {
    assert_eq!(OutOfPiDigitsError.to_string(), "ran out of pi digits");
}
