//! Symbolic numbers: rational polynomials in pi.
//!
//! Every scalar in the language is a fraction of two polynomials in pi with
//! big integer coefficients. Integer literals denote multiples of pi
//! (`n` lowers to `[0, n] / [1]`), identifiers denote letter strings encoded
//! base 256 into the coefficients, and the arithmetic keeps the integer
//! sub-lattice closed: `*` divides the raw product by pi and `/` multiplies
//! the raw quotient by pi, so `1*1` is the integer 1 again.
//!
//! Ordering is decided numerically with the digit table in [`crate::pi`];
//! everything else is exact.

use num::bigint::BigInt;
use num::{Integer, One, Signed, ToPrimitive, Zero};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

use crate::pi;

pub mod op {
    use std::fmt;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Binary {
        Plus,
        Minus,
        Multiply,
        Divide,
        BoolAnd,
        BoolOr,
        Equal,
        NotEqual,
        Smaller,
        SmallerOrEqual,
        Greater,
        GreaterOrEqual,
    }

    impl Binary {
        /// Shunting-yard precedence, higher binds tighter. All binary
        /// operators are left associative.
        pub fn precedence(self) -> u8 {
            match self {
                Binary::Multiply | Binary::Divide => 4,
                Binary::Plus | Binary::Minus => 3,
                Binary::Equal
                | Binary::NotEqual
                | Binary::Smaller
                | Binary::SmallerOrEqual
                | Binary::Greater
                | Binary::GreaterOrEqual => 2,
                Binary::BoolAnd | Binary::BoolOr => 1,
            }
        }
    }

    impl fmt::Display for Binary {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str(match self {
                Binary::Plus => "+",
                Binary::Minus => "-",
                Binary::Multiply => "*",
                Binary::Divide => "/",
                Binary::BoolAnd => "&&",
                Binary::BoolOr => "||",
                Binary::Equal => "=",
                Binary::NotEqual => "!=",
                Binary::Smaller => "<",
                Binary::SmallerOrEqual => "<=",
                Binary::Greater => ">",
                Binary::GreaterOrEqual => ">=",
            })
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Unary {
        BoolNot,
    }

    impl fmt::Display for Unary {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str(match self {
                Unary::BoolNot => "!",
            })
        }
    }
}

pub const LETTER_BASE: i64 = 256;

/// The strict comparisons are partial: once the digit table is exhausted
/// without separating the two sides, this error surfaces as a runtime
/// failure. Guessing is not an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfPiDigitsError;

impl fmt::Display for OutOfPiDigitsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ran out of pi digits")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalError {
    DivisionByZero,
    OutOfPiDigits,
}

impl From<OutOfPiDigitsError> for EvalError {
    fn from(_: OutOfPiDigitsError) -> EvalError {
        EvalError::OutOfPiDigits
    }
}

/// Offset of the lexicographically smallest rotation of `s`.
///
/// Booth-style scan over the doubled string: the failure function is built
/// incrementally, and whenever a strictly smaller character turns up the
/// candidate offset moves forward and the scan restarts from the matched
/// prefix. Linear time.
pub fn lexicographically_minimal_rotation(s: &[u8]) -> usize {
    if s.is_empty() {
        return 0;
    }
    let n = s.len();
    let at = |offset: usize, i: usize| s[(i + offset) % n];
    let mut offset = 0;
    let mut f = vec![0usize; n * 2];
    let mut i = 1;
    while i < f.len() {
        let mut prev_len = f[i - 1];
        loop {
            if at(offset, i) == at(offset, prev_len) {
                f[i] = prev_len + 1;
                break;
            }
            if at(offset, i) < at(offset, prev_len) {
                offset += i - prev_len;
                i = if prev_len > 0 { prev_len - 1 } else { 0 };
                break;
            }
            if prev_len == 0 {
                f[i] = 0;
                break;
            }
            prev_len = f[prev_len - 1];
        }
        i += 1;
    }
    offset % n
}

fn trim_zeros(poly: &mut Vec<BigInt>) {
    while poly.last().map_or(false, |c| c.is_zero()) {
        poly.pop();
    }
}

fn poly_add(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    let mut sum = vec![BigInt::zero(); a.len().max(b.len())];
    for (i, c) in a.iter().enumerate() {
        sum[i] += c;
    }
    for (i, c) in b.iter().enumerate() {
        sum[i] += c;
    }
    sum
}

fn poly_sub(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    let mut difference = vec![BigInt::zero(); a.len().max(b.len())];
    for (i, c) in a.iter().enumerate() {
        difference[i] += c;
    }
    for (i, c) in b.iter().enumerate() {
        difference[i] -= c;
    }
    difference
}

fn poly_mul(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut product = vec![BigInt::zero(); a.len() + b.len() - 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            product[i + j] += ca * cb;
        }
    }
    product
}

/// Multiplies a polynomial by pi.
fn poly_shift(mut poly: Vec<BigInt>) -> Vec<BigInt> {
    poly.insert(0, BigInt::zero());
    poly
}

/// A rational polynomial in pi, always kept in canonical form: no trailing
/// zero coefficients, no shared leading block of zeros (a common factor of
/// pi), and the gcd of all coefficients divided out. An empty numerator is
/// the value 0; an empty denominator is never produced. Denominator signs
/// are left alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value {
    numerator: Vec<BigInt>,
    denominator: Vec<BigInt>,
}

impl Value {
    /// Builds a value from explicit polynomials and simplifies immediately.
    /// A zero denominator polynomial is rejected upstream by [`checked_div`]
    /// and must not be passed here.
    ///
    /// [`checked_div`]: Value::checked_div
    pub fn new(numerator: Vec<BigInt>, denominator: Vec<BigInt>) -> Value {
        let mut numerator = numerator;
        let mut denominator = denominator;
        trim_zeros(&mut numerator);
        trim_zeros(&mut denominator);
        debug_assert!(!denominator.is_empty());
        if denominator.is_empty() {
            denominator.push(BigInt::one());
        }
        if numerator.is_empty() {
            return Value {
                numerator: Vec::new(),
                denominator: vec![BigInt::one()],
            };
        }
        let leading_zeros = |poly: &[BigInt]| poly.iter().take_while(|c| c.is_zero()).count();
        let shared = leading_zeros(&numerator).min(leading_zeros(&denominator));
        numerator.drain(..shared);
        denominator.drain(..shared);
        let mut gcd = BigInt::zero();
        for c in numerator.iter().chain(denominator.iter()) {
            gcd = gcd.gcd(c);
        }
        if !gcd.is_one() {
            for c in numerator.iter_mut().chain(denominator.iter_mut()) {
                *c = &*c / &gcd;
            }
        }
        Value {
            numerator,
            denominator,
        }
    }

    /// Encodes a letter string: the lexicographically minimal rotation of
    /// `letters`, base 256 into successive coefficients.
    ///
    /// ```
    /// use circle_lang::number::Value;
    ///
    /// let value = Value::from_letters("cab");
    /// assert_eq!(value.to_letters().as_deref(), Some("abc"));
    /// ```
    pub fn from_letters(letters: &str) -> Value {
        let bytes = letters.as_bytes();
        if bytes.is_empty() {
            return Value::from(BigInt::zero());
        }
        let offset = lexicographically_minimal_rotation(bytes);
        let mut numerator = Vec::with_capacity(bytes.len());
        let mut base = BigInt::one();
        for i in 0..bytes.len() {
            let letter = BigInt::from(bytes[(i + offset) % bytes.len()]);
            numerator.push(&base * &letter);
            base = &base * &BigInt::from(LETTER_BASE);
        }
        Value::new(numerator, vec![BigInt::one()])
    }

    pub fn numerator(&self) -> &[BigInt] {
        &self.numerator
    }

    pub fn denominator(&self) -> &[BigInt] {
        &self.denominator
    }

    /// Decodes a letter string again: requires a denominator of `[1]` and
    /// every coefficient to be `b * 256^i` with `1 <= b <= 127`.
    pub fn to_letters(&self) -> Option<String> {
        if self.numerator.is_empty()
            || self.denominator.len() != 1
            || !self.denominator[0].is_one()
        {
            return None;
        }
        let mut base = BigInt::one();
        let mut letters = String::with_capacity(self.numerator.len());
        for c in &self.numerator {
            let (letter, remainder) = c.div_rem(&base);
            if !remainder.is_zero() || letter < BigInt::one() || letter > BigInt::from(127) {
                return None;
            }
            match letter.to_u8() {
                Some(byte) => letters.push(byte as char),
                None => unreachable!(),
            }
            base = &base * &BigInt::from(LETTER_BASE);
        }
        Some(letters)
    }

    /// A value is truthy iff it is not the integer 0.
    pub fn is_truthy(&self) -> bool {
        !self.numerator.is_empty()
    }

    /// The canonical truthy value pi (the integer 1) or the value 0.
    pub fn from_bool(b: bool) -> Value {
        Value::from(if b { 1 } else { 0 })
    }

    /// Language equality: the cross-multiplied numerators must agree on
    /// every coefficient from index 1 upward. Constant terms are ignored,
    /// so array keys built by arithmetic on pi compare structurally.
    pub fn equal(&self, other: &Value) -> bool {
        let l = poly_mul(&self.numerator, &other.denominator);
        let r = poly_mul(&other.numerator, &self.denominator);
        let zero = BigInt::zero();
        (1..l.len().max(r.len())).all(|i| l.get(i).unwrap_or(&zero) == r.get(i).unwrap_or(&zero))
    }

    /// Strict numeric ordering, decided against the pi digit table.
    ///
    /// Both sides are cleared of denominators (`n1/d1 < n2/d2` iff
    /// `n1*d1*d2^2 < n2*d2*d1^2`), padded to a common degree and evaluated
    /// with error margins at a doubling significant-figure count until the
    /// intervals separate. Identical products mean equal values (pi is
    /// transcendental), which is not less-than.
    pub fn less_than(&self, other: &Value) -> Result<bool, OutOfPiDigitsError> {
        let mut a = poly_mul(
            &poly_mul(&self.numerator, &self.denominator),
            &poly_mul(&other.denominator, &other.denominator),
        );
        let mut b = poly_mul(
            &poly_mul(&other.numerator, &other.denominator),
            &poly_mul(&self.denominator, &self.denominator),
        );
        trim_zeros(&mut a);
        trim_zeros(&mut b);
        if a == b {
            return Ok(false);
        }
        let len = a.len().max(b.len());
        a.resize(len, BigInt::zero());
        b.resize(len, BigInt::zero());
        let mut sf = 4;
        loop {
            let (a_low, a_high) = pi::evaluate_with_margin(&a, sf);
            let (b_low, b_high) = pi::evaluate_with_margin(&b, sf);
            if a_high < b_low {
                return Ok(true);
            }
            if b_high < a_low {
                return Ok(false);
            }
            if sf == pi::max_significant_figures() {
                return Err(OutOfPiDigitsError);
            }
            sf = (sf * 2).min(pi::max_significant_figures());
        }
    }

    /// Division, `None` when the divisor is the value 0. The quotient picks
    /// up one factor of pi so that dividing integers yields an integer.
    pub fn checked_div(&self, rhs: &Value) -> Option<Value> {
        if rhs.numerator.is_empty() {
            return None;
        }
        Some(Value::new(
            poly_shift(poly_mul(&self.numerator, &rhs.denominator)),
            poly_mul(&self.denominator, &rhs.numerator),
        ))
    }

    /// The integer `k` such that the value is exactly `k` times pi, if any.
    /// Used to turn characters back into bytes on output.
    pub fn div_pi(&self) -> Option<BigInt> {
        if self.numerator.is_empty() {
            return Some(BigInt::zero());
        }
        if self.numerator.len() != self.denominator.len() + 1 || !self.numerator[0].is_zero() {
            return None;
        }
        let mut k: Option<BigInt> = None;
        for (c, d) in self.numerator[1..].iter().zip(self.denominator.iter()) {
            if d.is_zero() {
                if !c.is_zero() {
                    return None;
                }
                continue;
            }
            let (quotient, remainder) = c.div_rem(d);
            if !remainder.is_zero() {
                return None;
            }
            match &k {
                None => k = Some(quotient),
                Some(k0) => {
                    if *k0 != quotient {
                        return None;
                    }
                }
            }
        }
        k
    }
}

impl From<BigInt> for Value {
    /// The integer `n` denotes `n` times pi; zero is the empty numerator.
    fn from(n: BigInt) -> Value {
        if n.is_zero() {
            Value {
                numerator: Vec::new(),
                denominator: vec![BigInt::one()],
            }
        } else {
            Value::new(vec![BigInt::zero(), n], vec![BigInt::one()])
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::from(BigInt::from(n))
    }
}

impl Add for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        Value::new(
            poly_add(
                &poly_mul(&self.numerator, &rhs.denominator),
                &poly_mul(&rhs.numerator, &self.denominator),
            ),
            poly_mul(&self.denominator, &rhs.denominator),
        )
    }
}

impl Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        Value::new(
            poly_sub(
                &poly_mul(&self.numerator, &rhs.denominator),
                &poly_mul(&rhs.numerator, &self.denominator),
            ),
            poly_mul(&self.denominator, &rhs.denominator),
        )
    }
}

impl Mul for &Value {
    type Output = Value;

    /// The raw product divided by pi, keeping integers closed under `*`.
    fn mul(self, rhs: &Value) -> Value {
        Value::new(
            poly_mul(&self.numerator, &rhs.numerator),
            poly_shift(poly_mul(&self.denominator, &rhs.denominator)),
        )
    }
}

impl fmt::Display for Value {
    /// Letter values print as their (canonically rotated) letters, anything
    /// else as `{numerator coefficients}{denominator coefficients}`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(letters) = self.to_letters() {
            return f.write_str(&letters);
        }
        let write_poly = |f: &mut fmt::Formatter, poly: &[BigInt]| -> fmt::Result {
            f.write_str("{")?;
            for (i, c) in poly.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", c)?;
            }
            f.write_str("}")
        };
        write_poly(f, &self.numerator)?;
        write_poly(f, &self.denominator)
    }
}

/// Applies a binary operator with the language's semantics. Comparisons and
/// boolean operators return the canonical pi / 0 values.
pub fn binary(kind: op::Binary, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    Ok(match kind {
        op::Binary::Plus => lhs + rhs,
        op::Binary::Minus => lhs - rhs,
        op::Binary::Multiply => lhs * rhs,
        op::Binary::Divide => lhs.checked_div(rhs).ok_or(EvalError::DivisionByZero)?,
        op::Binary::BoolAnd => Value::from_bool(lhs.is_truthy() && rhs.is_truthy()),
        op::Binary::BoolOr => Value::from_bool(lhs.is_truthy() || rhs.is_truthy()),
        op::Binary::Equal => Value::from_bool(lhs.equal(rhs)),
        op::Binary::NotEqual => Value::from_bool(!lhs.equal(rhs)),
        op::Binary::Smaller => Value::from_bool(lhs.less_than(rhs)?),
        op::Binary::SmallerOrEqual => Value::from_bool(!rhs.less_than(lhs)?),
        op::Binary::Greater => Value::from_bool(rhs.less_than(lhs)?),
        op::Binary::GreaterOrEqual => Value::from_bool(!lhs.less_than(rhs)?),
    })
}

pub fn unary(kind: op::Unary, rhs: &Value) -> Value {
    match kind {
        op::Unary::BoolNot => Value::from_bool(!rhs.is_truthy()),
    }
}

const PI_SUBSTITUTE: i64 = 314_159;

fn substitute_pi(poly: &[BigInt]) -> BigInt {
    let p = BigInt::from(PI_SUBSTITUTE);
    let mut total = BigInt::zero();
    for c in poly.iter().rev() {
        total = total * &p + c;
    }
    total
}

fn hash_big_int(n: &BigInt) -> u64 {
    let mut hasher = DefaultHasher::new();
    n.to_string().hash(&mut hasher);
    hasher.finish()
}

/// Substitutes the prime 314159 for pi in both polynomials, reduces the
/// resulting fraction, canonicalises the sign on the denominator and takes
/// the numerator modulo `denominator * length * 314159`. Values that differ
/// by a multiple of `length * pi` land on the same hash.
fn compute_hash(value: &Value, length: i64) -> u64 {
    let mut n = substitute_pi(value.numerator());
    let mut d = substitute_pi(value.denominator());
    let gcd = n.gcd(&d);
    if !gcd.is_zero() {
        n = n / &gcd;
        d = d / &gcd;
    }
    if d.is_negative() {
        n = -n;
        d = -d;
    }
    let modulus = &d * BigInt::from(length) * BigInt::from(PI_SUBSTITUTE);
    if !modulus.is_zero() {
        n = n.mod_floor(&modulus);
    }
    hash_big_int(&n) ^ hash_big_int(&d)
}

/// An array key: the equivalence class of `value` modulo `length * pi`.
/// This is what makes every array circular.
#[derive(Clone, Debug)]
pub struct Index {
    value: Value,
    length: i64,
    hash: u64,
}

impl Index {
    pub fn new(value: Value, length: i64) -> Index {
        let hash = compute_hash(&value, length);
        Index {
            value,
            length,
            hash,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn length(&self) -> i64 {
        self.length
    }
}

impl PartialEq for Index {
    /// Equal iff the difference of the two values is an integer multiple of
    /// `length * pi`: the cross-multiplied difference must be pi times a
    /// single integer multiple of the combined denominator scaled by
    /// `length`.
    fn eq(&self, other: &Index) -> bool {
        if self.length != other.length {
            return false;
        }
        let mut diff = poly_sub(
            &poly_mul(self.value.numerator(), other.value.denominator()),
            &poly_mul(other.value.numerator(), self.value.denominator()),
        );
        trim_zeros(&mut diff);
        if diff.is_empty() {
            return true;
        }
        let den = poly_mul(self.value.denominator(), other.value.denominator());
        if !diff[0].is_zero() || diff.len() != den.len() + 1 {
            return false;
        }
        let mut k: Option<BigInt> = None;
        for (c, d) in diff[1..].iter().zip(den.iter()) {
            let scaled = d * BigInt::from(self.length);
            if scaled.is_zero() {
                if !c.is_zero() {
                    return false;
                }
                continue;
            }
            let (quotient, remainder) = c.div_rem(&scaled);
            if !remainder.is_zero() {
                return false;
            }
            match &k {
                None => k = Some(quotient),
                Some(k0) => {
                    if *k0 != quotient {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl Eq for Index {}

impl Hash for Index {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}
