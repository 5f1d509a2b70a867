//! Arbitrary-precision signed integer.
//!
//! The magnitude is stored as little-endian base-10^9 groups so that decimal
//! rendering and parsing never need a radix conversion. All arithmetic works on
//! magnitude slices; the sign is resolved separately and never flipped on an
//! operand that is only borrowed.

use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::ops::{AddAssign, DivAssign, MulAssign, Neg, RemAssign, SubAssign};
use std::str::FromStr;

use num_traits::{Num, One, Signed, ToPrimitive, Zero};

use crate::error::ParseBigIntegerError;

/// Radix of one digit group.
pub const BASE: u32 = 1_000_000_000;

/// Decimal digits held by one group.
pub const GROUP_DIGITS: usize = 9;

const BASE_U64: u64 = 1_000_000_000;

/// An arbitrary-precision signed integer.
///
/// The representation is canonical: no most-significant zero groups (zero is the
/// single group `0`) and zero is never negative, so derived equality and hashing
/// are value equality.
///
/// # Example
/// ```
/// use tessera_numeric::BigInteger;
///
/// let a: BigInteger = "123456789123456789".parse().unwrap();
/// let b = BigInteger::from(-2);
/// assert_eq!((a * b).to_string(), "-246913578246913578");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    negative: bool,
    digits: Vec<u32>,
}

impl BigInteger {
    /// The value zero.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: vec![0],
        }
    }

    /// The value one.
    #[must_use]
    pub fn one() -> Self {
        Self {
            negative: false,
            digits: vec![1],
        }
    }

    /// `10^exp`, built directly in group form.
    #[must_use]
    pub fn power_of_ten(exp: usize) -> Self {
        let mut digits = vec![0; exp / GROUP_DIGITS + 1];
        let mut top = 1u32;
        for _ in 0..exp % GROUP_DIGITS {
            top *= 10;
        }
        digits[exp / GROUP_DIGITS] = top;
        Self {
            negative: false,
            digits,
        }
    }

    /// Base-10^9 groups of the magnitude, least significant first.
    #[must_use]
    pub fn groups(&self) -> &[u32] {
        &self.digits
    }

    /// True iff the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 0
    }

    /// True iff the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// True iff the value is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            digits: self.digits.clone(),
        }
    }

    /// `-1`, `0` or `1` according to the sign.
    #[must_use]
    pub fn signum(&self) -> Self {
        if self.is_zero() {
            Self::zero()
        } else if self.negative {
            Self::from(-1)
        } else {
            Self::one()
        }
    }

    /// Flip the sign in place. Zero stays non-negative.
    pub fn negate(&mut self) {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
    }

    /// Add one in place.
    pub fn inc(&mut self) {
        self.add_signed(false, &[1]);
    }

    /// Subtract one in place.
    pub fn dec(&mut self) {
        self.add_signed(true, &[1]);
    }

    /// Raise to a non-negative power by repeated squaring.
    #[must_use]
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result *= &base;
            }
            exp >>= 1;
            if exp > 0 {
                let square = &base * &base;
                base = square;
            }
        }
        result
    }

    /// Truncating quotient and remainder from a single long division.
    ///
    /// The remainder carries the sign of the dividend, so
    /// `divisor * quotient + remainder == self`.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    #[must_use]
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "attempt to divide by zero");
        if cmp_magnitude(&self.digits, &divisor.digits) == Ordering::Less {
            return (Self::zero(), self.clone());
        }
        let (quotient, remainder) = div_rem_magnitude(&self.digits, &divisor.digits);
        let mut quotient = Self {
            negative: self.negative != divisor.negative,
            digits: quotient,
        };
        let mut remainder = Self {
            negative: self.negative,
            digits: remainder,
        };
        quotient.normalize();
        remainder.normalize();
        (quotient, remainder)
    }

    /// Quotient, or `None` if `divisor` is zero.
    #[must_use]
    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        Some(self / divisor)
    }

    /// Remainder, or `None` if `divisor` is zero.
    #[must_use]
    pub fn checked_rem(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        Some(self % divisor)
    }

    /// Compare absolute values.
    #[must_use]
    pub fn cmp_abs(&self, other: &Self) -> Ordering {
        cmp_magnitude(&self.digits, &other.digits)
    }

    fn set_zero(&mut self) {
        self.negative = false;
        self.digits.clear();
        self.digits.push(0);
    }

    /// Trim most-significant zero groups and force zero non-negative.
    fn normalize(&mut self) {
        trim(&mut self.digits);
        if self.is_zero() {
            self.negative = false;
        }
    }

    /// `self += (-1)^rhs_negative * rhs`, without touching the other operand.
    fn add_signed(&mut self, rhs_negative: bool, rhs: &[u32]) {
        if self.negative == rhs_negative {
            add_magnitude(&mut self.digits, rhs);
        } else {
            match cmp_magnitude(&self.digits, rhs) {
                Ordering::Greater => sub_magnitude(&mut self.digits, rhs),
                Ordering::Equal => self.set_zero(),
                Ordering::Less => {
                    let mut larger = rhs.to_vec();
                    sub_magnitude(&mut larger, &self.digits);
                    self.digits = larger;
                    self.negative = rhs_negative;
                }
            }
        }
        self.normalize();
    }
}

fn trim(digits: &mut Vec<u32>) {
    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
    }
    if digits.is_empty() {
        digits.push(0);
    }
}

/// Compare two canonical magnitudes: group count first, then groups from the top.
fn cmp_magnitude(a: &[u32], b: &[u32]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

/// Add with carry in base 10^9: a + b + carry -> (group, `new_carry`)
#[inline]
#[must_use]
fn add_with_carry(a: u32, b: u32, carry: u32) -> (u32, u32) {
    let sum = a + b + carry;
    if sum >= BASE {
        (sum - BASE, 1)
    } else {
        (sum, 0)
    }
}

/// Subtract with borrow in base 10^9: a - b - borrow -> (group, `new_borrow`)
#[inline]
#[must_use]
fn sub_with_borrow(a: u32, b: u32, borrow: u32) -> (u32, u32) {
    let sub = b + borrow;
    if a >= sub {
        (a - sub, 0)
    } else {
        (a + BASE - sub, 1)
    }
}

/// `acc += rhs` with carry propagation.
fn add_magnitude(acc: &mut Vec<u32>, rhs: &[u32]) {
    if acc.len() < rhs.len() {
        acc.resize(rhs.len(), 0);
    }
    let mut carry = 0u32;
    for (i, slot) in acc.iter_mut().enumerate() {
        (*slot, carry) = add_with_carry(*slot, rhs.get(i).copied().unwrap_or(0), carry);
        if carry == 0 && i + 1 >= rhs.len() {
            break;
        }
    }
    if carry == 1 {
        acc.push(1);
    }
}

/// `acc -= rhs` with borrow propagation. Requires `|acc| >= |rhs|`.
fn sub_magnitude(acc: &mut Vec<u32>, rhs: &[u32]) {
    let mut borrow = 0u32;
    for (i, slot) in acc.iter_mut().enumerate() {
        (*slot, borrow) = sub_with_borrow(*slot, rhs.get(i).copied().unwrap_or(0), borrow);
        if borrow == 0 && i + 1 >= rhs.len() {
            break;
        }
    }
    debug_assert_eq!(borrow, 0, "subtrahend larger than minuend");
    trim(acc);
}

/// Schoolbook product with per-cell carry folding.
#[allow(clippy::cast_possible_truncation)]
fn mul_magnitude(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut cells = vec![0u64; a.len() + b.len() + 1];
    for (i, &x) in b.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &y) in a.iter().enumerate() {
            let cur = cells[i + j] + u64::from(x) * u64::from(y) + carry;
            cells[i + j] = cur % BASE_U64;
            carry = cur / BASE_U64;
        }
        let mut k = i + a.len();
        while carry > 0 {
            let cur = cells[k] + carry;
            cells[k] = cur % BASE_U64;
            carry = cur / BASE_U64;
            k += 1;
        }
    }
    let mut digits: Vec<u32> = cells.into_iter().map(|c| c as u32).collect();
    trim(&mut digits);
    digits
}

/// `a * d` for a single group `d`.
#[allow(clippy::cast_possible_truncation)]
fn mul_group(a: &[u32], d: u32) -> Vec<u32> {
    if d == 0 {
        return vec![0];
    }
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry = 0u64;
    for &x in a {
        let cur = u64::from(x) * u64::from(d) + carry;
        out.push((cur % BASE_U64) as u32);
        carry = cur / BASE_U64;
    }
    if carry > 0 {
        out.push(carry as u32);
    }
    trim(&mut out);
    out
}

/// Shift the remainder one group up and bring in the next dividend group.
fn shift_in(remainder: &mut Vec<u32>, group: u32) {
    if remainder.len() == 1 && remainder[0] == 0 {
        remainder[0] = group;
    } else {
        remainder.insert(0, group);
    }
}

/// Long division by digit search. Requires a nonzero divisor.
///
/// For every dividend group from the top, the largest `d` in `[0, BASE)` with
/// `divisor * d <= remainder` is found by binary search.
fn div_rem_magnitude(dividend: &[u32], divisor: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let mut quotient = vec![0u32; dividend.len()];
    let mut remainder = vec![0u32];
    for i in (0..dividend.len()).rev() {
        shift_in(&mut remainder, dividend[i]);
        // divisor * lo <= remainder < divisor * hi
        let (mut lo, mut hi) = (0u32, BASE);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if cmp_magnitude(&mul_group(divisor, mid), &remainder) == Ordering::Greater {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        quotient[i] = lo;
        if lo > 0 {
            sub_magnitude(&mut remainder, &mul_group(divisor, lo));
        }
    }
    trim(&mut quotient);
    (quotient, remainder)
}

impl Default for BigInteger {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<u64> for BigInteger {
    #[allow(clippy::cast_possible_truncation)]
    fn from(mut n: u64) -> Self {
        let mut digits = Vec::with_capacity(3);
        loop {
            digits.push((n % BASE_U64) as u32);
            n /= BASE_U64;
            if n == 0 {
                break;
            }
        }
        Self {
            negative: false,
            digits,
        }
    }
}

impl From<i64> for BigInteger {
    fn from(n: i64) -> Self {
        let mut value = Self::from(n.unsigned_abs());
        value.negative = n < 0;
        value.normalize();
        value
    }
}

impl From<u32> for BigInteger {
    fn from(n: u32) -> Self {
        Self::from(u64::from(n))
    }
}

impl From<i32> for BigInteger {
    fn from(n: i32) -> Self {
        Self::from(i64::from(n))
    }
}

impl From<usize> for BigInteger {
    fn from(n: usize) -> Self {
        Self::from(n as u64)
    }
}

impl From<&BigInteger> for bool {
    /// Nonzero test.
    fn from(value: &BigInteger) -> bool {
        !value.is_zero()
    }
}

impl FromStr for BigInteger {
    type Err = ParseBigIntegerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if body.is_empty() {
            return Err(ParseBigIntegerError::Empty);
        }
        if let Some(pos) = body.bytes().position(|b| !b.is_ascii_digit()) {
            return Err(ParseBigIntegerError::InvalidDigit {
                position: pos + usize::from(negative),
                found: body[pos..].chars().next().unwrap_or('?'),
            });
        }

        let bytes = body.as_bytes();
        let mut digits = Vec::with_capacity(bytes.len().div_ceil(GROUP_DIGITS));
        let mut end = bytes.len();
        while end > 0 {
            let start = end.saturating_sub(GROUP_DIGITS);
            let group = bytes[start..end]
                .iter()
                .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'));
            digits.push(group);
            end = start;
        }

        let mut value = Self { negative, digits };
        value.normalize();
        Ok(value)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::with_capacity(self.digits.len() * GROUP_DIGITS);
        let mut groups = self.digits.iter().rev();
        if let Some(top) = groups.next() {
            write!(text, "{top}")?;
        }
        for group in groups {
            write!(text, "{group:09}")?;
        }
        f.pad_integral(!self.negative, "", &text)
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInteger({self})")
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => cmp_magnitude(&self.digits, &other.digits),
            (true, true) => cmp_magnitude(&other.digits, &self.digits),
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AddAssign<&BigInteger> for BigInteger {
    fn add_assign(&mut self, rhs: &BigInteger) {
        self.add_signed(rhs.negative, &rhs.digits);
    }
}

impl SubAssign<&BigInteger> for BigInteger {
    fn sub_assign(&mut self, rhs: &BigInteger) {
        if rhs.is_zero() {
            return;
        }
        self.add_signed(!rhs.negative, &rhs.digits);
    }
}

impl MulAssign<&BigInteger> for BigInteger {
    fn mul_assign(&mut self, rhs: &BigInteger) {
        if self.is_zero() || rhs.is_zero() {
            self.set_zero();
            return;
        }
        self.digits = mul_magnitude(&self.digits, &rhs.digits);
        self.negative = self.negative != rhs.negative;
        self.normalize();
    }
}

impl DivAssign<&BigInteger> for BigInteger {
    /// Truncating division.
    ///
    /// # Panics
    /// Panics if `rhs` is zero.
    fn div_assign(&mut self, rhs: &BigInteger) {
        assert!(!rhs.is_zero(), "attempt to divide by zero");
        if cmp_magnitude(&self.digits, &rhs.digits) == Ordering::Less {
            self.set_zero();
            return;
        }
        let (quotient, _) = div_rem_magnitude(&self.digits, &rhs.digits);
        self.digits = quotient;
        self.negative = self.negative != rhs.negative;
        self.normalize();
    }
}

impl RemAssign<&BigInteger> for BigInteger {
    /// `self - rhs * (self / rhs)`.
    ///
    /// # Panics
    /// Panics if `rhs` is zero.
    fn rem_assign(&mut self, rhs: &BigInteger) {
        let quotient = &*self / rhs;
        *self -= &(rhs * &quotient);
    }
}

forward_all_binops!(BigInteger);
forward_binop!(BigInteger, Rem, rem, RemAssign, rem_assign);

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(mut self) -> BigInteger {
        self.negate();
        self
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        -self.clone()
    }
}

impl Zero for BigInteger {
    fn zero() -> Self {
        BigInteger::zero()
    }

    fn is_zero(&self) -> bool {
        BigInteger::is_zero(self)
    }
}

impl One for BigInteger {
    fn one() -> Self {
        BigInteger::one()
    }
}

impl Num for BigInteger {
    type FromStrRadixErr = ParseBigIntegerError;

    fn from_str_radix(text: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        if radix != 10 {
            return Err(ParseBigIntegerError::UnsupportedRadix(radix));
        }
        text.parse()
    }
}

impl Signed for BigInteger {
    fn abs(&self) -> Self {
        BigInteger::abs(self)
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::zero()
        } else {
            self - other
        }
    }

    fn signum(&self) -> Self {
        BigInteger::signum(self)
    }

    fn is_positive(&self) -> bool {
        BigInteger::is_positive(self)
    }

    fn is_negative(&self) -> bool {
        BigInteger::is_negative(self)
    }
}

impl ToPrimitive for BigInteger {
    fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|v| i64::try_from(v).ok())
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_i128().and_then(|v| u64::try_from(v).ok())
    }

    fn to_i128(&self) -> Option<i128> {
        let mut acc: i128 = 0;
        for &group in self.digits.iter().rev() {
            acc = acc.checked_mul(i128::from(BASE))?.checked_add(i128::from(group))?;
        }
        Some(if self.negative { -acc } else { acc })
    }

    fn to_u128(&self) -> Option<u128> {
        self.to_i128().and_then(|v| u128::try_from(v).ok())
    }

    fn to_f64(&self) -> Option<f64> {
        let magnitude = self
            .digits
            .iter()
            .rev()
            .fold(0f64, |acc, &group| acc * f64::from(BASE) + f64::from(group));
        Some(if self.negative { -magnitude } else { magnitude })
    }
}

serde_via_string!(BigInteger);
