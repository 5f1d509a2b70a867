//! Exact rationals kept in lowest terms.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{AddAssign, DivAssign, MulAssign, Neg, SubAssign};
use std::str::FromStr;

use num_traits::{One, ToPrimitive, Zero};

use crate::error::{ParseRationalError, RationalError};
use crate::integer::BigInteger;

/// Greatest common divisor of `|a|` and `|b|` by the Euclidean algorithm.
///
/// `gcd(0, 0)` is zero.
#[must_use]
pub fn gcd(a: &BigInteger, b: &BigInteger) -> BigInteger {
    let mut a = a.abs();
    let mut b = b.abs();
    if b > a {
        std::mem::swap(&mut a, &mut b);
    }
    while !b.is_zero() {
        a %= &b;
        std::mem::swap(&mut a, &mut b);
    }
    a
}

/// A rational number `p/q` with `q > 0` and `gcd(|p|, q) == 1`.
///
/// # Example
/// ```
/// use tessera_numeric::{BigInteger, Rational};
///
/// let third = Rational::new(BigInteger::from(1), BigInteger::from(3));
/// assert_eq!(third.as_decimal(4), "0.3333");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInteger,
    denom: BigInteger,
}

impl Rational {
    /// Build `numer/denom` in lowest terms.
    ///
    /// # Panics
    /// Panics if `denom` is zero.
    #[must_use]
    pub fn new(numer: BigInteger, denom: BigInteger) -> Self {
        assert!(!denom.is_zero(), "zero denominator");
        let mut value = Self { numer, denom };
        value.fix_sign();
        value.reduce();
        value
    }

    /// Like [`Rational::new`], but reports a zero denominator as an error.
    pub fn try_new(numer: BigInteger, denom: BigInteger) -> Result<Self, RationalError> {
        if denom.is_zero() {
            return Err(RationalError::ZeroDenominator);
        }
        Ok(Self::new(numer, denom))
    }

    /// The value zero (`0/1`).
    #[must_use]
    pub fn zero() -> Self {
        Self::from(BigInteger::zero())
    }

    /// The value one (`1/1`).
    #[must_use]
    pub fn one() -> Self {
        Self::from(BigInteger::one())
    }

    /// Numerator; carries the sign.
    #[must_use]
    pub fn numer(&self) -> &BigInteger {
        &self.numer
    }

    /// Denominator; always positive.
    #[must_use]
    pub fn denom(&self) -> &BigInteger {
        &self.denom
    }

    /// True iff the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// True iff the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    /// Decimal expansion truncated to `precision` fractional digits.
    ///
    /// A zero precision renders the integer part only. Negative values whose
    /// integer part is zero keep their sign (`-1/3` at precision 2 gives `-0.33`).
    #[must_use]
    pub fn as_decimal(&self, precision: usize) -> String {
        let (integer, remainder) = self.numer.div_rem(&self.denom);
        let mut out = String::new();
        if integer.is_zero() && self.numer.is_negative() {
            out.push('-');
        }
        out.push_str(&integer.to_string());
        if precision == 0 {
            return out;
        }

        let fraction = remainder.abs() * BigInteger::power_of_ten(precision) / &self.denom;
        let digits = fraction.to_string();
        out.push('.');
        for _ in digits.len()..precision {
            out.push('0');
        }
        out.push_str(&digits);
        out
    }

    /// Move a negative denominator's sign onto the numerator.
    fn fix_sign(&mut self) {
        if self.denom.is_negative() {
            self.numer.negate();
            self.denom.negate();
        }
    }

    fn reduce(&mut self) {
        let divisor = gcd(&self.numer, &self.denom);
        if !divisor.is_one() {
            self.numer /= &divisor;
            self.denom /= &divisor;
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<BigInteger> for Rational {
    fn from(numer: BigInteger) -> Self {
        Self {
            numer,
            denom: BigInteger::one(),
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from(BigInteger::from(n))
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (numer, denom) = match s.split_once('/') {
            Some((numer, denom)) => (numer, Some(denom)),
            None => (s, None),
        };
        let numer: BigInteger = numer.parse().map_err(ParseRationalError::Numerator)?;
        let Some(denom) = denom else {
            return Ok(Self::from(numer));
        };
        let denom: BigInteger = denom.parse().map_err(ParseRationalError::Denominator)?;
        Self::try_new(numer, denom).map_err(|_| ParseRationalError::ZeroDenominator)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numer * &other.denom).cmp(&(&self.denom * &other.numer))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AddAssign<&Rational> for Rational {
    fn add_assign(&mut self, rhs: &Rational) {
        self.numer *= &rhs.denom;
        self.numer += &(&rhs.numer * &self.denom);
        self.denom *= &rhs.denom;
        self.reduce();
    }
}

impl SubAssign<&Rational> for Rational {
    fn sub_assign(&mut self, rhs: &Rational) {
        self.numer *= &rhs.denom;
        self.numer -= &(&rhs.numer * &self.denom);
        self.denom *= &rhs.denom;
        self.reduce();
    }
}

impl MulAssign<&Rational> for Rational {
    fn mul_assign(&mut self, rhs: &Rational) {
        if self.is_zero() {
            return;
        }
        self.numer *= &rhs.numer;
        self.denom *= &rhs.denom;
        self.reduce();
    }
}

impl DivAssign<&Rational> for Rational {
    /// # Panics
    /// Panics if `rhs` is zero.
    fn div_assign(&mut self, rhs: &Rational) {
        assert!(!rhs.is_zero(), "attempt to divide by zero");
        if self.is_zero() {
            return;
        }
        self.numer *= &rhs.denom;
        self.denom *= &rhs.numer;
        self.fix_sign();
        self.reduce();
    }
}

forward_all_binops!(Rational);

impl Neg for Rational {
    type Output = Rational;

    fn neg(mut self) -> Rational {
        self.numer.negate();
        self
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        -self.clone()
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Rational::zero()
    }

    fn is_zero(&self) -> bool {
        Rational::is_zero(self)
    }
}

impl One for Rational {
    fn one() -> Self {
        Rational::one()
    }
}

impl ToPrimitive for Rational {
    /// Integer part, truncated toward zero.
    fn to_i64(&self) -> Option<i64> {
        (&self.numer / &self.denom).to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        (&self.numer / &self.denom).to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        self.as_decimal(30).parse().ok()
    }
}

serde_via_string!(Rational);

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(p: i64, q: i64) -> Rational {
        Rational::new(BigInteger::from(p), BigInteger::from(q))
    }

    #[test]
    fn construction_reduces_and_fixes_sign() {
        let r = rat(6, -8);
        assert_eq!(r.numer(), &BigInteger::from(-3));
        assert_eq!(r.denom(), &BigInteger::from(4));
        assert_eq!(rat(0, -5), Rational::zero());
        assert_eq!(rat(-4, -2), Rational::from(2));
    }

    #[test]
    #[should_panic(expected = "zero denominator")]
    fn zero_denominator_panics() {
        let _ = rat(1, 0);
    }

    #[test]
    fn try_new_reports_zero_denominator() {
        assert_eq!(
            Rational::try_new(BigInteger::one(), BigInteger::zero()),
            Err(RationalError::ZeroDenominator)
        );
    }

    #[test]
    fn gcd_of_signed_values() {
        let g = gcd(&BigInteger::from(-48), &BigInteger::from(18));
        assert_eq!(g, BigInteger::from(6));
        assert_eq!(gcd(&BigInteger::zero(), &BigInteger::from(7)), BigInteger::from(7));
        assert_eq!(gcd(&BigInteger::zero(), &BigInteger::zero()), BigInteger::zero());
    }

    #[test]
    fn arithmetic_stays_reduced() {
        assert_eq!(rat(1, 6) + rat(1, 3), rat(1, 2));
        assert_eq!(rat(1, 2) - rat(3, 4), rat(-1, 4));
        assert_eq!(rat(2, 3) * rat(9, 4), rat(3, 2));
        assert_eq!(rat(2, 3) / rat(-4, 9), rat(-3, 2));
        assert_eq!(rat(5, 7) - rat(5, 7), Rational::zero());
    }

    #[test]
    fn zero_short_circuits() {
        assert_eq!(Rational::zero() * rat(7, 3), Rational::zero());
        assert_eq!(Rational::zero() / rat(-7, 3), Rational::zero());
        assert_eq!(rat(7, 3) * Rational::zero(), Rational::zero());
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn division_by_zero_panics() {
        let _ = rat(1, 2) / Rational::zero();
    }

    #[test]
    fn display_forms() {
        assert_eq!(rat(4, 2).to_string(), "2");
        assert_eq!(rat(-1, 3).to_string(), "-1/3");
        assert_eq!(Rational::zero().to_string(), "0");
    }

    #[test]
    fn parse_forms() {
        assert_eq!("3/-6".parse::<Rational>(), Ok(rat(-1, 2)));
        assert_eq!("42".parse::<Rational>(), Ok(Rational::from(42)));
        assert_eq!(
            "1/0".parse::<Rational>(),
            Err(ParseRationalError::ZeroDenominator)
        );
        assert!(matches!(
            "x/2".parse::<Rational>(),
            Err(ParseRationalError::Numerator(_))
        ));
        assert!(matches!(
            "2/".parse::<Rational>(),
            Err(ParseRationalError::Denominator(_))
        ));
    }

    #[test]
    fn decimal_rendering() {
        assert_eq!(rat(1, 3).as_decimal(4), "0.3333");
        assert_eq!(rat(-1, 3).as_decimal(4), "-0.3333");
        assert_eq!(rat(-7, 2).as_decimal(2), "-3.50");
        assert_eq!(rat(1, 200).as_decimal(3), "0.005");
        assert_eq!(rat(22, 7).as_decimal(0), "3");
        assert_eq!(rat(-1, 3).as_decimal(0), "-0");
        assert_eq!(Rational::from(5).as_decimal(3), "5.000");
        assert_eq!(rat(1, 7).as_decimal(20), "0.14285714285714285714");
    }

    #[test]
    fn ordering_by_cross_multiplication() {
        assert!(rat(1, 3) < rat(1, 2));
        assert!(rat(-1, 2) < rat(-1, 3));
        assert!(rat(-1, 2) < Rational::zero());
        assert_eq!(rat(2, 4).cmp(&rat(1, 2)), Ordering::Equal);
    }

    #[test]
    fn float_conversion() {
        let third = rat(1, 3).to_f64().unwrap();
        assert!((third - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(rat(-7, 2).to_f64(), Some(-3.5));
        assert_eq!(rat(-7, 2).to_i64(), Some(-3));
    }

    #[test]
    fn serde_as_string() {
        let r = rat(-3, 9);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"-1/3\"");
        let back: Rational = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
