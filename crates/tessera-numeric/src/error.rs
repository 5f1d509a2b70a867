//! Error types for parsing and constructing numbers.

/// Error returned when parsing a [`BigInteger`](crate::BigInteger) from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBigIntegerError {
    /// The input (after an optional sign) had no digits.
    #[error("cannot parse integer from empty string")]
    Empty,

    /// A character other than an ASCII digit was found.
    #[error("invalid digit {found:?} at position {position}")]
    InvalidDigit {
        /// Byte offset of the offending character in the input.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// Only decimal text is supported.
    #[error("unsupported radix {0}, only base 10 is supported")]
    UnsupportedRadix(u32),
}

/// Error returned when constructing a [`Rational`](crate::Rational).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RationalError {
    /// The denominator was zero.
    #[error("zero denominator")]
    ZeroDenominator,
}

/// Error returned when parsing a [`Rational`](crate::Rational) from `"p"` or `"p/q"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRationalError {
    /// The numerator is not a valid integer.
    #[error("invalid numerator: {0}")]
    Numerator(#[source] ParseBigIntegerError),

    /// The denominator is not a valid integer.
    #[error("invalid denominator: {0}")]
    Denominator(#[source] ParseBigIntegerError),

    /// The denominator parsed as zero.
    #[error("zero denominator")]
    ZeroDenominator,
}
