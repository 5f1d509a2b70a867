//! Binary expression evaluation over `BigInteger` and `Rational`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tessera_numeric::{BigInteger, Rational};

use crate::errors::CliError;

/// A binary operator accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    /// `+`
    #[serde(rename = "+")]
    Add,
    /// `-`
    #[serde(rename = "-")]
    Sub,
    /// `*`
    #[serde(rename = "*")]
    Mul,
    /// `/`
    #[serde(rename = "/")]
    Div,
    /// `%`
    #[serde(rename = "%")]
    Rem,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `==`
    #[serde(rename = "==")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    Ne,
}

impl Operator {
    /// Every operator, in the order they are documented.
    pub const ALL: [Self; 11] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::Eq,
        Self::Ne,
    ];

    /// The operator's symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }

    /// Outcome of a comparison operator for the given ordering, or `None`
    /// for arithmetic operators.
    fn compare(self, ordering: Ordering) -> Option<bool> {
        match self {
            Self::Lt => Some(ordering.is_lt()),
            Self::Le => Some(ordering.is_le()),
            Self::Gt => Some(ordering.is_gt()),
            Self::Ge => Some(ordering.is_ge()),
            Self::Eq => Some(ordering.is_eq()),
            Self::Ne => Some(ordering.is_ne()),
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Rem => None,
        }
    }
}

impl FromStr for Operator {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| CliError::Operator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The result of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// An integer result.
    Integer(BigInteger),
    /// A fraction result, always in lowest terms.
    Rational(Rational),
    /// A comparison result.
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Rational(r) => write!(f, "{r}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Which number type operands are parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Both operands are integers.
    Integer,
    /// Both operands are fractions.
    Rational,
    /// Fractions if either operand contains `/`, integers otherwise.
    Auto,
}

/// One evaluated expression, ready for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Left operand as written.
    pub lhs: String,
    /// The operator.
    pub op: Operator,
    /// Right operand as written.
    pub rhs: String,
    /// The exact result.
    pub result: Value,
    /// Decimal expansion of a non-integral fraction result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal: Option<String>,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.decimal {
            Some(decimal) => write!(f, "{} = {decimal}", self.result),
            None => write!(f, "{}", self.result),
        }
    }
}

/// Parse an integer operand.
pub fn parse_integer(input: &str) -> Result<BigInteger, CliError> {
    input.parse().map_err(|source| CliError::Integer {
        input: input.to_string(),
        source,
    })
}

/// Parse a fraction operand (`p` or `p/q`).
pub fn parse_rational(input: &str) -> Result<Rational, CliError> {
    input.parse().map_err(|source| CliError::Rational {
        input: input.to_string(),
        source,
    })
}

/// Apply `op` to two integers. `/` and `%` truncate toward zero.
pub fn eval_integers(lhs: &BigInteger, op: Operator, rhs: &BigInteger) -> Result<Value, CliError> {
    if let Some(holds) = op.compare(lhs.cmp(rhs)) {
        return Ok(Value::Bool(holds));
    }
    let result = match op {
        Operator::Add => lhs + rhs,
        Operator::Sub => lhs - rhs,
        Operator::Mul => lhs * rhs,
        Operator::Div => lhs.checked_div(rhs).ok_or(CliError::DivisionByZero)?,
        _ => lhs.checked_rem(rhs).ok_or(CliError::DivisionByZero)?,
    };
    Ok(Value::Integer(result))
}

/// Apply `op` to two fractions.
///
/// `%` leaves `lhs - rhs * trunc(lhs / rhs)`, matching integer remainder on
/// integral operands.
pub fn eval_rationals(lhs: &Rational, op: Operator, rhs: &Rational) -> Result<Value, CliError> {
    if let Some(holds) = op.compare(lhs.cmp(rhs)) {
        return Ok(Value::Bool(holds));
    }
    if matches!(op, Operator::Div | Operator::Rem) && rhs.is_zero() {
        return Err(CliError::DivisionByZero);
    }
    let result = match op {
        Operator::Add => lhs + rhs,
        Operator::Sub => lhs - rhs,
        Operator::Mul => lhs * rhs,
        Operator::Div => lhs / rhs,
        _ => {
            let quotient = lhs / rhs;
            let truncated = Rational::from(quotient.numer() / quotient.denom());
            lhs - &(rhs * &truncated)
        }
    };
    Ok(Value::Rational(result))
}

/// Parse and evaluate `lhs op rhs`.
pub fn evaluate(
    lhs: &str,
    op: Operator,
    rhs: &str,
    mode: Mode,
    precision: usize,
) -> Result<Evaluation, CliError> {
    let rational = match mode {
        Mode::Integer => false,
        Mode::Rational => true,
        Mode::Auto => lhs.contains('/') || rhs.contains('/'),
    };
    let result = if rational {
        eval_rationals(&parse_rational(lhs)?, op, &parse_rational(rhs)?)?
    } else {
        eval_integers(&parse_integer(lhs)?, op, &parse_integer(rhs)?)?
    };
    let decimal = match &result {
        Value::Rational(r) if !r.is_integer() => Some(r.as_decimal(precision)),
        _ => None,
    };
    Ok(Evaluation {
        lhs: lhs.to_string(),
        op,
        rhs: rhs.to_string(),
        result,
        decimal,
    })
}

/// Evaluate a whitespace-separated `LHS OP RHS` line.
pub fn evaluate_line(line: &str, precision: usize) -> Result<Evaluation, CliError> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(lhs), Some(op), Some(rhs), None) => {
            evaluate(lhs, op.parse()?, rhs, Mode::Auto, precision)
        }
        _ => Err(CliError::Expression(line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(s: &str) -> Value {
        Value::Integer(s.parse().unwrap())
    }

    #[test]
    fn operators_round_trip_through_symbols() {
        for op in Operator::ALL {
            assert_eq!(op.symbol().parse::<Operator>().unwrap(), op);
        }
        assert!(matches!("^".parse::<Operator>(), Err(CliError::Operator(s)) if s == "^"));
    }

    #[test]
    fn integer_arithmetic() {
        let e = evaluate("123456789123456789", Operator::Mul, "-2", Mode::Integer, 0).unwrap();
        assert_eq!(e.result, int("-246913578246913578"));
        let e = evaluate("-7", Operator::Div, "2", Mode::Integer, 0).unwrap();
        assert_eq!(e.result, int("-3"));
        let e = evaluate("-7", Operator::Rem, "2", Mode::Integer, 0).unwrap();
        assert_eq!(e.result, int("-1"));
        let e = evaluate("10", Operator::Ge, "10", Mode::Integer, 0).unwrap();
        assert_eq!(e.result, Value::Bool(true));
    }

    #[test]
    fn division_by_zero_is_reported() {
        for op in [Operator::Div, Operator::Rem] {
            assert!(matches!(
                evaluate("1", op, "0", Mode::Integer, 0),
                Err(CliError::DivisionByZero)
            ));
            assert!(matches!(
                evaluate("1/2", op, "0/5", Mode::Rational, 0),
                Err(CliError::DivisionByZero)
            ));
        }
    }

    #[test]
    fn fraction_results_carry_decimal() {
        let e = evaluate("1/3", Operator::Add, "1/6", Mode::Rational, 4).unwrap();
        assert_eq!(e.to_string(), "1/2 = 0.5000");
        let e = evaluate("1/2", Operator::Add, "1/2", Mode::Rational, 4).unwrap();
        assert_eq!(e.to_string(), "1");
        assert_eq!(e.decimal, None);
    }

    #[test]
    fn rational_remainder_truncates() {
        let e = evaluate("7/2", Operator::Rem, "1", Mode::Rational, 2).unwrap();
        assert_eq!(e.result.to_string(), "1/2");
        let e = evaluate("-7", Operator::Rem, "2", Mode::Rational, 2).unwrap();
        assert_eq!(e.result.to_string(), "-1");
    }

    #[test]
    fn lines_pick_number_type() {
        assert_eq!(evaluate_line("2 * 3", 2).unwrap().result, int("6"));
        assert_eq!(evaluate_line(" 1/4  <  1/3 ", 2).unwrap().result, Value::Bool(true));
        assert!(matches!(evaluate_line("1 +", 2), Err(CliError::Expression(_))));
        assert!(matches!(evaluate_line("1 + 2 + 3", 2), Err(CliError::Expression(_))));
        assert!(matches!(evaluate_line("1 ** 2", 2), Err(CliError::Operator(_))));
        assert!(matches!(evaluate_line("x + 2", 2), Err(CliError::Integer { .. })));
    }

    #[test]
    fn evaluation_serializes_to_json() {
        let e = evaluate("1", Operator::Div, "3/1", Mode::Auto, 3).unwrap();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "lhs": "1",
                "op": "/",
                "rhs": "3/1",
                "result": "1/3",
                "decimal": "0.333"
            })
        );
        let e = evaluate("2", Operator::Lt, "1", Mode::Auto, 3).unwrap();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["result"], serde_json::Value::Bool(false));
        assert!(json.get("decimal").is_none());
    }
}
