//! Application configuration from CLI flags and environment.

use clap::{Args, Parser, Subcommand};

use crate::expr::Operator;
use crate::version;

/// Tessera: exact integer and fraction calculator.
#[derive(Parser, Debug)]
#[command(name = "tessera", version, long_version = version::LONG_VERSION, about)]
pub struct AppConfig {
    /// Verbose output (debug logging on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print each result as a JSON object on its own line.
    #[arg(long, global = true)]
    pub json: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    /// What to evaluate.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Calculator subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Evaluate `LHS OP RHS` over arbitrary-precision integers.
    Int(Expression),

    /// Evaluate `LHS OP RHS` over fractions written `p` or `p/q`.
    Frac {
        /// The expression.
        #[command(flatten)]
        expr: Expression,
        /// Decimal digits shown for non-integral results.
        #[command(flatten)]
        precision: Precision,
    },

    /// Print a fraction as a truncated decimal expansion.
    Decimal {
        /// The value, written `p` or `p/q`.
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Fractional digits to print.
        #[command(flatten)]
        precision: Precision,
    },

    /// Evaluate one `LHS OP RHS` expression per line of standard input.
    ///
    /// Operands containing `/` are fractions, otherwise integers. Blank lines
    /// and lines starting with `#` are skipped.
    Stream {
        /// Decimal digits shown for non-integral results.
        #[command(flatten)]
        precision: Precision,
    },
}

/// A binary expression given as three arguments.
#[derive(Args, Debug, Clone)]
pub struct Expression {
    /// Left operand.
    #[arg(allow_hyphen_values = true)]
    pub lhs: String,
    /// Operator: + - * / % < <= > >= == !=
    #[arg(allow_hyphen_values = true)]
    pub op: Operator,
    /// Right operand.
    #[arg(allow_hyphen_values = true)]
    pub rhs: String,
}

/// Decimal precision shared by the fraction subcommands.
#[derive(Args, Debug, Clone, Copy)]
pub struct Precision {
    /// Number of fractional digits.
    #[arg(short, long, env = "TESSERA_PRECISION", default_value_t = 10)]
    pub precision: usize,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
