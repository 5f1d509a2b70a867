//! Application entry point and dispatch.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use serde::Serialize;

use crate::config::{AppConfig, Command};
use crate::expr::{self, Evaluation, Mode};

/// Run the application against the process's standard streams.
pub fn run(config: &AppConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(config, &mut stdin.lock(), &mut stdout.lock())
}

/// Run the application against the given streams.
pub fn run_with(config: &AppConfig, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = AppConfig::command();
        clap_complete::generate(shell, &mut cmd, "tessera", out);
        return Ok(());
    }

    let Some(command) = &config.command else {
        AppConfig::command().write_help(&mut &mut *out)?;
        return Ok(());
    };

    match command {
        Command::Int(e) => {
            let evaluation = expr::evaluate(&e.lhs, e.op, &e.rhs, Mode::Integer, 0)?;
            emit(config, out, &evaluation)
        }
        Command::Frac { expr: e, precision } => {
            let evaluation =
                expr::evaluate(&e.lhs, e.op, &e.rhs, Mode::Rational, precision.precision)?;
            emit(config, out, &evaluation)
        }
        Command::Decimal { value, precision } => {
            let rational = expr::parse_rational(value)?;
            let decimal = rational.as_decimal(precision.precision);
            tracing::debug!(%rational, precision = precision.precision, "decimal expansion");
            if config.json {
                #[derive(Serialize)]
                struct Record<'a> {
                    value: &'a tessera_numeric::Rational,
                    decimal: &'a str,
                }
                write_json(
                    out,
                    &Record {
                        value: &rational,
                        decimal: &decimal,
                    },
                )
            } else {
                writeln!(out, "{decimal}")?;
                Ok(())
            }
        }
        Command::Stream { precision } => run_stream(config, input, out, precision.precision),
    }
}

fn run_stream(
    config: &AppConfig,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    precision: usize,
) -> Result<()> {
    let mut evaluated = 0usize;
    for (index, line) in input.lines().enumerate() {
        let line = line.context("reading standard input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let evaluation = expr::evaluate_line(line, precision)
            .with_context(|| format!("line {}", index + 1))?;
        emit(config, out, &evaluation)?;
        evaluated += 1;
    }
    tracing::debug!(evaluated, "stream finished");
    Ok(())
}

fn emit(config: &AppConfig, out: &mut dyn Write, evaluation: &Evaluation) -> Result<()> {
    tracing::debug!(
        lhs = %evaluation.lhs,
        op = %evaluation.op,
        rhs = %evaluation.rhs,
        result = %evaluation.result,
        "evaluated"
    );
    if config.json {
        write_json(out, evaluation)
    } else {
        writeln!(out, "{evaluation}")?;
        Ok(())
    }
}

fn write_json<T: Serialize>(out: &mut dyn Write, record: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, record).context("serializing result")?;
    writeln!(out)?;
    Ok(())
}
