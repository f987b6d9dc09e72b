//! Line-oriented command interpreter driving a [`PolynomialStore`].
//!
//! A script is a sequence of lines holding one token each: a command name
//! followed by its operands, one per line. Reading stops at the first empty
//! line. For example:
//!
//! ```text
//! set
//! A
//! [1, 1]
//! set
//! B
//! [1, -1]
//! mult
//! A
//! B
//! ```
//!
//! prints `x^2-1`.

use std::{io::Write, str::FromStr};

use pest::Parser;
use pest_derive::Parser;
use tracing::debug;

use crate::{
    error::{PolyError, ScriptError},
    polynomial::Coefficient,
    store::{PolynomialStore, Slot, StoreConfig},
};

#[derive(Parser)]
#[grammar = "script/coefficients.pest"]
struct CoefficientsParser;

/// Parses a coefficient array like `[1,-2,3]`. The array must not be empty.
pub fn parse_coefficients<C: FromStr>(input: &str) -> Result<Vec<C>, ScriptError> {
    let malformed = || ScriptError::Malformed {
        what: "coefficient array",
        input: input.to_string(),
    };

    let array = CoefficientsParser::parse(Rule::coefficients, input)
        .map_err(|_| malformed())?
        .next()
        .ok_or_else(malformed)?;

    array
        .into_inner()
        .filter(|x| x.as_rule() == Rule::integer)
        .map(|x| x.as_str().parse().map_err(|_| malformed()))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command<C> {
    Set(Slot, Vec<C>),
    Print(Slot),
    Add(Slot, Slot),
    Sub(Slot, Slot),
    Mult(Slot, Slot),
    Clear(Slot),
    Eval(Slot, f64),
}

impl<C: FromStr> Command<C> {
    /// Reads the next command and its operands from the token stream.
    /// Returns `None` when the stream is exhausted.
    pub fn read<S: AsRef<str>>(
        tokens: &mut impl Iterator<Item = S>,
    ) -> Result<Option<Self>, ScriptError> {
        let name = match tokens.next() {
            Some(name) => name,
            None => return Ok(None),
        };
        let name = name.as_ref().trim();

        let command = match name {
            "set" => Command::Set(
                operand(tokens, "set", "polynomial name")?,
                parse_coefficients(
                    next_token(tokens, "set", "coefficient array")?
                        .as_ref()
                        .trim(),
                )?,
            ),
            "print" => Command::Print(
                next_token(tokens, "print", "polynomial name")?
                    .as_ref()
                    .trim()
                    .parse()?,
            ),
            "add" => Command::Add(
                operand(tokens, "add", "first polynomial name")?,
                operand(tokens, "add", "second polynomial name")?,
            ),
            "sub" => Command::Sub(
                operand(tokens, "sub", "first polynomial name")?,
                operand(tokens, "sub", "second polynomial name")?,
            ),
            "mult" => Command::Mult(
                operand(tokens, "mult", "first polynomial name")?,
                operand(tokens, "mult", "second polynomial name")?,
            ),
            "clear" => Command::Clear(operand(tokens, "clear", "polynomial name")?),
            "eval" => {
                let slot = operand(tokens, "eval", "polynomial name")?;
                let value = next_token(tokens, "eval", "value")?;
                let value = value.as_ref().trim();
                Command::Eval(
                    slot,
                    value.parse().map_err(|_| ScriptError::Malformed {
                        what: "value",
                        input: value.to_string(),
                    })?,
                )
            }
            other => return Err(ScriptError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn next_token<S>(
    tokens: &mut impl Iterator<Item = S>,
    command: &'static str,
    operand: &'static str,
) -> Result<S, ScriptError> {
    tokens
        .next()
        .ok_or(ScriptError::MissingOperand { command, operand })
}

/// Reads the name of one of the operand slots. Only the result slot can be
/// printed but not otherwise named.
fn operand<S: AsRef<str>>(
    tokens: &mut impl Iterator<Item = S>,
    command: &'static str,
    what: &'static str,
) -> Result<Slot, ScriptError> {
    let token = next_token(tokens, command, what)?;
    let token = token.as_ref().trim();

    let slot: Slot = token.parse()?;
    if slot.is_operand() {
        Ok(slot)
    } else {
        Err(PolyError::UnknownPolynomial(token.to_string()).into())
    }
}

/// Executes commands against its own store, writing the protocol output.
#[derive(Debug, Clone)]
pub struct Session<C> {
    store: PolynomialStore<C>,
}

impl<C> Session<C>
where
    C: Coefficient + FromStr,
{
    pub fn new(config: StoreConfig) -> Self {
        Self {
            store: PolynomialStore::new(config),
        }
    }

    pub fn execute(
        &mut self,
        command: Command<C>,
        out: &mut impl Write,
    ) -> Result<(), ScriptError> {
        debug!(?command, "executing");
        match command {
            Command::Set(slot, coefficients) => {
                self.store.set_coefficients(slot, coefficients)?;
            }
            Command::Print(slot) => {
                writeln!(out, "{}", self.store.get(slot))?;
            }
            Command::Add(a, b) => {
                writeln!(out, "{}", self.store.add(a, b)?)?;
            }
            Command::Sub(a, b) => {
                writeln!(out, "{}", self.store.subtract(a, b)?)?;
            }
            Command::Mult(a, b) => {
                writeln!(out, "{}", self.store.multiply(a, b)?)?;
            }
            Command::Clear(slot) => {
                self.store.clear_polynomial(slot);
                writeln!(out, "[]")?;
            }
            Command::Eval(slot, x) => {
                // Reported truncated towards zero and saturated to 32 bits.
                writeln!(out, "{}", self.store.evaluate(slot, x) as i32)?;
            }
        }

        Ok(())
    }

    /// Runs a whole script. Output of the commands preceding a failure is
    /// already written when the error is returned.
    pub fn run<S: AsRef<str>>(
        &mut self,
        lines: impl IntoIterator<Item = S>,
        out: &mut impl Write,
    ) -> Result<(), ScriptError> {
        let mut tokens = lines
            .into_iter()
            .take_while(|line| !line.as_ref().is_empty());

        while let Some(command) = Command::read(&mut tokens)? {
            self.execute(command, out)?;
        }

        Ok(())
    }
}

impl<C: Coefficient + FromStr> Default for Session<C> {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
