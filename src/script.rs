//! Line-oriented operation scripts over a `DynamicArray<i64>`.
//!
//! One command per line, whitespace-separated tokens, `#` starts a comment
//! line:
//!
//! ```text
//! reserve 10
//! push 1
//! insert 0 7
//! expect 7 1
//! print
//! ```

use std::str::FromStr;

use simple_vector::{ArrayError, DynamicArray};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Push(i64),
    Pop,
    Insert { index: usize, value: i64 },
    Erase(usize),
    Reserve(usize),
    Resize(usize),
    Clear,
    Shrink,
    At(usize),
    Print,
    Expect(Vec<i64>),
    ExpectCapacity(usize),
}

/// A command with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub line: usize,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{word}`")]
    UnknownCommand { line: usize, word: String },

    #[error("line {line}: `{command}` takes {expected} argument(s), got {found}")]
    Arity {
        line: usize,
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: `{token}` is not a valid number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: {command} at {index} is out of bounds for length {len}")]
    Position {
        line: usize,
        command: &'static str,
        index: usize,
        len: usize,
    },

    #[error("line {line}: pop on an empty array")]
    EmptyPop { line: usize },

    #[error("line {line}: expected {expected:?}, found {found:?}")]
    Mismatch {
        line: usize,
        expected: Vec<i64>,
        found: Vec<i64>,
    },

    #[error("line {line}: expected capacity {expected}, found {found}")]
    CapacityMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {source}")]
    Array { line: usize, source: ArrayError },
}

pub fn parse(source: &str) -> Result<Vec<Statement>, ScriptError> {
    let mut statements = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let mut tokens = text.split_whitespace();
        let Some(word) = tokens.next() else { continue };
        let args: Vec<&str> = tokens.collect();

        let command = match word {
            "push" => {
                arity(line, "push", &args, 1)?;
                Command::Push(number(line, args[0])?)
            }
            "pop" => {
                arity(line, "pop", &args, 0)?;
                Command::Pop
            }
            "insert" => {
                arity(line, "insert", &args, 2)?;
                Command::Insert {
                    index: number(line, args[0])?,
                    value: number(line, args[1])?,
                }
            }
            "erase" => {
                arity(line, "erase", &args, 1)?;
                Command::Erase(number(line, args[0])?)
            }
            "reserve" => {
                arity(line, "reserve", &args, 1)?;
                Command::Reserve(number(line, args[0])?)
            }
            "resize" => {
                arity(line, "resize", &args, 1)?;
                Command::Resize(number(line, args[0])?)
            }
            "clear" => {
                arity(line, "clear", &args, 0)?;
                Command::Clear
            }
            "shrink" => {
                arity(line, "shrink", &args, 0)?;
                Command::Shrink
            }
            "at" => {
                arity(line, "at", &args, 1)?;
                Command::At(number(line, args[0])?)
            }
            "print" => {
                arity(line, "print", &args, 0)?;
                Command::Print
            }
            "expect" => Command::Expect(
                args.iter()
                    .map(|token| number(line, token))
                    .collect::<Result<_, _>>()?,
            ),
            "capacity" => {
                arity(line, "capacity", &args, 1)?;
                Command::ExpectCapacity(number(line, args[0])?)
            }
            other => {
                return Err(ScriptError::UnknownCommand {
                    line,
                    word: other.to_string(),
                });
            }
        };
        statements.push(Statement { line, command });
    }
    Ok(statements)
}

fn arity(line: usize, command: &'static str, args: &[&str], expected: usize) -> Result<(), ScriptError> {
    if args.len() != expected {
        return Err(ScriptError::Arity {
            line,
            command,
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn number<N: FromStr>(line: usize, token: &str) -> Result<N, ScriptError> {
    token.parse().map_err(|_| ScriptError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Renders the live elements plus the capacity bookkeeping.
pub fn describe(array: &DynamicArray<i64>) -> String {
    format!("{:?} len={} cap={}", array, array.len(), array.capacity())
}

/// Executes statements against one array and records what they print.
#[derive(Debug, Default)]
pub struct Interpreter {
    array: DynamicArray<i64>,
    output: Vec<String>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn array(&self) -> &DynamicArray<i64> {
        &self.array
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn into_parts(self) -> (DynamicArray<i64>, Vec<String>) {
        (self.array, self.output)
    }

    pub fn run(&mut self, statements: &[Statement]) -> Result<(), ScriptError> {
        for statement in statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    /// Runs one statement. A failing statement leaves the array as it was.
    pub fn execute(&mut self, statement: &Statement) -> Result<(), ScriptError> {
        let line = statement.line;
        let wrap = |source: ArrayError| ScriptError::Array { line, source };
        debug!(line, command = ?statement.command, "executing");

        match &statement.command {
            Command::Push(value) => {
                self.array.try_push_back(*value).map_err(wrap)?;
            }
            Command::Pop => {
                self.array.pop_back().ok_or(ScriptError::EmptyPop { line })?;
            }
            Command::Insert { index, value } => {
                if *index > self.array.len() {
                    return Err(self.out_of_bounds(line, "insert", *index));
                }
                self.array.try_insert(*index, *value).map_err(wrap)?;
            }
            Command::Erase(index) => {
                if *index >= self.array.len() {
                    return Err(self.out_of_bounds(line, "erase", *index));
                }
                self.array.erase(*index);
            }
            Command::Reserve(capacity) => self.array.try_reserve(*capacity).map_err(wrap)?,
            Command::Resize(len) => self.array.try_resize(*len).map_err(wrap)?,
            Command::Clear => self.array.clear(),
            Command::Shrink => self.array.shrink_to_fit(),
            Command::At(index) => {
                let value = *self.array.at(*index).map_err(wrap)?;
                self.output.push(format!("at {} = {}", index, value));
            }
            Command::Print => self.output.push(describe(&self.array)),
            Command::Expect(expected) => {
                if self.array != *expected {
                    return Err(ScriptError::Mismatch {
                        line,
                        expected: expected.clone(),
                        found: self.array.to_vec(),
                    });
                }
            }
            Command::ExpectCapacity(expected) => {
                if self.array.capacity() != *expected {
                    return Err(ScriptError::CapacityMismatch {
                        line,
                        expected: *expected,
                        found: self.array.capacity(),
                    });
                }
            }
        }
        Ok(())
    }

    fn out_of_bounds(&self, line: usize, command: &'static str, index: usize) -> ScriptError {
        ScriptError::Position {
            line,
            command,
            index,
            len: self.array.len(),
        }
    }
}

/// Parses and runs `source` on a fresh array.
pub fn run_script(source: &str) -> Result<Interpreter, ScriptError> {
    let statements = parse(source)?;
    let mut interpreter = Interpreter::new();
    interpreter.run(&statements)?;
    Ok(interpreter)
}
