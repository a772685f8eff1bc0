//! This module defines the core data structures and types used throughout the Turing Machine
//! interpreter, including states, directions, instructions, step outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// A tape symbol. Symbols are single characters drawn from a declared alphabet.
pub type Symbol = char;

/// The blank symbol used by the Busy Beaver programs.
pub const DEFAULT_BLANK_SYMBOL: Symbol = '0';

/// A named control state of the machine.
///
/// States are compared by value, so two `State`s built from the same name are the same state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    /// Creates a new state with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name of the state.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for State {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for State {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for State {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Represents the possible directions the tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Returns the offset this direction applies to the head index.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }

    /// Returns the single-letter notation of this direction (`L`, `R` or `S`).
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'S',
        }
    }
}

/// What the machine does for a given `(state, symbol)` pair: the symbol to write,
/// where to move the head, and the state to enter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The symbol written under the head.
    pub write: Symbol,
    /// The direction the head moves after writing.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next: State,
}

impl Instruction {
    pub fn new(write: Symbol, direction: Direction, next: impl Into<State>) -> Self {
        Self {
            write,
            direction,
            next: next.into(),
        }
    }
}

/// Represents the outcome of a single call to `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and has not reached a terminal state.
    Continue,
    /// The machine is in a terminal state. No further steps are performed.
    Halted,
}

/// Run status of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Running,
    Halted,
}

/// Represents the errors that can occur while configuring or running a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The machine configuration is malformed. Construction does not succeed.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A symbol read from the tape is not part of the declared alphabet.
    #[error("Symbol {symbol:?} read in state {state} is not in the alphabet")]
    AlphabetViolation { state: State, symbol: Symbol },
    /// No instruction is defined for the current state and symbol, and the state is not terminal.
    #[error("No transition defined for state {state} and symbol {symbol:?}")]
    MissingTransition { state: State, symbol: Symbol },
    /// The head was outside the tape when writing. Indicates a broken tape invariant.
    #[error("Tape head {head} out of bounds for tape of length {len}")]
    TapeBoundary { head: isize, len: usize },
    /// A bounded run did not reach a terminal state within the given number of steps.
    #[error("Machine did not halt within {0} steps")]
    StepLimitExceeded(u64),
    /// An observer could not emit a snapshot.
    #[error("Trace error: {0}")]
    Trace(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, left_deserialized);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Right.offset(), 1);
        assert_eq!(Direction::Stay.offset(), 0);
    }

    #[test]
    fn test_state_compares_by_value() {
        let a = State::new("HALT");
        let b = State::from(String::from("HALT"));

        assert_eq!(a, b);
        assert_eq!(a, "HALT");
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"HALT\"");
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::MissingTransition {
            state: State::new("B"),
            symbol: '1',
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("No transition"));
        assert!(error_msg.contains("B"));
        assert!(error_msg.contains("'1'"));
    }
}
