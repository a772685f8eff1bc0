//! This module defines `MachineConfig`, the full description of a single-tape Turing Machine,
//! and a builder for assembling one in code.

use crate::table::TransitionTable;
use crate::types::{Direction, MachineError, State, Symbol};
use serde::{Deserialize, Serialize};

/// The configuration of a Turing Machine.
///
/// A configuration is checked by `analyzer::analyze` when a `Machine` is built from it and is
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// The name of the program.
    pub name: String,
    /// The declared set of states.
    pub states: Vec<State>,
    /// The state the machine starts in.
    pub initial_state: State,
    /// The states in which the machine halts.
    pub terminal_states: Vec<State>,
    /// The declared set of tape symbols.
    pub alphabet: Vec<Symbol>,
    /// The symbol filling every cell not yet written.
    pub blank: Symbol,
    /// Initial tape contents. Empty means a single blank cell.
    #[serde(default)]
    pub input: Vec<Symbol>,
    /// The program.
    pub table: TransitionTable,
}

impl MachineConfig {
    pub fn builder(name: impl Into<String>) -> MachineConfigBuilder {
        MachineConfigBuilder::new(name)
    }

    /// Checks whether `state` is one of the terminal states.
    pub fn is_terminal(&self, state: &State) -> bool {
        self.terminal_states.contains(state)
    }

    /// Returns the input rendered as a string.
    pub fn input_string(&self) -> String {
        self.input.iter().collect()
    }
}

/// Assembles a `MachineConfig` step by step.
///
/// Errors from duplicate transitions are held back and reported by `build`, so calls can be
/// chained.
#[derive(Debug)]
pub struct MachineConfigBuilder {
    name: String,
    states: Vec<State>,
    initial_state: Option<State>,
    terminal_states: Vec<State>,
    alphabet: Vec<Symbol>,
    blank: Option<Symbol>,
    input: Vec<Symbol>,
    table: TransitionTable,
    error: Option<MachineError>,
}

impl MachineConfigBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            initial_state: None,
            terminal_states: Vec::new(),
            alphabet: Vec::new(),
            blank: None,
            input: Vec::new(),
            table: TransitionTable::new(),
            error: None,
        }
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn initial_state(mut self, state: impl Into<State>) -> Self {
        self.initial_state = Some(state.into());
        self
    }

    pub fn terminal_state(mut self, state: impl Into<State>) -> Self {
        self.terminal_states.push(state.into());
        self
    }

    pub fn alphabet(mut self, symbols: impl IntoIterator<Item = Symbol>) -> Self {
        self.alphabet.extend(symbols);
        self
    }

    pub fn blank(mut self, blank: Symbol) -> Self {
        self.blank = Some(blank);
        self
    }

    pub fn input(mut self, input: &str) -> Self {
        self.input = input.chars().collect();
        self
    }

    /// Adds the instruction `(state, read) -> (write, direction, next)`.
    pub fn rule(
        mut self,
        state: impl Into<State>,
        read: Symbol,
        write: Symbol,
        direction: Direction,
        next: impl Into<State>,
    ) -> Self {
        if let Err(e) = self.table.insert(state, read, write, direction, next) {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
        self
    }

    /// Finishes the configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineConfig)` if every required field was given.
    /// * `Err(MachineError::Configuration)` if a field is missing or a rule was duplicated.
    ///
    /// Membership checks are left to `analyzer::analyze`.
    pub fn build(self) -> Result<MachineConfig, MachineError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let initial_state = self.initial_state.ok_or_else(|| {
            MachineError::Configuration(format!("{}: missing initial state", self.name))
        })?;
        let blank = self.blank.ok_or_else(|| {
            MachineError::Configuration(format!("{}: missing blank symbol", self.name))
        })?;

        Ok(MachineConfig {
            name: self.name,
            states: self.states,
            initial_state,
            terminal_states: self.terminal_states,
            alphabet: self.alphabet,
            blank,
            input: self.input,
            table: self.table,
        })
    }
}
