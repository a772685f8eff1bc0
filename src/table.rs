//! This module defines the `TransitionTable`, the program of a Turing Machine. It maps each
//! `(state, symbol)` pair to the `Instruction` the machine executes when it reads `symbol`
//! while in `state`.

use crate::types::{Direction, Instruction, MachineError, State, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A deterministic transition table.
///
/// The table does not need to be total: looking up an undefined pair is reported as
/// `MachineError::MissingTransition`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionTable {
    rules: BTreeMap<State, BTreeMap<Symbol, Instruction>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the instruction for reading `read` in `state`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the pair was not defined yet.
    /// * `Err(MachineError::Configuration)` if an instruction already exists for the pair.
    pub fn insert(
        &mut self,
        state: impl Into<State>,
        read: Symbol,
        write: Symbol,
        direction: Direction,
        next: impl Into<State>,
    ) -> Result<(), MachineError> {
        let state = state.into();
        let row = self.rules.entry(state.clone()).or_default();

        if row.contains_key(&read) {
            return Err(MachineError::Configuration(format!(
                "Duplicate transition for state {state} and symbol {read:?}"
            )));
        }

        row.insert(read, Instruction::new(write, direction, next));
        Ok(())
    }

    /// Looks up the instruction for `state` and `symbol`.
    ///
    /// # Returns
    ///
    /// * `Ok(&Instruction)` if the pair is defined.
    /// * `Err(MachineError::MissingTransition)` if it is not.
    pub fn lookup(&self, state: &State, symbol: Symbol) -> Result<&Instruction, MachineError> {
        self.get(state.as_str(), symbol)
            .ok_or_else(|| MachineError::MissingTransition {
                state: state.clone(),
                symbol,
            })
    }

    /// Returns the instruction for a pair, if any.
    pub fn get(&self, state: &str, symbol: Symbol) -> Option<&Instruction> {
        self.rules.get(state).and_then(|row| row.get(&symbol))
    }

    /// Returns true if any instruction is defined for `state`.
    pub fn has_state(&self, state: &str) -> bool {
        self.rules.get(state).is_some_and(|row| !row.is_empty())
    }

    /// Iterates over all `(state, read symbol, instruction)` entries in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&State, Symbol, &Instruction)> {
        self.rules
            .iter()
            .flat_map(|(state, row)| row.iter().map(move |(&read, instr)| (state, read, instr)))
    }

    /// Returns the number of defined `(state, symbol)` pairs.
    pub fn len(&self) -> usize {
        self.rules.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
