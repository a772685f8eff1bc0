//! This module provides functions for checking Turing Machine configurations before execution.
//!
//! `analyze` performs the checks that must pass for a machine to be built: every state and
//! symbol mentioned anywhere must be declared, and the terminal states must be unambiguous.
//! `unreachable_states` and `missing_pairs` are advisory reports; the table is allowed to be
//! partial, and a missing pair only becomes an error if the machine actually reaches it.

use crate::config::MachineConfig;
use crate::types::{MachineError, State, Symbol};
use std::collections::HashSet;

/// Represents the problems that can be found in a configuration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Indicates structural problems (no states, no alphabet, duplicated declarations).
    StructuralError(String),
    /// Indicates that the blank symbol is not part of the alphabet.
    InvalidBlank(Symbol),
    /// Indicates that the initial state is not a declared state.
    InvalidStartState(State),
    /// Indicates that no terminal state is declared.
    NoTerminalStates,
    /// Indicates terminal states that are not declared states.
    UndeclaredTerminalStates(Vec<State>),
    /// Indicates terminal states that also have outgoing transitions.
    AmbiguousTerminalStates(Vec<State>),
    /// Indicates transitions that reference undeclared states, as `state[symbol] -> next`.
    UndefinedStates(Vec<String>),
    /// Indicates symbols used by transitions or the input that are not in the alphabet.
    InvalidSymbols(Vec<Symbol>),
}

impl From<AnalysisError> for MachineError {
    /// Converts an `AnalysisError` into a `MachineError::Configuration`.
    fn from(error: AnalysisError) -> Self {
        let message = match error {
            AnalysisError::StructuralError(msg) => msg,
            AnalysisError::InvalidBlank(blank) => {
                format!("Blank symbol {blank:?} is not in the alphabet")
            }
            AnalysisError::InvalidStartState(state) => {
                format!("Initial state {state} is not a declared state")
            }
            AnalysisError::NoTerminalStates => "No terminal state declared".to_string(),
            AnalysisError::UndeclaredTerminalStates(states) => {
                format!("Terminal states are not declared states: {}", join(&states))
            }
            AnalysisError::AmbiguousTerminalStates(states) => {
                format!("Terminal states have outgoing transitions: {}", join(&states))
            }
            AnalysisError::UndefinedStates(transitions) => {
                format!("Transitions reference undeclared states: {transitions:?}")
            }
            AnalysisError::InvalidSymbols(symbols) => {
                format!("Symbols not in the alphabet: {symbols:?}")
            }
        };

        MachineError::Configuration(message)
    }
}

fn join(states: &[State]) -> String {
    states
        .iter()
        .map(State::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Analyzes a configuration for errors that make it unusable.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(MachineError::Configuration)` describing the first problem found.
pub fn analyze(config: &MachineConfig) -> Result<(), MachineError> {
    let errors = [
        check_structure,
        check_blank,
        check_valid_start_state,
        check_terminal_states,
        check_transition_states,
        check_symbols,
    ]
    .iter()
    .filter_map(|f| f(config).err())
    .collect::<Vec<_>>();

    match errors.into_iter().next() {
        Some(first_error) => Err(first_error.into()),
        None => Ok(()),
    }
}

/// Checks that states and alphabet are declared, without duplicates.
fn check_structure(config: &MachineConfig) -> Result<(), AnalysisError> {
    if config.states.is_empty() {
        return Err(AnalysisError::StructuralError(
            "No states declared".to_string(),
        ));
    }

    if config.alphabet.is_empty() {
        return Err(AnalysisError::StructuralError(
            "Empty alphabet".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    if let Some(state) = config.states.iter().find(|s| !seen.insert(*s)) {
        return Err(AnalysisError::StructuralError(format!(
            "State {state} declared more than once"
        )));
    }

    let mut seen = HashSet::new();
    if let Some(symbol) = config.alphabet.iter().find(|s| !seen.insert(*s)) {
        return Err(AnalysisError::StructuralError(format!(
            "Symbol {symbol:?} declared more than once"
        )));
    }

    Ok(())
}

fn check_blank(config: &MachineConfig) -> Result<(), AnalysisError> {
    if !config.alphabet.contains(&config.blank) {
        return Err(AnalysisError::InvalidBlank(config.blank));
    }

    Ok(())
}

fn check_valid_start_state(config: &MachineConfig) -> Result<(), AnalysisError> {
    if !config.states.contains(&config.initial_state) {
        return Err(AnalysisError::InvalidStartState(
            config.initial_state.clone(),
        ));
    }

    Ok(())
}

/// Checks that the terminal states are declared and have no outgoing transitions.
///
/// A terminal state with transitions is rejected because the machine would stop there
/// without ever executing them.
fn check_terminal_states(config: &MachineConfig) -> Result<(), AnalysisError> {
    if config.terminal_states.is_empty() {
        return Err(AnalysisError::NoTerminalStates);
    }

    let mut undeclared: Vec<State> = config
        .terminal_states
        .iter()
        .filter(|state| !config.states.contains(state))
        .cloned()
        .collect();

    if !undeclared.is_empty() {
        undeclared.sort();
        undeclared.dedup();
        return Err(AnalysisError::UndeclaredTerminalStates(undeclared));
    }

    let mut ambiguous: Vec<State> = config
        .terminal_states
        .iter()
        .filter(|state| config.table.has_state(state.as_str()))
        .cloned()
        .collect();

    if !ambiguous.is_empty() {
        ambiguous.sort();
        ambiguous.dedup();
        return Err(AnalysisError::AmbiguousTerminalStates(ambiguous));
    }

    Ok(())
}

/// Checks that every state used as a key or as a next state is declared.
fn check_transition_states(config: &MachineConfig) -> Result<(), AnalysisError> {
    let declared: HashSet<&State> = config.states.iter().collect();

    let undefined: Vec<String> = config
        .table
        .iter()
        .filter(|(state, _, instr)| !declared.contains(state) || !declared.contains(&instr.next))
        .map(|(state, read, instr)| format!("{}[{}] -> {}", state, read, instr.next))
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedStates(undefined));
    }

    Ok(())
}

/// Checks that every symbol read, written or pre-loaded on the tape is in the alphabet.
fn check_symbols(config: &MachineConfig) -> Result<(), AnalysisError> {
    let alphabet: HashSet<Symbol> = config.alphabet.iter().copied().collect();

    let mut invalid: Vec<Symbol> = config
        .table
        .iter()
        .flat_map(|(_, read, instr)| [read, instr.write])
        .chain(config.input.iter().copied())
        .filter(|symbol| !alphabet.contains(symbol))
        .collect();

    if !invalid.is_empty() {
        invalid.sort();
        invalid.dedup();
        return Err(AnalysisError::InvalidSymbols(invalid));
    }

    Ok(())
}

/// Returns declared states that cannot be reached from the initial state through any
/// sequence of transitions, sorted by name.
pub fn unreachable_states(config: &MachineConfig) -> Vec<State> {
    let mut visited = HashSet::new();
    let mut queue = vec![config.initial_state.clone()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state.clone()) {
            continue;
        }

        for (from, _, instr) in config.table.iter() {
            if *from == state && !visited.contains(&instr.next) {
                queue.push(instr.next.clone());
            }
        }
    }

    let mut unreachable: Vec<State> = config
        .states
        .iter()
        .filter(|state| !visited.contains(*state))
        .cloned()
        .collect();

    unreachable.sort();
    unreachable
}

/// Returns the `(state, symbol)` pairs of non-terminal states that have no instruction.
///
/// A machine that reads one of these pairs stops with `MachineError::MissingTransition`.
pub fn missing_pairs(config: &MachineConfig) -> Vec<(State, Symbol)> {
    config
        .states
        .iter()
        .filter(|state| !config.is_terminal(state))
        .flat_map(|state| config.alphabet.iter().map(move |&symbol| (state, symbol)))
        .filter(|(state, symbol)| config.table.get(state.as_str(), *symbol).is_none())
        .map(|(state, symbol)| (state.clone(), symbol))
        .collect()
}
