//! Built-in example programs.
//!
//! The registry holds the classic Busy Beaver champions for 2, 3 and 4 states, plus a small
//! binary incrementer that starts from a pre-loaded input tape.

use crate::config::MachineConfig;
use crate::encoder::encode;
use crate::types::Direction::{Left, Right};
use crate::types::{MachineError, DEFAULT_BLANK_SYMBOL};
use std::sync::RwLock;
use tracing::error;

/// Name of the reference program run by default.
pub const BUSY_BEAVER_3: &str = "Busy Beaver 3-state";

lazy_static::lazy_static! {
    pub static ref PROGRAMS: RwLock<Vec<MachineConfig>> = RwLock::new(Vec::new());
}

type ProgramBuilder = fn() -> Result<MachineConfig, MachineError>;

const PROGRAM_BUILDERS: [ProgramBuilder; 4] = [
    busy_beaver_2,
    busy_beaver_3,
    busy_beaver_4,
    binary_increment,
];

/// The 2-state Busy Beaver: halts after 6 steps with four `1`s on the tape.
pub fn busy_beaver_2() -> Result<MachineConfig, MachineError> {
    MachineConfig::builder("Busy Beaver 2-state")
        .states(["A", "B", "HALT"])
        .initial_state("A")
        .terminal_state("HALT")
        .alphabet(['0', '1'])
        .blank(DEFAULT_BLANK_SYMBOL)
        .rule("A", '0', '1', Right, "B")
        .rule("A", '1', '1', Left, "B")
        .rule("B", '0', '1', Left, "A")
        .rule("B", '1', '1', Right, "HALT")
        .build()
}

/// The 3-state Busy Beaver: halts after 13 steps with six `1`s on the tape.
pub fn busy_beaver_3() -> Result<MachineConfig, MachineError> {
    MachineConfig::builder(BUSY_BEAVER_3)
        .states(["A", "B", "C", "HALT"])
        .initial_state("A")
        .terminal_state("HALT")
        .alphabet(['0', '1'])
        .blank(DEFAULT_BLANK_SYMBOL)
        .rule("A", '0', '1', Right, "B")
        .rule("A", '1', '1', Left, "C")
        .rule("B", '0', '1', Left, "A")
        .rule("B", '1', '1', Right, "B")
        .rule("C", '0', '1', Left, "B")
        .rule("C", '1', '1', Right, "HALT")
        .build()
}

/// The 4-state Busy Beaver: halts after 107 steps with thirteen `1`s on the tape.
pub fn busy_beaver_4() -> Result<MachineConfig, MachineError> {
    MachineConfig::builder("Busy Beaver 4-state")
        .states(["A", "B", "C", "D", "HALT"])
        .initial_state("A")
        .terminal_state("HALT")
        .alphabet(['0', '1'])
        .blank(DEFAULT_BLANK_SYMBOL)
        .rule("A", '0', '1', Right, "B")
        .rule("A", '1', '1', Left, "B")
        .rule("B", '0', '1', Left, "A")
        .rule("B", '1', '0', Left, "C")
        .rule("C", '0', '1', Right, "HALT")
        .rule("C", '1', '1', Left, "D")
        .rule("D", '0', '1', Right, "D")
        .rule("D", '1', '0', Right, "A")
        .build()
}

/// Adds one to the binary number on the tape.
pub fn binary_increment() -> Result<MachineConfig, MachineError> {
    MachineConfig::builder("Binary Increment")
        .states(["right", "carry", "done"])
        .initial_state("right")
        .terminal_state("done")
        .alphabet(['0', '1', '_'])
        .blank('_')
        .input("1011")
        .rule("right", '0', '0', Right, "right")
        .rule("right", '1', '1', Right, "right")
        .rule("right", '_', '_', Left, "carry")
        .rule("carry", '1', '0', Left, "carry")
        .rule("carry", '0', '1', Left, "done")
        .rule("carry", '_', '1', Left, "done")
        .build()
}

pub struct ProgramManager;

impl ProgramManager {
    /// Initializes the registry with the built-in programs.
    pub fn load() -> Result<(), MachineError> {
        Self::load_into(&PROGRAMS)
    }

    fn load_into(registry: &RwLock<Vec<MachineConfig>>) -> Result<(), MachineError> {
        let mut programs = Vec::new();

        for builder in PROGRAM_BUILDERS {
            match builder() {
                Ok(program) => programs.push(program),
                Err(e) => error!("Failed to build program: {e}"),
            }
        }

        match registry.write() {
            Ok(mut write_guard) => *write_guard = programs,
            Err(_) => {
                return Err(MachineError::Configuration(
                    "Failed to acquire write lock".to_string(),
                ))
            }
        }

        Ok(())
    }

    /// Loads the registry unless it already holds programs.
    fn ensure_loaded(registry: &RwLock<Vec<MachineConfig>>) -> Result<(), MachineError> {
        let loaded = registry
            .read()
            .map(|programs| !programs.is_empty())
            .map_err(|_| MachineError::Configuration("Failed to acquire read lock".to_string()))?;

        if !loaded {
            Self::load_into(registry)?;
        }

        Ok(())
    }

    /// Like `ensure_loaded`, for lookups that cannot report an error.
    fn ensure_loaded_or_log() {
        if let Err(e) = Self::ensure_loaded(&PROGRAMS) {
            error!("Failed to load programs: {e}");
        }
    }

    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        Self::ensure_loaded_or_log();

        PROGRAMS.read().map(|programs| programs.len()).unwrap_or(0)
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<MachineConfig, MachineError> {
        Self::ensure_loaded(&PROGRAMS)?;

        PROGRAMS
            .read()
            .map_err(|_| MachineError::Configuration("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                MachineError::Configuration(format!("Program index {} out of range", index))
            })
    }

    /// Get a program by its name, ignoring case
    pub fn get_program_by_name(name: &str) -> Result<MachineConfig, MachineError> {
        Self::ensure_loaded(&PROGRAMS)?;

        PROGRAMS
            .read()
            .map_err(|_| MachineError::Configuration("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|program| program.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| MachineError::Configuration(format!("Program '{}' not found", name)))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        Self::ensure_loaded_or_log();

        PROGRAMS
            .read()
            .map(|programs| {
                programs
                    .iter()
                    .map(|program| program.name.clone())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, MachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            initial_state: program.initial_state.to_string(),
            initial_tape: program.input_string(),
            state_count: program.states.len(),
            transition_count: program.table.len(),
            encoding: encode(&program),
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        Self::ensure_loaded_or_log();

        PROGRAMS
            .read()
            .map(|programs| {
                programs
                    .iter()
                    .enumerate()
                    .filter(|(_, program)| {
                        program.name.to_lowercase().contains(&query.to_lowercase())
                    })
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub initial_tape: String,
    pub state_count: usize,
    pub transition_count: usize,
    pub encoding: String,
}
