//! This crate provides a deterministic single-tape Turing Machine interpreter.
//! It includes modules for describing and validating machine configurations, executing them
//! step by step on an unbounded tape, observing each step, and a collection of built-in
//! programs such as the 3-state Busy Beaver.

pub mod analyzer;
pub mod config;
pub mod encoder;
pub mod machine;
pub mod programs;
pub mod table;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the configuration checks from the analyzer module.
pub use analyzer::{analyze, missing_pairs, unreachable_states, AnalysisError};
/// Re-exports the machine configuration and its builder.
pub use config::{MachineConfig, MachineConfigBuilder};
/// Re-exports the compact program notation encoder.
pub use encoder::encode;
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, BUSY_BEAVER_3, PROGRAMS};
pub use table::TransitionTable;
pub use tape::Tape;
/// Re-exports the observers and the `Snapshot` they receive.
pub use trace::{FinalOnly, JsonLines, Observer, Printer, Recorder, Snapshot};
/// Re-exports the core types of the interpreter.
pub use types::{Direction, Instruction, MachineError, State, Status, Step, Symbol};
