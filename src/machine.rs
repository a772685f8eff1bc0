//! This module defines the `Machine` struct, which executes a single-tape Turing Machine.
//! It owns the tape and the validated configuration, and drives the
//! read, write, move, transition cycle until a terminal state is reached.

use crate::analyzer::analyze;
use crate::config::MachineConfig;
use crate::tape::Tape;
use crate::trace::{Observer, Snapshot};
use crate::types::{MachineError, State, Status, Step};
use tracing::{debug, trace};

/// A single-tape Turing Machine.
///
/// The machine starts in the configured initial state with the configured input on the tape
/// (a single blank cell when there is none) and the head on the first cell. It halts once its
/// current state is one of the terminal states.
#[derive(Debug, Clone)]
pub struct Machine {
    config: MachineConfig,
    tape: Tape,
    state: State,
    status: Status,
    step_count: u64,
}

impl Machine {
    /// Creates a new `Machine` from a configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(Machine)` if the configuration is valid.
    /// * `Err(MachineError::Configuration)` otherwise. No step is executed in that case.
    pub fn new(config: MachineConfig) -> Result<Self, MachineError> {
        analyze(&config)?;

        let tape = Tape::with_input(config.blank, &config.input);
        let state = config.initial_state.clone();
        let status = Self::status_of(&config, &state);

        debug!(
            program = %config.name,
            states = config.states.len(),
            transitions = config.table.len(),
            "machine created"
        );

        Ok(Self {
            config,
            tape,
            state,
            status,
            step_count: 0,
        })
    }

    fn status_of(config: &MachineConfig, state: &State) -> Status {
        if config.is_terminal(state) {
            Status::Halted
        } else {
            Status::Running
        }
    }

    /// Executes a single step.
    ///
    /// Reads the symbol under the head, looks up the instruction for the current state and
    /// symbol, writes, moves the head and enters the next state.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if the step was performed and the new state is not terminal.
    /// * `Ok(Step::Halted)` if the step reached a terminal state, or if the machine had already
    ///   halted. In the latter case nothing is changed.
    /// * `Err(MachineError::AlphabetViolation)` if the symbol read is not in the alphabet.
    /// * `Err(MachineError::MissingTransition)` if no instruction is defined.
    pub fn step(&mut self) -> Result<Step, MachineError> {
        if self.is_halted() {
            return Ok(Step::Halted);
        }

        let symbol = self.tape.read();
        if !self.config.alphabet.contains(&symbol) {
            return Err(MachineError::AlphabetViolation {
                state: self.state.clone(),
                symbol,
            });
        }

        let instruction = self.config.table.lookup(&self.state, symbol)?;

        trace!(
            step = self.step_count + 1,
            state = %self.state,
            read = %symbol,
            write = %instruction.write,
            direction = ?instruction.direction,
            next = %instruction.next,
            "executing instruction"
        );

        self.tape.write(instruction.write)?;
        self.tape.move_head(instruction.direction);
        self.state = instruction.next.clone();
        self.step_count += 1;
        self.status = Self::status_of(&self.config, &self.state);

        if self.is_halted() {
            debug!(state = %self.state, steps = self.step_count, "machine halted");
            return Ok(Step::Halted);
        }

        Ok(Step::Continue)
    }

    /// Runs the machine until it halts.
    ///
    /// There is no step bound: a program that never halts makes this loop forever.
    /// Use `run_bounded` when termination must be guaranteed.
    pub fn run(&mut self) -> Result<Step, MachineError> {
        while self.step()? == Step::Continue {}

        Ok(Step::Halted)
    }

    /// Runs the machine until it halts, reporting the initial snapshot and a snapshot after
    /// every step to `observer`, followed by a halt notification.
    pub fn run_with(&mut self, observer: &mut dyn Observer) -> Result<Step, MachineError> {
        observer.observe(&self.snapshot())?;

        while !self.is_halted() {
            self.step()?;
            observer.observe(&self.snapshot())?;
        }

        observer.halted(&self.snapshot())?;
        Ok(Step::Halted)
    }

    /// Like `run_with`, but gives up after `limit` steps.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Halted)` if the machine halted within `limit` steps of this call.
    /// * `Err(MachineError::StepLimitExceeded)` if it did not.
    pub fn run_bounded(
        &mut self,
        limit: u64,
        observer: &mut dyn Observer,
    ) -> Result<Step, MachineError> {
        observer.observe(&self.snapshot())?;

        let mut taken = 0;
        while !self.is_halted() {
            if taken == limit {
                return Err(MachineError::StepLimitExceeded(limit));
            }

            self.step()?;
            taken += 1;
            observer.observe(&self.snapshot())?;
        }

        observer.halted(&self.snapshot())?;
        Ok(Step::Halted)
    }

    /// Checks if the machine is in a terminal state.
    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    /// Resets the machine to its initial configuration.
    /// This includes resetting the state, tape, head position, and step count.
    pub fn reset(&mut self) {
        self.tape = Tape::with_input(self.config.blank, &self.config.input);
        self.state = self.config.initial_state.clone();
        self.status = Self::status_of(&self.config, &self.state);
        self.step_count = 0;
    }

    /// Returns the current state and tape contents.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.step_count,
            state: self.state.clone(),
            head: self.tape.head(),
            tape: self.tape.snapshot(),
        }
    }

    /// Returns the number of cells holding a symbol other than the blank.
    ///
    /// For the Busy Beaver programs this is the number of `1`s written.
    pub fn score(&self) -> usize {
        self.tape.len() - self.tape.count(self.tape.blank())
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn head(&self) -> isize {
        self.tape.head()
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}
