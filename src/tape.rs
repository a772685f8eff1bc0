//! This module defines the `Tape`, an unbounded sequence of symbols with a single read/write head.
//!
//! Only a finite region of the tape is materialized. The backing sequence grows by one blank
//! cell whenever a read finds the head just outside of it, in either direction.

use crate::types::{Direction, MachineError, Symbol};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    head: isize,
    blank: Symbol,
}

impl Tape {
    /// Creates a tape holding a single blank cell, with the head on it.
    pub fn new(blank: Symbol) -> Self {
        Self::with_input(blank, &[])
    }

    /// Creates a tape pre-loaded with `input`, with the head on the first symbol.
    ///
    /// An empty input produces a single blank cell.
    pub fn with_input(blank: Symbol, input: &[Symbol]) -> Self {
        let cells = if input.is_empty() {
            VecDeque::from([blank])
        } else {
            input.iter().copied().collect()
        };

        Self {
            cells,
            head: 0,
            blank,
        }
    }

    /// Returns the symbol under the head, growing the tape first if the head is outside it.
    ///
    /// After this call the head is always a valid index into the tape.
    pub fn read(&mut self) -> Symbol {
        if self.head < 0 {
            self.cells.push_front(self.blank);
            self.head = 0;
        } else if self.head as usize >= self.cells.len() {
            self.cells.push_back(self.blank);
            self.head = self.cells.len() as isize - 1;
        }

        self.cells[self.head as usize]
    }

    /// Overwrites the symbol under the head.
    ///
    /// The head must be in bounds, which a preceding `read` guarantees.
    pub fn write(&mut self, symbol: Symbol) -> Result<(), MachineError> {
        let len = self.cells.len();
        let cell = usize::try_from(self.head)
            .ok()
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(MachineError::TapeBoundary {
                head: self.head,
                len,
            })?;

        *cell = symbol;
        Ok(())
    }

    /// Moves the head. Growth is deferred to the next `read`.
    pub fn move_head(&mut self, direction: Direction) {
        self.head += direction.offset();
    }

    /// Returns the materialized contents of the tape.
    pub fn snapshot(&self) -> Vec<Symbol> {
        self.cells.iter().copied().collect()
    }

    /// Returns the head index. It may be `-1` or `len()` between a move and the next read.
    pub fn head(&self) -> isize {
        self.head
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn blank(&self) -> Symbol {
        self.blank
    }

    /// Counts the cells holding `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|&&c| c == symbol).count()
    }
}

/// Renders the tape with the head cell in brackets, e.g. `1 1 [0] 1`.
/// A head outside the tape is drawn as a bracketed blank on that side.
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells: Vec<String> = self.cells.iter().map(|c| c.to_string()).collect();

        match usize::try_from(self.head) {
            Ok(index) if index < cells.len() => cells[index] = format!("[{}]", cells[index]),
            Ok(_) => cells.push(format!("[{}]", self.blank)),
            Err(_) => cells.insert(0, format!("[{}]", self.blank)),
        }

        write!(f, "{}", cells.join(" "))
    }
}
