//! Observers of a running machine.
//!
//! A `Machine` reports a `Snapshot` before its first step and after every step to an
//! `Observer`, then calls `Observer::halted` once a terminal state is reached.

use crate::types::{MachineError, State, Symbol};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// The observable configuration of a machine at one point of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of steps executed so far.
    pub step: u64,
    /// The current state.
    pub state: State,
    /// The head index. May be `-1` or `tape.len()` until the next read grows the tape.
    pub head: isize,
    /// The materialized tape contents.
    pub tape: Vec<Symbol>,
}

impl Snapshot {
    /// Renders the tape as a list, e.g. `[1, 1, 0]`.
    pub fn tape_list(&self) -> String {
        let cells: Vec<String> = self.tape.iter().map(|c| c.to_string()).collect();
        format!("[{}]", cells.join(", "))
    }

    pub fn tape_string(&self) -> String {
        self.tape.iter().collect()
    }
}

pub trait Observer {
    /// Called with the initial snapshot and after every step.
    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), MachineError>;

    /// Called once with the final snapshot when the machine halts.
    fn halted(&mut self, _snapshot: &Snapshot) -> Result<(), MachineError> {
        Ok(())
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    snapshots: Vec<Snapshot>,
    halted: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }

    /// Whether the observed run reached a terminal state.
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

impl Observer for Recorder {
    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), MachineError> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn halted(&mut self, _snapshot: &Snapshot) -> Result<(), MachineError> {
        self.halted = true;
        Ok(())
    }
}

/// Prints the tape after every step and `HALT!` at the end.
pub struct Printer<W: Write> {
    out: W,
    details: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            details: false,
        }
    }

    /// Also print the step number, state and head position on each line.
    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for Printer<W> {
    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), MachineError> {
        let result = if self.details {
            writeln!(
                self.out,
                "{:>5} {:<6} head={:<3} {}",
                snapshot.step,
                snapshot.state,
                snapshot.head,
                snapshot.tape_list()
            )
        } else {
            writeln!(self.out, "{}", snapshot.tape_list())
        };

        result.map_err(trace_error)
    }

    fn halted(&mut self, _snapshot: &Snapshot) -> Result<(), MachineError> {
        writeln!(self.out, "HALT!").map_err(trace_error)?;
        self.out.flush().map_err(trace_error)
    }
}

/// Writes one JSON object per snapshot, one per line.
pub struct JsonLines<W: Write> {
    out: W,
}

impl<W: Write> JsonLines<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for JsonLines<W> {
    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), MachineError> {
        serde_json::to_writer(&mut self.out, snapshot)
            .map_err(|e| MachineError::Trace(e.to_string()))?;
        writeln!(self.out).map_err(trace_error)
    }

    fn halted(&mut self, _snapshot: &Snapshot) -> Result<(), MachineError> {
        self.out.flush().map_err(trace_error)
    }
}

/// Forwards only the halting snapshot to the wrapped observer.
pub struct FinalOnly<O: Observer> {
    inner: O,
}

impl<O: Observer> FinalOnly<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Observer> Observer for FinalOnly<O> {
    fn observe(&mut self, _snapshot: &Snapshot) -> Result<(), MachineError> {
        Ok(())
    }

    fn halted(&mut self, snapshot: &Snapshot) -> Result<(), MachineError> {
        self.inner.observe(snapshot)?;
        self.inner.halted(snapshot)
    }
}

fn trace_error(e: std::io::Error) -> MachineError {
    MachineError::Trace(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;
    use crate::programs::busy_beaver_3;
    use crate::types::Status;
    use std::fs;
    use std::io::{self, BufWriter};
    use tempfile::tempdir;

    /// A writer whose reader has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn snapshot(step: u64, state: &str, head: isize, tape: &str) -> Snapshot {
        Snapshot {
            step,
            state: State::new(state),
            head,
            tape: tape.chars().collect(),
        }
    }

    #[test]
    fn test_recorder_keeps_snapshots() {
        let mut recorder = Recorder::new();
        recorder.observe(&snapshot(0, "A", 0, "0")).unwrap();
        recorder.observe(&snapshot(1, "B", 1, "1")).unwrap();
        assert!(!recorder.is_halted());

        recorder.halted(&snapshot(1, "B", 1, "1")).unwrap();
        assert!(recorder.is_halted());
        assert_eq!(recorder.snapshots().len(), 2);
        assert_eq!(recorder.into_snapshots()[1].tape, vec!['1']);
    }

    #[test]
    fn test_printer_output() {
        let mut printer = Printer::new(Vec::new());
        printer.observe(&snapshot(0, "A", 0, "0")).unwrap();
        printer.observe(&snapshot(1, "B", 1, "11")).unwrap();
        printer.halted(&snapshot(1, "B", 1, "11")).unwrap();

        let output = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(output, "[0]\n[1, 1]\nHALT!\n");
    }

    #[test]
    fn test_printer_details() {
        let mut printer = Printer::new(Vec::new()).with_details(true);
        printer.observe(&snapshot(3, "C", -1, "11")).unwrap();

        let output = String::from_utf8(printer.into_inner()).unwrap();
        assert!(output.contains("C"));
        assert!(output.contains("head=-1"));
        assert!(output.trim_end().ends_with("[1, 1]"));
    }

    #[test]
    fn test_json_lines_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");

        {
            let file = fs::File::create(&path).unwrap();
            let mut observer = JsonLines::new(BufWriter::new(file));
            observer.observe(&snapshot(0, "A", 0, "0")).unwrap();
            observer.observe(&snapshot(1, "B", 1, "1")).unwrap();
            observer.halted(&snapshot(1, "B", 1, "1")).unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Snapshot = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, snapshot(0, "A", 0, "0"));

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["state"], "B");
        assert_eq!(second["tape"][0], "1");
    }

    #[test]
    fn test_json_lines_into_inner() {
        let mut observer = JsonLines::new(Vec::new());
        observer.observe(&snapshot(2, "C", -1, "01")).unwrap();

        let output = String::from_utf8(observer.into_inner()).unwrap();
        assert!(output.ends_with('\n'));

        let parsed: Snapshot = serde_json::from_str(output.trim_end()).unwrap();
        assert_eq!(parsed, snapshot(2, "C", -1, "01"));
    }

    #[test]
    fn test_failing_printer_stops_the_run() {
        let mut machine = Machine::new(busy_beaver_3().unwrap()).unwrap();
        let mut printer = Printer::new(ClosedPipe);

        assert!(matches!(
            machine.run_with(&mut printer),
            Err(MachineError::Trace(_))
        ));
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.status(), Status::Running);
    }

    #[test]
    fn test_failing_json_lines_stops_the_run() {
        let mut machine = Machine::new(busy_beaver_3().unwrap()).unwrap();
        let mut observer = JsonLines::new(ClosedPipe);

        assert!(matches!(
            machine.run_bounded(100, &mut observer),
            Err(MachineError::Trace(_))
        ));
        assert_eq!(machine.step_count(), 0);

        machine.reset();
        let mut observer = JsonLines::new(ClosedPipe);
        assert!(matches!(
            machine.run_with(&mut observer),
            Err(MachineError::Trace(_))
        ));
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_final_only_writes_the_halting_snapshot() {
        let mut machine = Machine::new(busy_beaver_3().unwrap()).unwrap();
        let mut observer = FinalOnly::new(JsonLines::new(Vec::new()));

        machine.run_with(&mut observer).unwrap();

        let output = String::from_utf8(observer.into_inner().into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let last: Snapshot = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(last.step, 13);
        assert_eq!(last.tape_string(), "111111");
    }

    #[test]
    fn test_final_only_skips_unfinished_runs() {
        let mut machine = Machine::new(busy_beaver_3().unwrap()).unwrap();
        let mut observer = FinalOnly::new(Printer::new(Vec::new()));

        assert_eq!(
            machine.run_bounded(5, &mut observer),
            Err(MachineError::StepLimitExceeded(5))
        );
        assert!(observer.into_inner().into_inner().is_empty());
    }
}
