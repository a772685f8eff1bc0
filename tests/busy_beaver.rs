use beaver::programs::{binary_increment, busy_beaver_2, busy_beaver_3, busy_beaver_4};
use beaver::{Direction, Machine, MachineConfig, MachineError, Recorder, Snapshot, State, Step};
use std::thread;

const STEP_LIMIT: u64 = 10_000;

fn run_recorded(config: MachineConfig) -> (Machine, Vec<Snapshot>) {
    let mut machine = Machine::new(config).unwrap();
    let mut recorder = Recorder::new();

    assert_eq!(
        machine.run_bounded(STEP_LIMIT, &mut recorder),
        Ok(Step::Halted)
    );

    (machine, recorder.into_snapshots())
}

#[test]
fn test_busy_beaver_3_reference_trace() {
    let (machine, snapshots) = run_recorded(busy_beaver_3().unwrap());

    let tapes: Vec<String> = snapshots.iter().map(Snapshot::tape_string).collect();
    assert_eq!(
        tapes,
        vec![
            "0", "1", "11", "11", "111", "1111", "11111", "11111", "11111", "11111", "11111",
            "111111", "111111", "111111",
        ]
    );

    let states: Vec<&str> = snapshots.iter().map(|s| s.state.as_str()).collect();
    assert_eq!(
        states,
        vec!["A", "B", "A", "C", "B", "A", "B", "B", "B", "B", "B", "A", "C", "HALT"]
    );

    assert_eq!(machine.step_count(), 13);
    assert_eq!(machine.score(), 6);
    assert_eq!(machine.state(), &State::new("HALT"));
    assert_eq!(machine.head(), 4);
}

#[test]
fn test_busy_beaver_3_print_format() {
    let mut machine = Machine::new(busy_beaver_3().unwrap()).unwrap();
    let mut printer = beaver::Printer::new(Vec::new());

    machine.run_with(&mut printer).unwrap();

    let output = String::from_utf8(printer.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[0], "[0]");
    assert_eq!(lines[1], "[1]");
    assert_eq!(lines[2], "[1, 1]");
    assert_eq!(lines[13], "[1, 1, 1, 1, 1, 1]");
    assert_eq!(lines[14], "HALT!");
}

#[test]
fn test_runs_are_deterministic() {
    let (first_machine, first) = run_recorded(busy_beaver_4().unwrap());
    let (second_machine, second) = run_recorded(busy_beaver_4().unwrap());

    assert_eq!(first, second);
    assert_eq!(first_machine.state(), second_machine.state());
}

#[test]
fn test_reset_replays_the_same_run() {
    let mut machine = Machine::new(busy_beaver_3().unwrap()).unwrap();

    let mut first = Recorder::new();
    machine.run_with(&mut first).unwrap();

    machine.reset();
    let mut second = Recorder::new();
    machine.run_with(&mut second).unwrap();

    assert_eq!(first.snapshots(), second.snapshots());
}

#[test]
fn test_busy_beaver_2_and_4_scores() {
    let (machine, _) = run_recorded(busy_beaver_2().unwrap());
    assert_eq!(machine.step_count(), 6);
    assert_eq!(machine.score(), 4);
    assert_eq!(machine.tape().snapshot(), vec!['1'; 4]);

    let (machine, _) = run_recorded(busy_beaver_4().unwrap());
    assert_eq!(machine.step_count(), 107);
    assert_eq!(machine.score(), 13);
    assert_eq!(machine.snapshot().tape_string(), "10111111111111");
}

#[test]
fn test_binary_increment() {
    let (machine, _) = run_recorded(binary_increment().unwrap());
    assert_eq!(machine.snapshot().tape_string(), "1100_");
    assert_eq!(machine.step_count(), 8);

    // The carry runs off the left end of the input
    let mut config = binary_increment().unwrap();
    config.input = "111".chars().collect();
    let (machine, _) = run_recorded(config);
    assert_eq!(machine.snapshot().tape_string(), "1000_");
    assert_eq!(machine.head(), -1);
}

#[test]
fn test_missing_transition_is_not_a_halt() {
    let config = MachineConfig::builder("Stuck")
        .states(["A", "B", "C", "HALT"])
        .initial_state("A")
        .terminal_state("HALT")
        .alphabet(['0', '1'])
        .blank('0')
        .rule("A", '0', '1', Direction::Right, "B")
        .rule("B", '0', '1', Direction::Left, "C")
        .build()
        .unwrap();

    let mut machine = Machine::new(config).unwrap();
    let mut recorder = Recorder::new();

    assert_eq!(
        machine.run_bounded(STEP_LIMIT, &mut recorder),
        Err(MachineError::MissingTransition {
            state: State::new("C"),
            symbol: '1',
        })
    );
    assert!(!machine.is_halted());
    assert!(!recorder.is_halted());
    assert_eq!(recorder.snapshots().len(), 3);
}

#[test]
fn test_blank_outside_alphabet_fails_before_running() {
    let mut config = busy_beaver_3().unwrap();
    config.blank = '_';

    match Machine::new(config) {
        Err(MachineError::Configuration(msg)) => assert!(msg.contains("Blank symbol")),
        other => panic!("Expected a configuration error, but got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_input_outside_alphabet_is_rejected() {
    let mut config = binary_increment().unwrap();
    config.input = "10x1".chars().collect();

    assert!(matches!(
        Machine::new(config),
        Err(MachineError::Configuration(_))
    ));
}

#[test]
fn test_independent_machines_on_threads() {
    let handles: Vec<_> = [busy_beaver_2, busy_beaver_3, busy_beaver_4]
        .into_iter()
        .map(|program| {
            let mut machine = Machine::new(program().unwrap()).unwrap();
            thread::spawn(move || {
                machine.run().unwrap();
                (machine.step_count(), machine.score())
            })
        })
        .collect();

    let results: Vec<(u64, usize)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![(6, 4), (13, 6), (107, 13)]);
}
