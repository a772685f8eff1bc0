//! This module renders a transition table in the compact notation used to share Busy Beaver
//! programs, e.g. `1RB1LC_1LA1RB_1LB1RH`.
//!
//! Each non-terminal state gets one `_`-separated row, in declaration order. A row holds one
//! `write direction next` triple per alphabet symbol, in alphabet order. Terminal next states
//! are written as `H` and undefined pairs as `---`.

use crate::config::MachineConfig;

/// Encodes the program of `config` in the compact notation.
pub fn encode(config: &MachineConfig) -> String {
    config
        .states
        .iter()
        .filter(|state| !config.is_terminal(state))
        .map(|state| {
            config
                .alphabet
                .iter()
                .map(|&symbol| match config.table.get(state.as_str(), symbol) {
                    Some(instr) => {
                        let next = if config.is_terminal(&instr.next) {
                            "H"
                        } else {
                            instr.next.as_str()
                        };
                        format!("{}{}{}", instr.write, instr.direction.as_char(), next)
                    }
                    None => "---".to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_")
}
