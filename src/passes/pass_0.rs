//! Pass 0: Chord Parsing & Validation

use crate::chord;
use crate::config::Config;
use crate::error::{Result as ScaleErrorResult, ScaleError};
use crate::progression::ProgressionState;

pub fn run(state: &mut ProgressionState, _config: &Config) -> ScaleErrorResult<()> {
    println!("Pass 0: Chord Parsing & Validation");

    state.chords = state
        .tokens
        .iter()
        .map(|t| chord::parse_chord_symbol(t))
        .collect();

    let valid_count = state.chords.iter().filter(|c| c.is_valid).count();
    if valid_count == 0 {
        return Err(ScaleError::NoResolvableChords(state.input.clone()));
    }

    // Merge note pitch classes and collect distinct roots in input order
    for chord in state.chords.iter().filter(|c| c.is_valid) {
        for &pc in &chord.notes {
            state.input_pcs.insert(pc);
        }
        if let Some(root) = chord.root_pc {
            if !state.root_pcs.contains(&root) {
                state.root_pcs.push(root);
            }
        }
    }

    println!(
        "  Resolved {} of {} tokens ({} distinct pitch classes)",
        valid_count,
        state.tokens.len(),
        state.input_pcs.len()
    );

    Ok(())
}
