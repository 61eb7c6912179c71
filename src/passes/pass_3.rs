//! Pass 3: Blues Classification

use crate::chord::{ChordType, ParsedChord};
use crate::config::Config;
use crate::error::Result as ScaleErrorResult;
use crate::progression::ProgressionState;

/// Detect blues progressions while excluding ii-V-I jazz patterns
pub fn is_blues_progression(chords: &[ParsedChord]) -> bool {
    let valid: Vec<&ParsedChord> = chords
        .iter()
        .filter(|c| c.is_valid && c.root_pc.is_some())
        .collect();
    if valid.len() < 2 {
        return false;
    }

    // A minor seventh resolving into a dominant seventh is jazz ii-V
    // motion, not blues
    for i in 0..valid.len().saturating_sub(2) {
        if valid[i].is_type(ChordType::MinorSeventh)
            && valid[i + 1].is_type(ChordType::DominantSeventh)
        {
            return false;
        }
    }

    // Blues typically carries multiple dominant sevenths
    let dom7_count = valid
        .iter()
        .filter(|c| c.is_type(ChordType::DominantSeventh))
        .count();
    if dom7_count >= 2 {
        return true;
    }

    // Classic I7 -> IV7 motion: adjacent dominant sevenths a perfect
    // fourth apart
    for pair in valid.windows(2) {
        if pair[0].is_type(ChordType::DominantSeventh)
            && pair[1].is_type(ChordType::DominantSeventh)
        {
            if let (Some(a), Some(b)) = (pair[0].root_pc, pair[1].root_pc) {
                let interval = (b as i32 - a as i32).rem_euclid(12);
                if interval == 5 {
                    return true;
                }
            }
        }
    }

    false
}

pub fn run(state: &mut ProgressionState, _config: &Config) -> ScaleErrorResult<()> {
    println!("Pass 3: Blues Classification");

    state.is_blues = is_blues_progression(&state.chords);
    println!(
        "  Progression classified as {}",
        if state.is_blues { "blues" } else { "non-blues" }
    );

    Ok(())
}
