//! Pass 2: Modal Signature Detection
//!
//! Raw coverage metrics cannot distinguish modes that share a parent scale;
//! a major chord at a diagnostic interval from the tonic can. This pass
//! awards small score bonuses for those fingerprints.

use crate::analysis::Tonic;
use crate::chord::{ChordQuality, ParsedChord};
use crate::config::Config;
use crate::error::{Result as ScaleErrorResult, ScaleError};
use crate::progression::ProgressionState;
use crate::scales::ScaleKind;
use std::collections::HashMap;

/// Detect modal chord signatures and return bonus scores per scale kind
pub fn modal_bonuses(
    chords: &[ParsedChord],
    tonic: &Tonic,
    config: &Config,
) -> HashMap<ScaleKind, f32> {
    let mut bonuses = HashMap::new();

    let Some(tonic_chord) = chords
        .iter()
        .find(|c| c.is_valid && c.root_pc == Some(tonic.pc))
    else {
        return bonuses;
    };
    let tonic_is_major = tonic_chord.quality == ChordQuality::Major;
    let tonic_is_minor = tonic_chord.quality == ChordQuality::Minor;

    let mut has_flat_vii = false; // major chord 10 semitones up (bVII)
    let mut has_flat_ii = false; // major chord 1 semitone up (bII)
    let mut has_flat_vi = false; // major chord 8 semitones up (bVI)
    let mut has_major_ii = false; // major chord 2 semitones up (II)

    for c in chords.iter().filter(|c| c.is_valid) {
        let Some(root) = c.root_pc else { continue };
        if root == tonic.pc || c.quality != ChordQuality::Major {
            continue;
        }
        let interval = (root as i32 - tonic.pc as i32).rem_euclid(12);
        match interval {
            10 => has_flat_vii = true,
            1 => has_flat_ii = true,
            8 => has_flat_vi = true,
            2 => has_major_ii = true,
            _ => {}
        }
    }

    // Dorian: minor tonic + bVII, but NO bVI (bVI signals Aeolian instead)
    if tonic_is_minor && has_flat_vii && !has_flat_vi {
        bonuses.insert(ScaleKind::Dorian, config.modal.dorian_bonus);
    }

    // Phrygian: minor tonic + bII
    if tonic_is_minor && has_flat_ii {
        bonuses.insert(ScaleKind::Phrygian, config.modal.phrygian_bonus);
    }

    // Lydian: major tonic + major II chord (the II naturally contains #4)
    if tonic_is_major && has_major_ii {
        bonuses.insert(ScaleKind::Lydian, config.modal.lydian_bonus);
    }

    // Mixolydian: major tonic + bVII
    if tonic_is_major && has_flat_vii {
        bonuses.insert(ScaleKind::Mixolydian, config.modal.mixolydian_bonus);
    }

    bonuses
}

pub fn run(state: &mut ProgressionState, config: &Config) -> ScaleErrorResult<()> {
    println!("Pass 2: Modal Signature Detection");

    let tonic = state.tonic.clone().ok_or_else(|| {
        ScaleError::ProcessingPipelineError("Pass 1 must be run before Pass 2".to_string())
    })?;

    state.modal_bonuses = modal_bonuses(&state.chords, &tonic, config);

    if state.modal_bonuses.is_empty() {
        println!("  No modal signatures detected");
    } else {
        let mut kinds: Vec<&str> = state
            .modal_bonuses
            .keys()
            .map(|k| k.type_key())
            .collect();
        kinds.sort_unstable();
        println!("  Modal signatures: {}", kinds.join(", "));
    }

    Ok(())
}
