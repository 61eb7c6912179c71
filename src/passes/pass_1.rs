//! Pass 1: Tonic Detection

use crate::analysis::Tonic;
use crate::chord::{ChordQuality, ChordType, ParsedChord};
use crate::config::Config;
use crate::error::{Result as ScaleErrorResult, ScaleError};
use crate::pitch;
use crate::progression::ProgressionState;
use crate::scales::{self, ScaleKind};

/// Candidate-tonic chroma offsets from a chord root: the root itself plus
/// the keys in which that root sits on another diatonic degree
const DEGREE_OFFSETS: [i32; 7] = [0, 2, -2, 4, -4, 5, -5];

fn valid_chords(chords: &[ParsedChord]) -> Vec<&ParsedChord> {
    chords
        .iter()
        .filter(|c| c.is_valid && c.root_pc.is_some())
        .collect()
}

/// Spelling for a derived tonic: prefer the spelling of a chord root on the
/// same pitch class, fall back to the canonical name table
fn tonic_for_pc(chords: &[&ParsedChord], pc: u8) -> Tonic {
    let name = chords
        .iter()
        .find(|c| c.root_pc == Some(pc))
        .map(|c| c.root_name.clone())
        .unwrap_or_else(|| pitch::pitch_name(pc).to_string());
    Tonic { pc, name }
}

/// Detect the tonic from harmonic relationships between the chords.
/// Can return a key that is not present in the progression itself.
pub fn detect_tonic_from_harmony(chords: &[ParsedChord]) -> Option<Tonic> {
    let valid = valid_chords(chords);
    if valid.is_empty() {
        return None;
    }

    // Multiple dominant sevenths read as blues: the first dom7 IS the
    // tonic (I7), not a V7 pointer
    let dom7: Vec<&&ParsedChord> = valid
        .iter()
        .filter(|c| c.is_type(ChordType::DominantSeventh))
        .collect();
    if dom7.len() >= 2 {
        let first = dom7[0];
        return Some(Tonic {
            pc: first.root_pc?,
            name: first.root_name.clone(),
        });
    }

    // Leading-tone diminished chord: the key sits a half-step above its root
    // (Bdim suggests C major, F#dim suggests G major)
    for c in &valid {
        if c.quality == ChordQuality::Diminished || c.chord_type == Some(ChordType::Diminished) {
            let pc = pitch::transpose(c.root_pc?, 1);
            return Some(tonic_for_pc(&valid, pc));
        }
    }

    // A single dominant seventh acts as V7: the key is a fifth below
    // (D7 suggests G major, G7 suggests C major)
    for c in &valid {
        if c.is_type(ChordType::DominantSeventh) {
            let pc = pitch::transpose(c.root_pc?, -7);
            return Some(tonic_for_pc(&valid, pc));
        }
    }

    // Diatonic-fit search: enumerate candidate keys from each root in input
    // order, score by how many roots are diatonic to the candidate's major
    // scale. First insertion wins ties.
    let mut candidate_pcs: Vec<u8> = Vec::new();
    for c in &valid {
        for off in DEGREE_OFFSETS {
            let pc = pitch::transpose(c.root_pc?, off);
            if !candidate_pcs.contains(&pc) {
                candidate_pcs.push(pc);
            }
        }
    }

    let mut best: Option<(u8, f32)> = None;
    for &key_pc in &candidate_pcs {
        let scale = scales::scale_pitch_classes(key_pc, ScaleKind::Ionian);
        let fitting = valid
            .iter()
            .filter(|c| c.root_pc.map(|pc| scale.contains(&pc)).unwrap_or(false))
            .count();
        let mut score = fitting as f32;
        if fitting == valid.len() {
            score += 0.5;
        }
        match best {
            Some((_, s)) if score <= s => {}
            _ => best = Some((key_pc, score)),
        }
    }

    // Only answer with strong confidence (every chord root fits)
    if let Some((pc, score)) = best {
        if score >= valid.len() as f32 {
            return Some(tonic_for_pc(&valid, pc));
        }
    }

    None
}

/// Detect the primary tonal center using weighted positional heuristics:
/// first chord 0.5, last chord 0.25, most frequent root 0.25, first AND
/// last +0.3. Ties keep the first-encountered root.
pub fn detect_primary_tonic(chords: &[ParsedChord]) -> Option<Tonic> {
    let valid = valid_chords(chords);
    if valid.is_empty() {
        return None;
    }

    // Occurrence counts per distinct root, input order
    let mut roots: Vec<(u8, usize)> = Vec::new();
    for c in &valid {
        let pc = c.root_pc?;
        if let Some(entry) = roots.iter_mut().find(|(p, _)| *p == pc) {
            entry.1 += 1;
        } else {
            roots.push((pc, 1));
        }
    }

    let max_freq = roots.iter().map(|(_, n)| *n).max()?;
    let first_pc = valid.first()?.root_pc?;
    let last_pc = valid.last()?.root_pc?;

    let mut best: Option<(u8, f32)> = None;
    for &(pc, count) in &roots {
        let mut score = 0.0;
        if pc == first_pc {
            score += 0.5;
        }
        if pc == last_pc {
            score += 0.25;
        }
        if count == max_freq {
            score += 0.25;
        }
        if pc == first_pc && pc == last_pc {
            score += 0.3;
        }
        match best {
            Some((_, s)) if score <= s => {}
            _ => best = Some((pc, score)),
        }
    }

    best.map(|(pc, _)| tonic_for_pc(&valid, pc))
}

pub fn run(state: &mut ProgressionState, _config: &Config) -> ScaleErrorResult<()> {
    println!("Pass 1: Tonic Detection");

    let tonic = match detect_tonic_from_harmony(&state.chords) {
        Some(t) => {
            println!("  Tonic: {} (harmonic inference)", t.name);
            t
        }
        None => {
            let t = detect_primary_tonic(&state.chords).ok_or(ScaleError::NoDetectableTonic)?;
            println!("  Tonic: {} (weighted positional fallback)", t.name);
            t
        }
    };

    state.tonic = Some(tonic);
    Ok(())
}
