//! Pass 4: Candidate Scoring
//!
//! Crosses the detected tonic with the scale whitelist and computes three
//! coverage metrics per candidate plus a weighted composite score.

use crate::analysis::{ScoredCandidate, Tonic};
use crate::chord::ParsedChord;
use crate::config::Config;
use crate::error::{Result as ScaleErrorResult, ScaleError};
use crate::pitch;
use crate::progression::ProgressionState;
use crate::scales::{self, ScaleKind, WHITELIST};
use std::collections::{BTreeSet, HashMap};

/// Small bonus for Mixolydian when the tonic chord itself carries a minor
/// seventh above its root (the hallmark of a dominant chord)
pub fn dominant_bonus(
    chords: &[ParsedChord],
    kind: ScaleKind,
    tonic: &Tonic,
    config: &Config,
) -> f32 {
    if kind != ScaleKind::Mixolydian {
        return 0.0;
    }
    let Some(chord) = chords
        .iter()
        .find(|c| c.is_valid && c.root_pc == Some(tonic.pc))
    else {
        return 0.0;
    };
    let flat_seven = pitch::transpose(tonic.pc, 10);
    if chord.notes.contains(&flat_seven) {
        config.scoring.dominant_mixolydian_bonus
    } else {
        0.0
    }
}

/// Score every (candidate tonic, whitelist entry) pair
pub fn score_candidates(
    chords: &[ParsedChord],
    input_pcs: &BTreeSet<u8>,
    root_pcs: &[u8],
    candidate_tonics: &[Tonic],
    modal_bonuses: &HashMap<ScaleKind, f32>,
    config: &Config,
) -> Vec<ScoredCandidate> {
    let first_tonic_pc = candidate_tonics.first().map(|t| t.pc);
    let mut results = Vec::with_capacity(candidate_tonics.len() * WHITELIST.len());

    for tonic in candidate_tonics {
        for kind in WHITELIST {
            let scale_pcs = scales::scale_pitch_classes(tonic.pc, kind);

            // How much of what was played is explained by the scale
            let covered = input_pcs.iter().filter(|pc| scale_pcs.contains(pc)).count();
            let coverage = if input_pcs.is_empty() {
                0.0
            } else {
                covered as f32 / input_pcs.len() as f32
            };

            // How much of the scale is actually used; penalizes large
            // scales that trivially cover small inputs
            let used = scale_pcs.iter().filter(|pc| input_pcs.contains(pc)).count();
            let scale_relevance = if scale_pcs.is_empty() {
                0.0
            } else {
                used as f32 / scale_pcs.len() as f32
            };

            // Whether every chord root is diatonic to the scale
            let roots_covered = root_pcs.iter().filter(|pc| scale_pcs.contains(pc)).count();
            let root_coverage = if root_pcs.is_empty() {
                0.0
            } else {
                roots_covered as f32 / root_pcs.len() as f32
            };

            let is_first_tonic = Some(tonic.pc) == first_tonic_pc;

            let mut score = coverage * config.scoring.coverage_weight
                + scale_relevance * config.scoring.relevance_weight
                + root_coverage * config.scoring.root_weight;
            if is_first_tonic {
                score += config.scoring.first_tonic_bonus;
            }
            // Slight preference for the two "base" scales
            if kind == ScaleKind::Ionian || kind == ScaleKind::Aeolian {
                score += config.scoring.default_scale_bonus;
            }
            score += dominant_bonus(chords, kind, tonic, config);
            score += modal_bonuses.get(&kind).copied().unwrap_or(0.0);

            results.push(ScoredCandidate {
                kind,
                tonic: tonic.clone(),
                coverage,
                scale_relevance,
                root_coverage,
                is_first_tonic,
                score,
            });
        }
    }

    results
}

pub fn run(state: &mut ProgressionState, config: &Config) -> ScaleErrorResult<()> {
    println!("Pass 4: Candidate Scoring");

    let tonic = state.tonic.clone().ok_or_else(|| {
        ScaleError::ProcessingPipelineError("Pass 1 must be run before Pass 4".to_string())
    })?;

    state.candidates = score_candidates(
        &state.chords,
        &state.input_pcs,
        &state.root_pcs,
        &[tonic],
        &state.modal_bonuses,
        config,
    );

    println!("  Scored {} candidates", state.candidates.len());
    Ok(())
}
