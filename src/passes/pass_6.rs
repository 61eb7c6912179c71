//! Pass 6: Post-processing Overrides
//!
//! Exactly one of two rules applies per progression: blues-specific
//! reordering/exclusion, or score-gap cutoff plus pentatonic companion
//! injection.

use crate::analysis::{ScoredCandidate, Tonic};
use crate::config::Config;
use crate::error::{Result as ScaleErrorResult, ScaleError};
use crate::progression::ProgressionState;
use crate::scales::{ScaleFamily, ScaleKind};

/// Scales inappropriate in a blues context
const BLUES_EXCLUDED: [ScaleKind; 4] = [
    ScaleKind::Ionian,
    ScaleKind::HarmonicMinor,
    ScaleKind::MelodicMinor,
    ScaleKind::MajorBlues,
];

/// Blues priority scales, prepended in this fixed order
const BLUES_PRIORITY: [ScaleKind; 3] = [
    ScaleKind::MinorPentatonic,
    ScaleKind::Mixolydian,
    ScaleKind::MinorBlues,
];

/// Drop blues-inappropriate scales and prepend the priority scales for the
/// detected tonic, fetched from the unfiltered candidate pool
pub fn apply_blues_overrides(
    ranked: &[ScoredCandidate],
    pool: &[ScoredCandidate],
    tonic: &Tonic,
) -> Vec<ScoredCandidate> {
    let rest: Vec<ScoredCandidate> = ranked
        .iter()
        .filter(|c| !BLUES_EXCLUDED.contains(&c.kind) && !BLUES_PRIORITY.contains(&c.kind))
        .cloned()
        .collect();

    let mut result: Vec<ScoredCandidate> = Vec::with_capacity(rest.len() + BLUES_PRIORITY.len());
    for kind in BLUES_PRIORITY {
        if let Some(c) = pool
            .iter()
            .find(|c| c.tonic.pc == tonic.pc && c.kind == kind)
        {
            result.push(c.clone());
        }
    }
    result.extend(rest);
    result
}

/// Drop candidates trailing the top score by more than the configured gap,
/// keeping results in the same neighborhood as the best fit
pub fn apply_score_gap(ranked: Vec<ScoredCandidate>, config: &Config) -> Vec<ScoredCandidate> {
    if ranked.len() <= 1 {
        return ranked;
    }
    let top_score = ranked[0].score;
    ranked
        .into_iter()
        .enumerate()
        .filter(|(i, c)| *i == 0 || top_score - c.score <= config.ranking.score_gap_max)
        .map(|(_, c)| c)
        .collect()
}

/// A pentatonic companion only needs decent scale relevance; root coverage
/// is deliberately not required for a five-note subset
fn viable_companion(
    pool: &[ScoredCandidate],
    tonic_pc: u8,
    kind: ScaleKind,
    config: &Config,
) -> Option<ScoredCandidate> {
    let c = pool
        .iter()
        .find(|c| c.tonic.pc == tonic_pc && c.kind == kind)?;
    if c.scale_relevance >= config.ranking.companion_relevance_min {
        Some(c.clone())
    } else {
        None
    }
}

/// Inject the pentatonic matching the top-ranked mode's family directly
/// after that mode, removing any buried occurrence first
pub fn inject_pentatonic_companion(
    ranked: Vec<ScoredCandidate>,
    pool: &[ScoredCandidate],
    config: &Config,
) -> Vec<ScoredCandidate> {
    let Some(top_mode) = ranked.iter().find(|c| c.kind.tier() == 1).cloned() else {
        return ranked;
    };

    // Major-flavored modes take the major pentatonic, minor-flavored the
    // minor pentatonic
    let companion_kind = match top_mode.kind.family() {
        ScaleFamily::Major => ScaleKind::MajorPentatonic,
        ScaleFamily::Minor => ScaleKind::MinorPentatonic,
    };

    let Some(companion) = viable_companion(pool, top_mode.tonic.pc, companion_kind, config) else {
        return ranked;
    };

    let mut cleaned: Vec<ScoredCandidate> = ranked
        .into_iter()
        .filter(|c| !(c.tonic.pc == companion.tonic.pc && c.kind == companion.kind))
        .collect();
    let insert_at = cleaned
        .iter()
        .position(|c| c.tonic.pc == top_mode.tonic.pc && c.kind == top_mode.kind)
        .map(|i| i + 1)
        .unwrap_or(cleaned.len());
    cleaned.insert(insert_at, companion);
    cleaned
}

pub fn run(state: &mut ProgressionState, config: &Config) -> ScaleErrorResult<()> {
    println!("Pass 6: Post-processing Overrides");

    let tonic = state.tonic.clone().ok_or_else(|| {
        ScaleError::ProcessingPipelineError("Pass 1 must be run before Pass 6".to_string())
    })?;

    if state.is_blues {
        state.ranked = apply_blues_overrides(&state.ranked, &state.candidates, &tonic);
        println!("  Applied blues overrides ({} candidates)", state.ranked.len());
    } else {
        let ranked = std::mem::take(&mut state.ranked);
        let ranked = apply_score_gap(ranked, config);
        state.ranked = inject_pentatonic_companion(ranked, &state.candidates, config);
        println!(
            "  Applied score gap and companion injection ({} candidates)",
            state.ranked.len()
        );
    }

    Ok(())
}
