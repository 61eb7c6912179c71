//! Pass 5: Filter & Rank
//!
//! Two-pass thresholding, enharmonic dedup, score sort and per-tier caps.

use crate::analysis::ScoredCandidate;
use crate::config::Config;
use crate::error::Result as ScaleErrorResult;
use crate::pitch;
use crate::progression::ProgressionState;
use crate::scales::{self, ScaleKind};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

fn candidate_key(c: &ScoredCandidate) -> (u8, ScaleKind) {
    (c.tonic.pc, c.kind)
}

fn pitch_class_key(c: &ScoredCandidate) -> String {
    pitch::pitch_class_set_key(&scales::scale_pitch_classes(c.tonic.pc, c.kind))
}

/// Filter candidates through strict then relaxed thresholds, dedup
/// enharmonic spellings, sort, and cap the diatonic modes
pub fn filter_and_rank(candidates: &[ScoredCandidate], config: &Config) -> Vec<ScoredCandidate> {
    let f = &config.filter;

    // Strict pass: every chord root diatonic plus good coverage
    let strict: Vec<ScoredCandidate> = candidates
        .iter()
        .filter(|c| {
            if c.root_coverage < 1.0 {
                return false;
            }
            if c.kind.is_small() {
                c.scale_relevance >= f.strict_small_relevance_min
            } else {
                c.coverage >= f.strict_coverage_min
            }
        })
        .cloned()
        .collect();

    // Relaxed pass: surfaces harmonic minor, blues scales and the like
    // that strict thresholds would exclude
    let strict_keys: HashSet<(u8, ScaleKind)> = strict.iter().map(candidate_key).collect();
    let relaxed: Vec<ScoredCandidate> = candidates
        .iter()
        .filter(|c| {
            if strict_keys.contains(&candidate_key(c)) {
                return false;
            }
            if c.root_coverage < f.relaxed_root_min {
                return false;
            }
            if c.kind.is_small() {
                c.scale_relevance >= f.relaxed_small_relevance_min
            } else {
                c.coverage >= f.relaxed_coverage_min
            }
        })
        .cloned()
        .collect();

    let mut filtered: Vec<ScoredCandidate> = if strict.is_empty() {
        relaxed
    } else {
        strict.into_iter().chain(relaxed).collect()
    };
    if filtered.is_empty() {
        return filtered;
    }

    // Dedup enharmonic equivalents: same absolute pitch-class set and the
    // same canonical scale name keeps the first-seen spelling only
    let mut seen: HashSet<String> = HashSet::new();
    filtered.retain(|c| {
        let key = format!("{}_{}", pitch_class_key(c), c.kind.canonical_name());
        seen.insert(key)
    });

    // Sort by composite score with near-ties quantized to the tolerance,
    // then by tier (simpler scales first). The stable sort keeps whitelist
    // order within exact ties.
    let tolerance = f.score_tolerance;
    filtered.sort_by_key(|c| {
        let bucket = (c.score / tolerance).round() as i64;
        (Reverse(bucket), c.kind.tier())
    });

    // Cap 1: at most N diatonic modes sharing one absolute pitch-class set
    // (distinct modes over identical notes, e.g. relative major/minor)
    let mut set_counts: HashMap<String, usize> = HashMap::new();
    filtered.retain(|c| {
        if c.kind.tier() != 1 {
            return true;
        }
        let count = set_counts.entry(pitch_class_key(c)).or_insert(0);
        if *count >= config.ranking.mode_set_cap {
            return false;
        }
        *count += 1;
        true
    });

    // Cap 2: at most N diatonic modes per tonic
    let mut tonic_counts: HashMap<u8, usize> = HashMap::new();
    filtered.retain(|c| {
        if c.kind.tier() != 1 {
            return true;
        }
        let count = tonic_counts.entry(c.tonic.pc).or_insert(0);
        if *count >= config.ranking.mode_tonic_cap {
            return false;
        }
        *count += 1;
        true
    });

    filtered
}

pub fn run(state: &mut ProgressionState, config: &Config) -> ScaleErrorResult<()> {
    println!("Pass 5: Filter & Rank");

    state.ranked = filter_and_rank(&state.candidates, config);

    if state.ranked.is_empty() {
        println!("  No candidates survived filtering");
    } else {
        println!("  {} candidates ranked", state.ranked.len());
    }

    Ok(())
}
