//! Comprehensive validation tests for Pass 5: Filter & Rank

use chord2scale::analysis::{ScoredCandidate, Tonic};
use chord2scale::config::Config;
use chord2scale::passes::pass_5::filter_and_rank;
use chord2scale::scales::ScaleKind;

/// Build a synthetic scored candidate
fn candidate(
    kind: ScaleKind,
    tonic_pc: u8,
    tonic_name: &str,
    coverage: f32,
    scale_relevance: f32,
    root_coverage: f32,
    score: f32,
) -> ScoredCandidate {
    ScoredCandidate {
        kind,
        tonic: Tonic {
            pc: tonic_pc,
            name: tonic_name.to_string(),
        },
        coverage,
        scale_relevance,
        root_coverage,
        is_first_tonic: true,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_pass_requires_full_root_coverage_and_coverage() {
        let config = Config::default();
        let candidates = vec![
            // Fails everything: root coverage below the relaxed floor
            candidate(ScaleKind::Ionian, 0, "C", 1.0, 0.9, 0.7, 0.9),
            // Strict: all roots diatonic, coverage above 0.7
            candidate(ScaleKind::Dorian, 0, "C", 0.75, 0.7, 1.0, 0.8),
        ];
        let ranked = filter_and_rank(&candidates, &config);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].kind, ScaleKind::Dorian);
    }

    #[test]
    fn test_small_scales_use_relevance_thresholds() {
        let config = Config::default();
        let candidates = vec![
            // Pentatonic with high relevance passes strict despite low
            // coverage
            candidate(ScaleKind::MajorPentatonic, 0, "C", 0.5, 0.85, 1.0, 0.8),
            // Pentatonic with mid relevance only reaches the relaxed pass
            candidate(ScaleKind::MinorPentatonic, 0, "C", 0.5, 0.65, 1.0, 0.7),
            // Below the relaxed relevance floor: excluded
            candidate(ScaleKind::MinorBlues, 0, "C", 0.5, 0.5, 1.0, 0.6),
        ];
        let ranked = filter_and_rank(&candidates, &config);
        let kinds: Vec<ScaleKind> = ranked.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ScaleKind::MajorPentatonic, ScaleKind::MinorPentatonic]
        );
    }

    #[test]
    fn test_relaxed_pass_surfaces_near_misses() {
        let config = Config::default();
        // Root coverage 0.8 fails strict but clears the relaxed floor
        let candidates = vec![candidate(
            ScaleKind::HarmonicMinor,
            0,
            "C",
            0.65,
            0.6,
            0.8,
            0.7,
        )];
        let ranked = filter_and_rank(&candidates, &config);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].kind, ScaleKind::HarmonicMinor);
    }

    #[test]
    fn test_sort_descending_with_tier_tiebreak() {
        let config = Config::default();
        let candidates = vec![
            candidate(ScaleKind::HarmonicMinor, 0, "C", 0.9, 0.9, 1.0, 0.9),
            candidate(ScaleKind::MajorPentatonic, 0, "C", 0.9, 0.9, 1.0, 0.95),
            candidate(ScaleKind::Dorian, 0, "C", 0.9, 0.9, 1.0, 0.9),
        ];
        let ranked = filter_and_rank(&candidates, &config);
        let kinds: Vec<ScaleKind> = ranked.iter().map(|c| c.kind).collect();
        // Highest score first; the 0.9 tie resolves by tier (mode before
        // harmonic minor)
        assert_eq!(
            kinds,
            vec![
                ScaleKind::MajorPentatonic,
                ScaleKind::Dorian,
                ScaleKind::HarmonicMinor
            ]
        );
    }

    #[test]
    fn test_near_tie_within_tolerance_resolves_by_tier() {
        let config = Config::default();
        let candidates = vec![
            candidate(ScaleKind::MelodicMinor, 0, "C", 0.9, 0.9, 1.0, 0.9001),
            candidate(ScaleKind::Phrygian, 0, "C", 0.9, 0.9, 1.0, 0.9),
        ];
        let ranked = filter_and_rank(&candidates, &config);
        // 0.0001 apart is inside the 0.001 tolerance: the tier-1 mode wins
        assert_eq!(ranked[0].kind, ScaleKind::Phrygian);
        assert_eq!(ranked[1].kind, ScaleKind::MelodicMinor);
    }

    #[test]
    fn test_enharmonic_dedup_keeps_first_spelling() {
        let config = Config::default();
        // F# and Gb Ionian share the same absolute pitch-class set
        let candidates = vec![
            candidate(ScaleKind::Ionian, 6, "F#", 0.9, 0.9, 1.0, 0.9),
            candidate(ScaleKind::Ionian, 6, "Gb", 0.9, 0.9, 1.0, 0.85),
        ];
        let ranked = filter_and_rank(&candidates, &config);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].tonic.name, "F#");
    }

    #[test]
    fn test_mode_pitch_class_set_cap() {
        let config = Config::default();
        // C Ionian, A Aeolian and D Dorian all use the C major note set
        let candidates = vec![
            candidate(ScaleKind::Ionian, 0, "C", 0.9, 0.9, 1.0, 0.9),
            candidate(ScaleKind::Aeolian, 9, "A", 0.9, 0.9, 1.0, 0.85),
            candidate(ScaleKind::Dorian, 2, "D", 0.9, 0.9, 1.0, 0.8),
        ];
        let ranked = filter_and_rank(&candidates, &config);
        let kinds: Vec<ScaleKind> = ranked.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ScaleKind::Ionian, ScaleKind::Aeolian]);
    }

    #[test]
    fn test_mode_set_cap_ignores_non_modes() {
        let config = Config::default();
        // A pentatonic sharing notes with capped modes is not affected
        let candidates = vec![
            candidate(ScaleKind::Ionian, 0, "C", 0.9, 0.9, 1.0, 0.9),
            candidate(ScaleKind::Aeolian, 9, "A", 0.9, 0.9, 1.0, 0.85),
            candidate(ScaleKind::Dorian, 2, "D", 0.9, 0.9, 1.0, 0.8),
            candidate(ScaleKind::MajorPentatonic, 0, "C", 0.9, 0.9, 1.0, 0.7),
        ];
        let ranked = filter_and_rank(&candidates, &config);
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().any(|c| c.kind == ScaleKind::MajorPentatonic));
    }

    #[test]
    fn test_mode_per_tonic_cap() {
        let config = Config::default();
        let candidates = vec![
            candidate(ScaleKind::Ionian, 0, "C", 0.9, 0.9, 1.0, 0.9),
            candidate(ScaleKind::Lydian, 0, "C", 0.9, 0.9, 1.0, 0.85),
            candidate(ScaleKind::Mixolydian, 0, "C", 0.9, 0.9, 1.0, 0.8),
        ];
        let ranked = filter_and_rank(&candidates, &config);
        let kinds: Vec<ScaleKind> = ranked.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ScaleKind::Ionian, ScaleKind::Lydian]);
    }

    #[test]
    fn test_empty_input_and_no_survivors() {
        let config = Config::default();
        assert!(filter_and_rank(&[], &config).is_empty());

        let candidates = vec![candidate(ScaleKind::Ionian, 0, "C", 0.5, 0.4, 0.5, 0.5)];
        assert!(filter_and_rank(&candidates, &config).is_empty());
    }
}
