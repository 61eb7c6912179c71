//! Comprehensive validation tests for Pass 0: Chord Parsing & Validation

use chord2scale::chord::{parse_chord_symbol, ChordQuality, ChordType};
use chord2scale::config::Config;
use chord2scale::passes::pass_0;
use chord2scale::progression::ProgressionState;
use chord2scale::ScaleError;

/// Build a state and run pass 0 on it
fn run_pass_0(input: &str) -> Result<ProgressionState, ScaleError> {
    let config = Config::default();
    let mut state = ProgressionState::load(input, &config);
    pass_0::run(&mut state, &config)?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization_on_whitespace_and_commas() {
        let config = Config::default();
        let state = ProgressionState::load("  C,  F   G,Am ", &config);
        assert_eq!(state.tokens, vec!["C", "F", "G", "Am"]);
    }

    #[test]
    fn test_empty_tokens_are_dropped() {
        let config = Config::default();
        let state = ProgressionState::load(",, ,", &config);
        assert!(state.tokens.is_empty());
    }

    #[test]
    fn test_common_chord_symbols_resolve() {
        let cases = [
            ("C", 0, ChordType::Major),
            ("Dm", 2, ChordType::Minor),
            ("F#m7", 6, ChordType::MinorSeventh),
            ("Bbmaj7", 10, ChordType::MajorSeventh),
            ("G7", 7, ChordType::DominantSeventh),
            ("Adim", 9, ChordType::Diminished),
            ("Caug", 0, ChordType::Augmented),
            ("Esus4", 4, ChordType::SuspendedFourth),
            ("C6", 0, ChordType::MajorSixth),
            ("Cadd9", 0, ChordType::AddedNinth),
        ];

        for (token, root, chord_type) in cases {
            let chord = parse_chord_symbol(token);
            assert!(chord.is_valid, "{} should resolve", token);
            assert_eq!(chord.root_pc, Some(root), "{} root", token);
            assert_eq!(chord.chord_type, Some(chord_type), "{} type", token);
        }
    }

    #[test]
    fn test_quality_tags() {
        assert_eq!(parse_chord_symbol("C").quality, ChordQuality::Major);
        assert_eq!(parse_chord_symbol("Cm").quality, ChordQuality::Minor);
        assert_eq!(parse_chord_symbol("Cdim7").quality, ChordQuality::Diminished);
        assert_eq!(parse_chord_symbol("C+").quality, ChordQuality::Augmented);
        assert_eq!(parse_chord_symbol("Csus2").quality, ChordQuality::Unknown);
    }

    #[test]
    fn test_invalid_token_retains_no_root_or_notes() {
        let state = run_pass_0("C Xy G7").unwrap();
        assert_eq!(state.chords.len(), 3);
        assert!(!state.chords[1].is_valid);
        assert_eq!(state.chords[1].root_pc, None);
        assert!(state.chords[1].notes.is_empty());
        assert_eq!(state.valid_chords().len(), 2);
    }

    #[test]
    fn test_note_merging_over_valid_chords() {
        let state = run_pass_0("C F G").unwrap();
        // C+F+G triads together spell the full C major scale
        let expected: Vec<u8> = vec![0, 2, 4, 5, 7, 9, 11];
        let got: Vec<u8> = state.input_pcs.iter().copied().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_root_pitch_classes_deduped_in_input_order() {
        let state = run_pass_0("G C G D").unwrap();
        assert_eq!(state.root_pcs, vec![7, 0, 2]);
    }

    #[test]
    fn test_all_invalid_tokens_is_parse_failure() {
        let result = run_pass_0("Xy Qz");
        assert!(matches!(result, Err(ScaleError::NoResolvableChords(_))));
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("E001"));
    }
}
