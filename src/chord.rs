//! Chord-symbol interpreter
//!
//! Resolves standard chord symbols (e.g. `C`, `Dm`, `F#m7`, `Bbmaj7`, `G7`)
//! into root pitch class, constituent notes, coarse quality and chord type.

use crate::pitch;
use serde::{Deserialize, Serialize};

/// Coarse triad quality derived from a chord's third and fifth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Augmented,
    Diminished,
    Unknown,
}

impl ChordQuality {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "Minor",
            ChordQuality::Augmented => "Augmented",
            ChordQuality::Diminished => "Diminished",
            ChordQuality::Unknown => "Unknown",
        }
    }
}

/// Supported chord types
///
/// The blues and jazz heuristics key on the exact names of the dominant
/// seventh and minor seventh types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordType {
    Major,
    Minor,
    Augmented,
    Diminished,
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
    MinorMajorSeventh,
    DiminishedSeventh,
    HalfDiminished,
    SuspendedSecond,
    SuspendedFourth,
    MajorSixth,
    MinorSixth,
    DominantNinth,
    AddedNinth,
}

impl ChordType {
    /// Get human-readable type name
    pub fn name(&self) -> &'static str {
        match self {
            ChordType::Major => "major",
            ChordType::Minor => "minor",
            ChordType::Augmented => "augmented",
            ChordType::Diminished => "diminished",
            ChordType::DominantSeventh => "dominant seventh",
            ChordType::MajorSeventh => "major seventh",
            ChordType::MinorSeventh => "minor seventh",
            ChordType::MinorMajorSeventh => "minor-major seventh",
            ChordType::DiminishedSeventh => "diminished seventh",
            ChordType::HalfDiminished => "half-diminished",
            ChordType::SuspendedSecond => "suspended second",
            ChordType::SuspendedFourth => "suspended fourth",
            ChordType::MajorSixth => "major sixth",
            ChordType::MinorSixth => "minor sixth",
            ChordType::DominantNinth => "dominant ninth",
            ChordType::AddedNinth => "added ninth",
        }
    }

    /// Intervals in semitones above the root
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ChordType::Major => &[0, 4, 7],
            ChordType::Minor => &[0, 3, 7],
            ChordType::Augmented => &[0, 4, 8],
            ChordType::Diminished => &[0, 3, 6],
            ChordType::DominantSeventh => &[0, 4, 7, 10],
            ChordType::MajorSeventh => &[0, 4, 7, 11],
            ChordType::MinorSeventh => &[0, 3, 7, 10],
            ChordType::MinorMajorSeventh => &[0, 3, 7, 11],
            ChordType::DiminishedSeventh => &[0, 3, 6, 9],
            ChordType::HalfDiminished => &[0, 3, 6, 10],
            ChordType::SuspendedSecond => &[0, 2, 7],
            ChordType::SuspendedFourth => &[0, 5, 7],
            ChordType::MajorSixth => &[0, 4, 7, 9],
            ChordType::MinorSixth => &[0, 3, 7, 9],
            ChordType::DominantNinth => &[0, 4, 7, 10, 2],
            ChordType::AddedNinth => &[0, 2, 4, 7],
        }
    }

    /// Coarse triad quality implied by the third and fifth
    pub fn quality(&self) -> ChordQuality {
        match self {
            ChordType::Major
            | ChordType::DominantSeventh
            | ChordType::MajorSeventh
            | ChordType::MajorSixth
            | ChordType::DominantNinth
            | ChordType::AddedNinth => ChordQuality::Major,
            ChordType::Minor
            | ChordType::MinorSeventh
            | ChordType::MinorMajorSeventh
            | ChordType::MinorSixth => ChordQuality::Minor,
            ChordType::Augmented => ChordQuality::Augmented,
            ChordType::Diminished
            | ChordType::DiminishedSeventh
            | ChordType::HalfDiminished => ChordQuality::Diminished,
            ChordType::SuspendedSecond | ChordType::SuspendedFourth => ChordQuality::Unknown,
        }
    }
}

/// Recognized suffix spellings per chord type
const SUFFIXES: &[(&str, ChordType)] = &[
    ("", ChordType::Major),
    ("maj", ChordType::Major),
    ("M", ChordType::Major),
    ("m", ChordType::Minor),
    ("min", ChordType::Minor),
    ("-", ChordType::Minor),
    ("aug", ChordType::Augmented),
    ("+", ChordType::Augmented),
    ("dim", ChordType::Diminished),
    ("o", ChordType::Diminished),
    ("°", ChordType::Diminished),
    ("7", ChordType::DominantSeventh),
    ("maj7", ChordType::MajorSeventh),
    ("ma7", ChordType::MajorSeventh),
    ("M7", ChordType::MajorSeventh),
    ("m7", ChordType::MinorSeventh),
    ("min7", ChordType::MinorSeventh),
    ("-7", ChordType::MinorSeventh),
    ("mMaj7", ChordType::MinorMajorSeventh),
    ("minMaj7", ChordType::MinorMajorSeventh),
    ("mM7", ChordType::MinorMajorSeventh),
    ("dim7", ChordType::DiminishedSeventh),
    ("o7", ChordType::DiminishedSeventh),
    ("°7", ChordType::DiminishedSeventh),
    ("m7b5", ChordType::HalfDiminished),
    ("ø", ChordType::HalfDiminished),
    ("ø7", ChordType::HalfDiminished),
    ("sus2", ChordType::SuspendedSecond),
    ("sus4", ChordType::SuspendedFourth),
    ("sus", ChordType::SuspendedFourth),
    ("6", ChordType::MajorSixth),
    ("m6", ChordType::MinorSixth),
    ("min6", ChordType::MinorSixth),
    ("9", ChordType::DominantNinth),
    ("add9", ChordType::AddedNinth),
];

/// A chord record produced per input token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedChord {
    /// The raw input token
    pub token: String,
    /// Did the token resolve to a known chord symbol?
    pub is_valid: bool,
    /// Root pitch class (0-11), present only for valid chords
    pub root_pc: Option<u8>,
    /// Root spelling as written in the token (e.g. "Bb")
    pub root_name: String,
    /// Constituent note pitch classes
    pub notes: Vec<u8>,
    /// Coarse triad quality
    pub quality: ChordQuality,
    /// Resolved chord type, present only for valid chords
    pub chord_type: Option<ChordType>,
}

impl ParsedChord {
    /// Whether this chord is valid and of the given type
    pub fn is_type(&self, chord_type: ChordType) -> bool {
        self.is_valid && self.chord_type == Some(chord_type)
    }

    fn invalid(token: &str) -> Self {
        ParsedChord {
            token: token.to_string(),
            is_valid: false,
            root_pc: None,
            root_name: String::new(),
            notes: Vec::new(),
            quality: ChordQuality::Unknown,
            chord_type: None,
        }
    }
}

/// Split a token into (root spelling, suffix): a note letter followed by any
/// run of accidentals, with the remainder as the suffix
fn split_root(token: &str) -> Option<(&str, &str)> {
    let first = token.chars().next()?;
    if !matches!(first.to_ascii_uppercase(), 'A'..='G') {
        return None;
    }

    let mut root_len = first.len_utf8();
    for c in token[root_len..].chars() {
        if c == '#' || c == 'b' {
            root_len += c.len_utf8();
        } else {
            break;
        }
    }
    Some((&token[..root_len], &token[root_len..]))
}

/// Resolve a single token into a chord record. Tokens that fail resolution
/// are marked invalid and retain no root or notes.
pub fn parse_chord_symbol(token: &str) -> ParsedChord {
    let Some((root_name, suffix)) = split_root(token) else {
        return ParsedChord::invalid(token);
    };
    let Some(root_pc) = pitch::note_chroma(root_name) else {
        return ParsedChord::invalid(token);
    };
    let Some(&(_, chord_type)) = SUFFIXES.iter().find(|(s, _)| *s == suffix) else {
        return ParsedChord::invalid(token);
    };

    let notes = chord_type
        .intervals()
        .iter()
        .map(|&i| pitch::transpose(root_pc, i as i32))
        .collect();

    ParsedChord {
        token: token.to_string(),
        is_valid: true,
        root_pc: Some(root_pc),
        root_name: root_name.to_string(),
        notes,
        quality: chord_type.quality(),
        chord_type: Some(chord_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_triad() {
        let chord = parse_chord_symbol("C");
        assert!(chord.is_valid);
        assert_eq!(chord.root_pc, Some(0));
        assert_eq!(chord.notes, vec![0, 4, 7]);
        assert_eq!(chord.quality, ChordQuality::Major);
    }

    #[test]
    fn test_flat_root_minor_seventh() {
        let chord = parse_chord_symbol("Bbm7");
        assert!(chord.is_valid);
        assert_eq!(chord.root_pc, Some(10));
        assert_eq!(chord.root_name, "Bb");
        assert_eq!(chord.chord_type, Some(ChordType::MinorSeventh));
        assert_eq!(chord.quality, ChordQuality::Minor);
    }

    #[test]
    fn test_dominant_seventh_type_name() {
        let chord = parse_chord_symbol("G7");
        assert!(chord.is_type(ChordType::DominantSeventh));
        assert_eq!(chord.chord_type.unwrap().name(), "dominant seventh");
    }

    #[test]
    fn test_sus_quality_unknown() {
        let chord = parse_chord_symbol("Dsus4");
        assert!(chord.is_valid);
        assert_eq!(chord.quality, ChordQuality::Unknown);
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(!parse_chord_symbol("Xy").is_valid);
        assert!(!parse_chord_symbol("Cfoo").is_valid);
        assert!(!parse_chord_symbol("").is_valid);
    }

    #[test]
    fn test_half_diminished() {
        let chord = parse_chord_symbol("Bm7b5");
        assert!(chord.is_valid);
        assert_eq!(chord.quality, ChordQuality::Diminished);
        assert_eq!(chord.notes, vec![11, 2, 5, 9]);
    }
}
