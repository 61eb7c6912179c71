//! Pitch-class primitives: note-name parsing, spelling, transposition

use std::collections::BTreeSet;

/// Semitone offsets of the natural note letters C..B
const LETTER_CHROMA: [(char, i32); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];

/// Canonical spelling per pitch class, following circle-of-fifths convention
/// (flats for the flat keys, F# over Gb)
const CANONICAL_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// Parse a note name (letter plus optional accidentals) into a pitch class 0-11
pub fn note_chroma(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let base = LETTER_CHROMA
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, c)| *c)?;

    let mut offset = 0i32;
    for c in chars {
        match c {
            '#' => offset += 1,
            'b' => offset -= 1,
            _ => return None,
        }
    }

    Some(((base + offset).rem_euclid(12)) as u8)
}

/// Canonical spelling for a pitch class
pub fn pitch_name(pc: u8) -> &'static str {
    CANONICAL_NAMES[(pc % 12) as usize]
}

/// Transpose a pitch class by a signed number of semitones
pub fn transpose(pc: u8, semitones: i32) -> u8 {
    (pc as i32 + semitones).rem_euclid(12) as u8
}

/// Canonical pitch-class-set key for deduplication: sorted, comma-joined
/// chromas. Absolute, not root-relative, so enharmonic spellings collapse.
pub fn pitch_class_set_key(pcs: &BTreeSet<u8>) -> String {
    pcs.iter()
        .map(|pc| pc.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_chroma_naturals() {
        assert_eq!(note_chroma("C"), Some(0));
        assert_eq!(note_chroma("D"), Some(2));
        assert_eq!(note_chroma("B"), Some(11));
    }

    #[test]
    fn test_note_chroma_accidentals() {
        assert_eq!(note_chroma("F#"), Some(6));
        assert_eq!(note_chroma("Bb"), Some(10));
        assert_eq!(note_chroma("Cb"), Some(11));
        assert_eq!(note_chroma("B#"), Some(0));
        assert_eq!(note_chroma("Fbb"), Some(3));
        assert_eq!(note_chroma("G##"), Some(9));
    }

    #[test]
    fn test_note_chroma_invalid() {
        assert_eq!(note_chroma("H"), None);
        assert_eq!(note_chroma(""), None);
        assert_eq!(note_chroma("C%"), None);
    }

    #[test]
    fn test_transpose_wraps() {
        assert_eq!(transpose(0, -7), 5);
        assert_eq!(transpose(11, 1), 0);
        assert_eq!(transpose(7, 5), 0);
    }

    #[test]
    fn test_pitch_class_set_key() {
        let pcs: BTreeSet<u8> = [7, 0, 4].into_iter().collect();
        assert_eq!(pitch_class_set_key(&pcs), "0,4,7");
    }
}
