//! Scale whitelist and interval tables
//!
//! The 13 guitarist-relevant scales are a closed set: the scoring, capping
//! and override rules all assume exactly these entries.

use crate::pitch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Major/minor flavor of a scale, used to pick pentatonic companions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleFamily {
    Major,
    Minor,
}

/// The whitelisted scale kinds
///
/// Tier 1 = the seven diatonic modes, tier 2 = pentatonics,
/// tier 3 = harmonic/melodic minor, tier 4 = blues scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleKind {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    MajorPentatonic,
    MinorPentatonic,
    HarmonicMinor,
    MelodicMinor,
    MajorBlues,
    MinorBlues,
}

/// All whitelist entries in canonical order (modes, pentatonics,
/// harmonic/melodic minor, blues)
pub const WHITELIST: [ScaleKind; 13] = [
    ScaleKind::Ionian,
    ScaleKind::Dorian,
    ScaleKind::Phrygian,
    ScaleKind::Lydian,
    ScaleKind::Mixolydian,
    ScaleKind::Aeolian,
    ScaleKind::Locrian,
    ScaleKind::MajorPentatonic,
    ScaleKind::MinorPentatonic,
    ScaleKind::HarmonicMinor,
    ScaleKind::MelodicMinor,
    ScaleKind::MajorBlues,
    ScaleKind::MinorBlues,
];

impl ScaleKind {
    /// Canonical scale name used by the scale lookup
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ScaleKind::Ionian => "major",
            ScaleKind::Dorian => "dorian",
            ScaleKind::Phrygian => "phrygian",
            ScaleKind::Lydian => "lydian",
            ScaleKind::Mixolydian => "mixolydian",
            ScaleKind::Aeolian => "minor",
            ScaleKind::Locrian => "locrian",
            ScaleKind::MajorPentatonic => "major pentatonic",
            ScaleKind::MinorPentatonic => "minor pentatonic",
            ScaleKind::HarmonicMinor => "harmonic minor",
            ScaleKind::MelodicMinor => "melodic minor",
            ScaleKind::MajorBlues => "major blues",
            ScaleKind::MinorBlues => "minor blues",
        }
    }

    /// Lookup key consumed by downstream theory/song catalogues
    pub fn type_key(&self) -> &'static str {
        match self {
            ScaleKind::Ionian => "ionian",
            ScaleKind::Aeolian => "aeolian",
            _ => self.canonical_name(),
        }
    }

    /// Suffix appended after the tonic in display names
    pub fn display_suffix(&self) -> &'static str {
        match self {
            ScaleKind::Ionian => "Ionian (Major Scale)",
            ScaleKind::Dorian => "Dorian",
            ScaleKind::Phrygian => "Phrygian",
            ScaleKind::Lydian => "Lydian",
            ScaleKind::Mixolydian => "Mixolydian",
            ScaleKind::Aeolian => "Aeolian (Natural Minor)",
            ScaleKind::Locrian => "Locrian",
            ScaleKind::MajorPentatonic => "Major Pentatonic",
            ScaleKind::MinorPentatonic => "Minor Pentatonic",
            ScaleKind::HarmonicMinor => "Harmonic Minor",
            ScaleKind::MelodicMinor => "Melodic Minor",
            ScaleKind::MajorBlues => "Major Blues",
            ScaleKind::MinorBlues => "Minor Blues",
        }
    }

    /// Priority tier (1 = diatonic modes .. 4 = blues scales)
    pub fn tier(&self) -> u8 {
        match self {
            ScaleKind::Ionian
            | ScaleKind::Dorian
            | ScaleKind::Phrygian
            | ScaleKind::Lydian
            | ScaleKind::Mixolydian
            | ScaleKind::Aeolian
            | ScaleKind::Locrian => 1,
            ScaleKind::MajorPentatonic | ScaleKind::MinorPentatonic => 2,
            ScaleKind::HarmonicMinor | ScaleKind::MelodicMinor => 3,
            ScaleKind::MajorBlues | ScaleKind::MinorBlues => 4,
        }
    }

    /// Major or minor family
    pub fn family(&self) -> ScaleFamily {
        match self {
            ScaleKind::Ionian
            | ScaleKind::Lydian
            | ScaleKind::Mixolydian
            | ScaleKind::MajorPentatonic
            | ScaleKind::MajorBlues => ScaleFamily::Major,
            ScaleKind::Dorian
            | ScaleKind::Phrygian
            | ScaleKind::Aeolian
            | ScaleKind::Locrian
            | ScaleKind::MinorPentatonic
            | ScaleKind::HarmonicMinor
            | ScaleKind::MelodicMinor
            | ScaleKind::MinorBlues => ScaleFamily::Minor,
        }
    }

    /// Intervals in semitones above the tonic
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ScaleKind::Ionian => &[0, 2, 4, 5, 7, 9, 11],
            ScaleKind::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ScaleKind::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            ScaleKind::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            ScaleKind::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            ScaleKind::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            ScaleKind::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            ScaleKind::MajorPentatonic => &[0, 2, 4, 7, 9],
            ScaleKind::MinorPentatonic => &[0, 3, 5, 7, 10],
            ScaleKind::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleKind::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            ScaleKind::MajorBlues => &[0, 2, 3, 4, 7, 9],
            ScaleKind::MinorBlues => &[0, 3, 5, 6, 7, 10],
        }
    }

    /// Pentatonic and blues scales use relevance thresholds instead of
    /// coverage thresholds during filtering
    pub fn is_small(&self) -> bool {
        self.tier() == 2 || self.tier() == 4
    }
}

/// Pitch classes of a scale built on the given tonic
pub fn scale_pitch_classes(tonic_pc: u8, kind: ScaleKind) -> BTreeSet<u8> {
    kind.intervals()
        .iter()
        .map(|&i| pitch::transpose(tonic_pc, i as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_is_complete() {
        assert_eq!(WHITELIST.len(), 13);
        assert_eq!(WHITELIST.iter().filter(|k| k.tier() == 1).count(), 7);
        assert_eq!(WHITELIST.iter().filter(|k| k.tier() == 2).count(), 2);
        assert_eq!(WHITELIST.iter().filter(|k| k.tier() == 3).count(), 2);
        assert_eq!(WHITELIST.iter().filter(|k| k.tier() == 4).count(), 2);
    }

    #[test]
    fn test_c_major_pitch_classes() {
        let pcs = scale_pitch_classes(0, ScaleKind::Ionian);
        let expected: BTreeSet<u8> = [0, 2, 4, 5, 7, 9, 11].into_iter().collect();
        assert_eq!(pcs, expected);
    }

    #[test]
    fn test_a_minor_pentatonic() {
        let pcs = scale_pitch_classes(9, ScaleKind::MinorPentatonic);
        let expected: BTreeSet<u8> = [9, 0, 2, 4, 7].into_iter().collect();
        assert_eq!(pcs, expected);
    }

    #[test]
    fn test_relative_modes_share_pitch_classes() {
        // A Aeolian and C Ionian are the same absolute set
        let ionian = scale_pitch_classes(0, ScaleKind::Ionian);
        let aeolian = scale_pitch_classes(9, ScaleKind::Aeolian);
        assert_eq!(ionian, aeolian);
    }

    #[test]
    fn test_small_scale_flags() {
        assert!(ScaleKind::MajorPentatonic.is_small());
        assert!(ScaleKind::MinorBlues.is_small());
        assert!(!ScaleKind::Dorian.is_small());
        assert!(!ScaleKind::HarmonicMinor.is_small());
    }
}
