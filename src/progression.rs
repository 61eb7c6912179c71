//! Progression state threaded through the analysis pipeline

use crate::analysis::{ScaleRecommendation, ScoredCandidate, Tonic};
use crate::chord::ParsedChord;
use crate::config::Config;
use crate::scales::ScaleKind;
use std::collections::{BTreeSet, HashMap};

/// Per-call state containing the parsed progression and all intermediate
/// pipeline products. Never shared across calls.
#[derive(Debug, Clone)]
pub struct ProgressionState {
    /// Raw input string
    pub input: String,
    /// Non-empty tokens split on whitespace/commas
    pub tokens: Vec<String>,
    /// Configuration reference
    pub config: Config,

    // Pass 0: Chord parsing
    /// One chord record per input token
    pub chords: Vec<ParsedChord>,
    /// Union of all valid-chord note pitch classes
    pub input_pcs: BTreeSet<u8>,
    /// Distinct chord-root pitch classes in input order
    pub root_pcs: Vec<u8>,

    // Pass 1: Tonic detection
    /// Detected tonal center
    pub tonic: Option<Tonic>,

    // Pass 2: Modal signature detection
    /// Per-scale score bonuses from modal fingerprints
    pub modal_bonuses: HashMap<ScaleKind, f32>,

    // Pass 3: Blues classification
    /// Progression classified as blues
    pub is_blues: bool,

    // Pass 4: Candidate scoring
    /// Unfiltered candidate pool (tonic x whitelist)
    pub candidates: Vec<ScoredCandidate>,

    // Passes 5-6: Filtering, ranking, overrides
    /// Filtered and ranked candidates
    pub ranked: Vec<ScoredCandidate>,

    // Pass 7: Result building
    /// Final capped recommendation list
    pub recommendations: Vec<ScaleRecommendation>,
}

impl ProgressionState {
    /// Tokenize the input and create initial state
    pub fn load(input: &str, config: &Config) -> Self {
        let tokens = input
            .trim()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect();

        ProgressionState {
            input: input.to_string(),
            tokens,
            config: config.clone(),
            chords: Vec::new(),
            input_pcs: BTreeSet::new(),
            root_pcs: Vec::new(),
            tonic: None,
            modal_bonuses: HashMap::new(),
            is_blues: false,
            candidates: Vec::new(),
            ranked: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Valid chords, in input order
    pub fn valid_chords(&self) -> Vec<&ParsedChord> {
        self.chords.iter().filter(|c| c.is_valid).collect()
    }
}
