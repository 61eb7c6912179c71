//! Analysis data types and report export

use crate::progression::ProgressionState;
use crate::scales::ScaleKind;
use serde::{Deserialize, Serialize};

/// A detected tonal center: pitch class plus deterministic spelling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tonic {
    /// Pitch class 0-11
    pub pc: u8,
    /// Spelling used for display (e.g. "Bb")
    pub name: String,
}

/// A scored (tonic, whitelist entry) candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub kind: ScaleKind,
    pub tonic: Tonic,
    /// Fraction of input pitch classes explained by the scale
    pub coverage: f32,
    /// Fraction of the scale's pitch classes actually used by the input
    pub scale_relevance: f32,
    /// Fraction of chord roots diatonic to the scale
    pub root_coverage: f32,
    /// Candidate tonic equals the primary detected tonic
    pub is_first_tonic: bool,
    /// Composite score including all bonuses
    pub score: f32,
}

/// A single scale recommendation in the final result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleRecommendation {
    /// "<tonic> <display suffix>", e.g. "A Aeolian (Natural Minor)"
    pub display_name: String,
    /// Key into downstream theory/song catalogues, e.g. "aeolian"
    pub scale_type: String,
    /// Tonic spelling, e.g. "A"
    pub tonic: String,
    /// Fraction of input notes covered by the scale
    pub coverage: f32,
}

/// Completed analysis of one progression
///
/// An empty recommendation list is a valid "no match" outcome; parse
/// failures never produce this structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionAnalysis {
    pub version: String,
    pub input: String,
    pub tonic: Option<Tonic>,
    pub is_blues: bool,
    pub chord_count: usize,
    pub valid_chord_count: usize,
    pub recommendations: Vec<ScaleRecommendation>,
}

impl ProgressionAnalysis {
    /// Build the public analysis result from pipeline state
    pub fn from_state(state: &ProgressionState) -> Self {
        ProgressionAnalysis {
            version: env!("CARGO_PKG_VERSION").to_string(),
            input: state.input.clone(),
            tonic: state.tonic.clone(),
            is_blues: state.is_blues,
            chord_count: state.chords.len(),
            valid_chord_count: state.valid_chords().len(),
            recommendations: state.recommendations.clone(),
        }
    }

    /// True when the analysis completed but nothing fit well enough
    pub fn is_no_match(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// Export analysis results to JSON
pub fn export_analysis(
    state: &ProgressionState,
    output_dir: &std::path::Path,
) -> crate::ScaleErrorResult<()> {
    std::fs::create_dir_all(output_dir)?;

    let analysis_path = output_dir.join("analysis.json");
    let report = build_analysis_report(state);
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&analysis_path, json)?;

    println!("Exported analysis results to {}", analysis_path.display());
    Ok(())
}

/// Build the full report structure, including intermediate evidence
fn build_analysis_report(state: &ProgressionState) -> AnalysisReport {
    AnalysisReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        input: state.input.clone(),
        chords: state
            .chords
            .iter()
            .map(|c| ChordSummary {
                token: c.token.clone(),
                is_valid: c.is_valid,
                root: if c.is_valid {
                    Some(c.root_name.clone())
                } else {
                    None
                },
                quality: c.quality.name().to_string(),
                chord_type: c.chord_type.map(|t| t.name().to_string()),
            })
            .collect(),
        input_pitch_classes: state.input_pcs.iter().copied().collect(),
        chord_root_pitch_classes: state.root_pcs.clone(),
        tonic: state.tonic.clone(),
        is_blues: state.is_blues,
        candidates: state
            .candidates
            .iter()
            .map(CandidateSummary::from)
            .collect(),
        ranked: state.ranked.iter().map(CandidateSummary::from).collect(),
        recommendations: state.recommendations.clone(),
    }
}

/// Overall analysis report structure
#[derive(Debug, serde::Serialize)]
struct AnalysisReport {
    version: String,
    input: String,
    chords: Vec<ChordSummary>,
    input_pitch_classes: Vec<u8>,
    chord_root_pitch_classes: Vec<u8>,
    tonic: Option<Tonic>,
    is_blues: bool,
    candidates: Vec<CandidateSummary>,
    ranked: Vec<CandidateSummary>,
    recommendations: Vec<ScaleRecommendation>,
}

/// Per-token parse summary
#[derive(Debug, serde::Serialize)]
struct ChordSummary {
    token: String,
    is_valid: bool,
    root: Option<String>,
    quality: String,
    chord_type: Option<String>,
}

/// Per-candidate scoring summary
#[derive(Debug, serde::Serialize)]
struct CandidateSummary {
    scale: String,
    tonic: String,
    tier: u8,
    coverage: f32,
    scale_relevance: f32,
    root_coverage: f32,
    score: f32,
}

impl From<&ScoredCandidate> for CandidateSummary {
    fn from(c: &ScoredCandidate) -> Self {
        CandidateSummary {
            scale: c.kind.type_key().to_string(),
            tonic: c.tonic.name.clone(),
            tier: c.kind.tier(),
            coverage: c.coverage,
            scale_relevance: c.scale_relevance,
            root_coverage: c.root_coverage,
            score: c.score,
        }
    }
}
