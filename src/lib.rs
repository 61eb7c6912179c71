//! Chord-to-Scale Recommendation System
//!
//! A deterministic harmonic-analysis pipeline that turns a chord-progression
//! string into a ranked list of scales a guitarist can improvise with.

pub mod analysis;
pub mod chord;
pub mod config;
pub mod error;
pub mod passes;
pub mod pitch;
pub mod progression;
pub mod qa;
pub mod scales;

pub use analysis::{ProgressionAnalysis, ScaleRecommendation};
pub use config::Config;
pub use error::{Result as ScaleErrorResult, ScaleError};
pub use progression::ProgressionState;

use std::path::Path;

/// Main analysis pipeline for chord-to-scale recommendation
pub struct Chord2Scale {
    config: Config,
}

impl Chord2Scale {
    /// Create a new analyzer with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Analyze a progression string and return the completed analysis.
    /// A parse failure (no resolvable chords) is an error; an analysis
    /// with zero recommendations is the "no match" outcome.
    pub fn analyze(&self, input: &str) -> ScaleErrorResult<ProgressionAnalysis> {
        let mut state = ProgressionState::load(input, &self.config);
        self.run_pipeline(&mut state)?;
        Ok(ProgressionAnalysis::from_state(&state))
    }

    /// Analyze a progression and export the report plus QA artifacts
    pub fn process<P: AsRef<Path>>(
        &self,
        input: &str,
        output_dir: P,
    ) -> ScaleErrorResult<ProgressionAnalysis> {
        let mut state = ProgressionState::load(input, &self.config);

        self.run_pipeline(&mut state)?;
        self.export_results(&state, output_dir.as_ref())?;

        Ok(ProgressionAnalysis::from_state(&state))
    }

    /// Execute the complete multi-pass pipeline
    fn run_pipeline(&self, state: &mut ProgressionState) -> ScaleErrorResult<()> {
        // Pass 0: Chord Parsing & Validation
        passes::pass_0::run(state, &self.config)?;

        // Pass 1: Tonic Detection
        passes::pass_1::run(state, &self.config)?;

        // Pass 2: Modal Signature Detection
        passes::pass_2::run(state, &self.config)?;

        // Pass 3: Blues Classification
        passes::pass_3::run(state, &self.config)?;

        // Pass 4: Candidate Scoring
        passes::pass_4::run(state, &self.config)?;

        // Pass 5: Filter & Rank
        passes::pass_5::run(state, &self.config)?;

        // Pass 6: Post-processing Overrides
        passes::pass_6::run(state, &self.config)?;

        // Pass 7: Result Building
        passes::pass_7::run(state, &self.config)?;

        Ok(())
    }

    /// Export report and QA artifacts
    fn export_results(&self, state: &ProgressionState, output_dir: &Path) -> ScaleErrorResult<()> {
        analysis::export_analysis(state, output_dir)?;
        qa::generate_artifacts(state, output_dir)?;
        Ok(())
    }
}

/// Validate input and configuration before running the pipeline
pub fn validate_input(input: &str, min_chords: usize, config: &Config) -> ScaleErrorResult<()> {
    let resolvable = input
        .trim()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .filter(|t| chord::parse_chord_symbol(t).is_valid)
        .count();
    if resolvable < min_chords {
        return Err(ScaleError::InputValidationError(format!(
            "expected at least {} resolvable chords, found {}",
            min_chords, resolvable
        )));
    }

    config::validate_config(config)
        .map_err(|e| ScaleError::ConfigValidationFailed(e.to_string()))?;

    Ok(())
}
