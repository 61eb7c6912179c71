//! Configuration system for the chord-to-scale analyzer

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: String,
    pub scoring: ScoringConfig,
    pub modal: ModalConfig,
    pub filter: FilterConfig,
    pub ranking: RankingConfig,
    pub qa: QaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            scoring: ScoringConfig::default(),
            modal: ModalConfig::default(),
            filter: FilterConfig::default(),
            ranking: RankingConfig::default(),
            qa: QaConfig::default(),
        }
    }
}

/// Composite-score weights and fixed bonuses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of input-note coverage
    pub coverage_weight: f32,
    /// Weight of scale relevance (scale notes actually used)
    pub relevance_weight: f32,
    /// Weight of chord-root coverage
    pub root_weight: f32,
    /// Bonus when the candidate tonic is the primary detected tonic
    pub first_tonic_bonus: f32,
    /// Tie-break preference for Ionian/Aeolian as default scales
    pub default_scale_bonus: f32,
    /// Mixolydian bonus when the tonic chord carries a minor seventh
    pub dominant_mixolydian_bonus: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            coverage_weight: 0.4,
            relevance_weight: 0.3,
            root_weight: 0.3,
            first_tonic_bonus: 0.05,
            default_scale_bonus: 0.01,
            dominant_mixolydian_bonus: 0.02,
        }
    }
}

/// Modal-signature bonus values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Minor tonic with flat-VII major chord and no flat-VI
    pub dorian_bonus: f32,
    /// Minor tonic with flat-II major chord
    pub phrygian_bonus: f32,
    /// Major tonic with major-II chord
    pub lydian_bonus: f32,
    /// Major tonic with flat-VII major chord
    pub mixolydian_bonus: f32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            dorian_bonus: 0.15,
            phrygian_bonus: 0.15,
            lydian_bonus: 0.15,
            mixolydian_bonus: 0.10,
        }
    }
}

/// Two-pass filtering thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Strict pass: minimum scale relevance for pentatonic/blues scales
    pub strict_small_relevance_min: f32,
    /// Strict pass: minimum coverage for seven-note scales
    pub strict_coverage_min: f32,
    /// Relaxed pass: minimum root coverage
    pub relaxed_root_min: f32,
    /// Relaxed pass: minimum scale relevance for pentatonic/blues scales
    pub relaxed_small_relevance_min: f32,
    /// Relaxed pass: minimum coverage for seven-note scales
    pub relaxed_coverage_min: f32,
    /// Score difference below which candidates are treated as tied
    pub score_tolerance: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strict_small_relevance_min: 0.8,
            strict_coverage_min: 0.7,
            relaxed_root_min: 0.75,
            relaxed_small_relevance_min: 0.6,
            relaxed_coverage_min: 0.6,
            score_tolerance: 0.001,
        }
    }
}

/// Ranking caps, cutoffs and result shaping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum diatonic modes sharing one absolute pitch-class set
    pub mode_set_cap: usize,
    /// Maximum diatonic modes sharing one tonic
    pub mode_tonic_cap: usize,
    /// Drop candidates trailing the top score by more than this
    pub score_gap_max: f32,
    /// Minimum scale relevance for an injected pentatonic companion
    pub companion_relevance_min: f32,
    /// Hard limit on returned recommendations
    pub max_results: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            mode_set_cap: 2,
            mode_tonic_cap: 2,
            score_gap_max: 0.10,
            companion_relevance_min: 0.6,
            max_results: 3,
        }
    }
}

/// QA artifacts configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    pub generate_images: bool,
    pub image_formats: Vec<String>,
    pub save_candidate_table: bool,
    pub chart_resolution: [u32; 2],
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            generate_images: true,
            image_formats: vec!["png".to_string()],
            save_candidate_table: true,
            chart_resolution: [900, 600],
        }
    }
}

/// Validate configuration parameters
pub fn validate_config(config: &Config) -> anyhow::Result<()> {
    // Composite weights must form a convex combination
    let total = config.scoring.coverage_weight
        + config.scoring.relevance_weight
        + config.scoring.root_weight;
    if (total - 1.0).abs() > 0.01 {
        anyhow::bail!("scoring weights must sum to 1.0 (got {:.3})", total);
    }

    let fractions = [
        config.filter.strict_small_relevance_min,
        config.filter.strict_coverage_min,
        config.filter.relaxed_root_min,
        config.filter.relaxed_small_relevance_min,
        config.filter.relaxed_coverage_min,
        config.ranking.companion_relevance_min,
    ];
    for f in fractions {
        if !(0.0..=1.0).contains(&f) {
            anyhow::bail!("filter thresholds must lie in [0, 1] (got {})", f);
        }
    }

    if config.filter.relaxed_root_min > 1.0 {
        anyhow::bail!("relaxed_root_min must not exceed strict root requirement");
    }

    if config.filter.score_tolerance <= 0.0 {
        anyhow::bail!("score_tolerance must be positive");
    }

    if config.ranking.max_results == 0 {
        anyhow::bail!("max_results must be at least 1");
    }

    if config.ranking.mode_set_cap == 0 || config.ranking.mode_tonic_cap == 0 {
        anyhow::bail!("mode caps must be at least 1");
    }

    Ok(())
}

/// Load configuration from JSON file
pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Save configuration to JSON file
pub fn save_config<P: AsRef<std::path::Path>>(config: &Config, path: P) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
