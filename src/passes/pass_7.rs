//! Pass 7: Result Building

use crate::analysis::ScaleRecommendation;
use crate::config::Config;
use crate::error::Result as ScaleErrorResult;
use crate::progression::ProgressionState;

pub fn run(state: &mut ProgressionState, config: &Config) -> ScaleErrorResult<()> {
    println!("Pass 7: Result Building");

    state.recommendations = state
        .ranked
        .iter()
        .take(config.ranking.max_results)
        .map(|c| ScaleRecommendation {
            display_name: format!("{} {}", c.tonic.name, c.kind.display_suffix()),
            scale_type: c.kind.type_key().to_string(),
            tonic: c.tonic.name.clone(),
            coverage: c.coverage,
        })
        .collect();

    if state.recommendations.is_empty() {
        // Completed analysis with no match; distinct from a parse failure
        println!("  No scale matched the progression");
    } else {
        println!("  {} recommendation(s)", state.recommendations.len());
    }

    Ok(())
}
