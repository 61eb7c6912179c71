//! QA artifacts generation

use crate::progression::ProgressionState;
use crate::ScaleError;
use plotters::prelude::*;
use std::fmt::Write as _;
use std::fs;

/// Generate QA artifacts (score chart, statistics report, candidate table)
pub fn generate_artifacts(
    state: &ProgressionState,
    output_dir: &std::path::Path,
) -> crate::ScaleErrorResult<()> {
    let qa_dir = output_dir.join("qa");
    fs::create_dir_all(&qa_dir)?;

    println!("Generating QA artifacts...");

    if state.config.qa.generate_images
        && state
            .config
            .qa
            .image_formats
            .iter()
            .any(|f| f == "png")
    {
        generate_score_chart(state, &qa_dir)?;
    }
    generate_statistics_report(state, &qa_dir)?;
    if state.config.qa.save_candidate_table {
        generate_candidate_table(state, &qa_dir)?;
    }

    println!("QA artifacts generated in {}", qa_dir.display());
    Ok(())
}

/// Generate a bar chart of candidate composite scores
fn generate_score_chart(
    state: &ProgressionState,
    output_dir: &std::path::Path,
) -> crate::ScaleErrorResult<()> {
    if state.candidates.is_empty() {
        return Ok(());
    }

    let path = output_dir.join("candidate_scores.png");
    let [width, height] = state.config.qa.chart_resolution;
    let root = BitMapBackend::new(&path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| {
        ScaleError::QaGenerationError(format!("Failed to fill plot background: {:?}", e))
    })?;

    let max_score = state
        .candidates
        .iter()
        .map(|c| c.score)
        .fold(0.0f32, f32::max)
        .max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Candidate composite scores", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(120)
        .y_label_area_size(50)
        .build_cartesian_2d(0i32..state.candidates.len() as i32, 0.0f32..max_score * 1.1)
        .map_err(|e| ScaleError::QaGenerationError(format!("Failed to build chart: {:?}", e)))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(state.candidates.len())
        .x_label_formatter(&|x| {
            state
                .candidates
                .get(*x as usize)
                .map(|c| c.kind.type_key().to_string())
                .unwrap_or_default()
        })
        .y_desc("composite score")
        .draw()
        .map_err(|e| ScaleError::QaGenerationError(format!("Failed to draw mesh: {:?}", e)))?;

    chart
        .draw_series(state.candidates.iter().enumerate().map(|(i, c)| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, c.score)],
                BLUE.mix(0.5).filled(),
            )
        }))
        .map_err(|e| ScaleError::QaGenerationError(format!("Failed to draw bars: {:?}", e)))?;

    root.present().map_err(|e| {
        ScaleError::QaGenerationError(format!("Failed to write chart image: {:?}", e))
    })?;

    Ok(())
}

/// Generate a plain-text statistics report
fn generate_statistics_report(
    state: &ProgressionState,
    output_dir: &std::path::Path,
) -> crate::ScaleErrorResult<()> {
    let mut report = String::new();

    let _ = writeln!(report, "Chord-to-Scale Analysis Statistics");
    let _ = writeln!(report, "==================================");
    let _ = writeln!(report, "Input: {}", state.input);
    let _ = writeln!(
        report,
        "Tokens: {} ({} resolved)",
        state.tokens.len(),
        state.valid_chords().len()
    );
    let _ = writeln!(
        report,
        "Input pitch classes: {}",
        state.input_pcs.len()
    );
    if let Some(tonic) = &state.tonic {
        let _ = writeln!(report, "Detected tonic: {}", tonic.name);
    }
    let _ = writeln!(report, "Blues classified: {}", state.is_blues);
    let _ = writeln!(report, "Candidates scored: {}", state.candidates.len());
    let _ = writeln!(report, "Candidates ranked: {}", state.ranked.len());
    let _ = writeln!(report);
    let _ = writeln!(report, "Recommendations:");
    if state.recommendations.is_empty() {
        let _ = writeln!(report, "  (no match)");
    }
    for (i, rec) in state.recommendations.iter().enumerate() {
        let _ = writeln!(
            report,
            "  {}. {} (coverage {:.0}%)",
            i + 1,
            rec.display_name,
            rec.coverage * 100.0
        );
    }

    fs::write(output_dir.join("statistics.txt"), report)?;
    Ok(())
}

/// Generate a CSV table of all scored candidates
fn generate_candidate_table(
    state: &ProgressionState,
    output_dir: &std::path::Path,
) -> crate::ScaleErrorResult<()> {
    let mut csv = String::from("scale,tonic,tier,coverage,scale_relevance,root_coverage,score\n");
    for c in &state.candidates {
        let _ = writeln!(
            csv,
            "{},{},{},{:.4},{:.4},{:.4},{:.4}",
            c.kind.type_key(),
            c.tonic.name,
            c.kind.tier(),
            c.coverage,
            c.scale_relevance,
            c.root_coverage,
            c.score
        );
    }

    fs::write(output_dir.join("candidates.csv"), csv)?;
    Ok(())
}
