use chord2scale::{validate_input, Chord2Scale, Config};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chord-to-Scale Recommendation System
#[derive(Parser)]
#[command(name = "chord2scale")]
#[command(about = "Recommend improvisation scales for a chord progression")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a chord progression and print ranked scale recommendations
    Analyze {
        /// Chord progression, e.g. "Dm7 G7 Cmaj7"
        progression: String,

        /// Output directory for the report and QA artifacts
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Custom configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum number of resolvable chords required
        #[arg(long, default_value_t = 2)]
        min_chords: usize,

        /// Print the analysis as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Quiet output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config: PathBuf,
    },
    /// Show default configuration
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            progression,
            output,
            config,
            min_chords,
            json,
            verbose,
            quiet,
        } => {
            if verbose && quiet {
                anyhow::bail!("Cannot specify both --verbose and --quiet");
            }

            // Load configuration
            let config = if let Some(config_path) = config {
                chord2scale::config::load_config(config_path)?
            } else {
                Config::default()
            };

            // Validate input (the >= 2 resolvable chords rule lives here,
            // not in the core)
            validate_input(&progression, min_chords, &config)?;

            // Create analyzer
            let analyzer = Chord2Scale::new(config);

            if !quiet {
                println!("Analyzing \"{}\"...", progression);
            }

            let analysis = analyzer.process(&progression, &output)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else if analysis.is_no_match() {
                println!("No whitelisted scale matched this progression closely enough.");
                println!("Try a shorter excerpt, or check the progression for unusual chords.");
            } else if !quiet {
                if let Some(tonic) = &analysis.tonic {
                    println!(
                        "Tonal center: {}{}",
                        tonic.name,
                        if analysis.is_blues { " (blues)" } else { "" }
                    );
                }
                for (i, rec) in analysis.recommendations.iter().enumerate() {
                    println!(
                        "  {}. {} ({:.0}% of input notes covered)",
                        i + 1,
                        rec.display_name,
                        rec.coverage * 100.0
                    );
                }
            }

            if !quiet {
                println!("Results saved to {}", output.display());
            }
        }
        Commands::ValidateConfig { config } => {
            let config = chord2scale::config::load_config(config)?;
            println!("Configuration is valid");
            if let Ok(json) = serde_json::to_string_pretty(&config) {
                println!("{}", json);
            }
        }
        Commands::ShowConfig => {
            let config = Config::default();
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
    }

    Ok(())
}
