//! Resume gap analyzer: match score and missing keywords for a resume against a job description

use clap::Parser;
use colored::Colorize;
use log::{debug, error, info};
use resume_gap_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_gap_analyzer::config::{Config, OutputFormat};
use resume_gap_analyzer::error::{GapAnalyzerError, Result};
use resume_gap_analyzer::input::{InputManager, JobSource, MediaType};
use resume_gap_analyzer::output::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_gap_analyzer::processing::analyzer::{AnalysisEngine, AnalysisOutcome, AnalysisRequest};
use resume_gap_analyzer::processing::stopwords::StopWords;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    debug!("Configuration loaded from {}", config_path.display());

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        let message = failure_message(&e);
        match e {
            GapAnalyzerError::DocumentRead { .. } => eprintln!("{}", message.red().bold()),
            _ => error!("{}", message),
        }
        process::exit(1);
    }
}

/// The single line reported for a failed command
fn failure_message(e: &GapAnalyzerError) -> String {
    match e {
        GapAnalyzerError::DocumentRead { document, reason } => {
            format!("Could not read resume document '{}': {}", document, reason)
        }
        other => format!("Command failed: {}", other),
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            resume_type,
            job,
            job_text,
            detailed,
            output,
            save,
            no_color,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(GapAnalyzerError::InvalidInput)?,
                None => config.output.format.clone(),
            };

            // The stopword corpus is loaded once, before any analysis
            let stopwords = Arc::new(StopWords::load(&config.stopwords)?);
            let engine = AnalysisEngine::new(stopwords, &config);
            let input_manager = InputManager::new();

            let declared = match resume_type.as_deref() {
                Some(declared) => match MediaType::from_declaration(declared) {
                    MediaType::Unknown => {
                        return Err(GapAnalyzerError::UnsupportedFormat(format!(
                            "Unknown resume type: {}",
                            declared
                        )))
                    }
                    media_type => Some(media_type),
                },
                None => None,
            };

            let resume = match &resume {
                Some(path) => {
                    if declared.is_none() {
                        cli::validate_file_extension(path, &["pdf", "docx"])
                            .map_err(|e| GapAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
                    }
                    Some(input_manager.load_resume(path, declared).await?)
                }
                None => None,
            };

            let job_source = match (job, job_text) {
                (Some(path), _) if path == Path::new("-") => Some(JobSource::Stdin),
                (Some(path), _) => {
                    cli::validate_file_extension(&path, &["txt", "md", "markdown"])
                        .map_err(|e| GapAnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
                    Some(JobSource::File(path))
                }
                (None, Some(text)) => Some(JobSource::Inline(text)),
                (None, None) => None,
            };

            let job_description = match &job_source {
                Some(source) => Some(input_manager.load_job_description(source).await?),
                None => None,
            };

            let request = AnalysisRequest {
                resume,
                job_description,
                job_source: job_source.as_ref().map(JobSource::label),
            };

            match engine.handle(request)? {
                AnalysisOutcome::MissingInput { warning } => {
                    println!("{} {}", "⚠️".yellow(), warning.yellow());
                }
                AnalysisOutcome::Completed(report) => {
                    let generator = ReportGenerator::with_options(
                        config.output.color_output && !no_color,
                        detailed || config.output.detailed,
                        config.output.pretty_json,
                        true,
                        true,
                    );
                    let rendered = generator.generate_report(&report, &output_format)?;
                    println!("{}", rendered);

                    if let Some(save_path) = save {
                        // Saved console reports never carry color codes
                        let content = if matches!(output_format, OutputFormat::Console) {
                            ReportGenerator::with_options(false, detailed || config.output.detailed, true, true, true)
                                .generate_report(&report, &output_format)?
                        } else {
                            rendered
                        };
                        let save_path =
                            resolve_save_path(save_path, &output_format, report.metadata.resume_file.as_deref());
                        save_report_to_file(&content, &save_path)?;
                        info!("Report saved to {}", save_path.display());
                        println!("💾 Report saved to {}", save_path.display());
                    }
                }
            }
        }

        Commands::Stopwords { list } => {
            let stopwords = StopWords::load(&config.stopwords)?;
            println!("📚 Stopword corpus: {}", stopwords.source());
            println!("Words: {}", stopwords.len());
            if list {
                for word in stopwords.sorted() {
                    println!("  {}", word);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| GapAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }
            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ {} = {}", key, value);
            }
        },
    }

    Ok(())
}

/// A directory save target gets a generated file name inside it
fn resolve_save_path(save_path: PathBuf, format: &OutputFormat, resume_name: Option<&str>) -> PathBuf {
    if save_path.is_dir() {
        save_path.join(suggest_filename(format, resume_name.unwrap_or("resume"), true))
    } else {
        save_path
    }
}
