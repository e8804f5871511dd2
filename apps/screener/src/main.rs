//! Batch screening CLI: `screener <jd.txt> <resume.txt>...`
//!
//! Reads a job description and one or more plain-text resumes, runs the
//! extraction-and-scoring pipeline with default weights, and prints a
//! ranked JSON report to stdout. Document decoding (PDF/DOCX) is a
//! collaborator's job; this driver takes already-extracted text.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener::llm_client::GroqClient;
use screener::parser::SkillVocabulary;
use screener::scoring::{HashEmbedder, Weights};
use screener::{Config, Pipeline, ResumeDocument};

/// Screen plain-text resumes against a job description and print a ranked
/// JSON report.
#[derive(Debug, Parser)]
#[command(name = "screener", version)]
struct Cli {
    /// Path to the job description text file.
    jd: PathBuf,

    /// Paths to one or more resume text files.
    #[arg(required = true)]
    resumes: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let jd_text = std::fs::read_to_string(&cli.jd)
        .with_context(|| format!("failed to read job description '{}'", cli.jd.display()))?;

    let mut documents = Vec::with_capacity(cli.resumes.len());
    for path in &cli.resumes {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read resume '{}'", path.display()))?;
        documents.push(ResumeDocument {
            filename: display_filename(path),
            text,
        });
    }

    let generator = GroqClient::new(&config)?;
    info!("LLM client initialized (model: {})", generator.model());

    let pipeline = Pipeline::new(
        Arc::new(generator),
        Arc::new(HashEmbedder::default()),
        SkillVocabulary::default(),
    );

    let job = pipeline.parse_jd(&jd_text);
    info!(
        required_skills = job.skills.len(),
        years_required = job.years_required,
        "job description parsed"
    );

    let ranked = pipeline.screen(&job, &documents, &Weights::default()).await?;
    info!(candidates = ranked.len(), "screening complete");

    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}

/// The upload-style filename fed to the name-extraction fallback: the final
/// path component, or the raw path when there is none.
fn display_filename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
