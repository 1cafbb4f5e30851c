use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gitscore::models::{ActivityStats, AnalysisResult};
use gitscore::server::{self, AppState};
use gitscore::{
    AnalysisPipeline, ClaudeProvider, Config, GitHubClient, PipelineConfig, RatingEngine,
    ScoringConfig, WeightPreset,
};

#[derive(Parser, Debug)]
#[command(name = "gitscore")]
#[command(version = "0.1.0")]
#[command(about = "Score GitHub profiles the way a technical recruiter would")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    scoring: ScoringArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a single profile and print a report
    Analyze {
        /// GitHub username to analyze
        #[arg(short, long)]
        username: String,

        /// Output format (json, text, markdown)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Serve the analysis API over HTTP
    Serve,
}

#[derive(Args, Debug)]
struct ScoringArgs {
    /// Dimension weight preset (balanced, activity)
    #[arg(long, global = true)]
    preset: Option<WeightPreset>,

    /// Number of public event pages to fetch (1-3)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=3))]
    event_pages: Option<u32>,

    /// Skip narrative enrichment even when ANTHROPIC_API_KEY is set
    #[arg(long, global = true)]
    no_ai: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitscore=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(preset) = cli.scoring.preset {
        config.preset = preset;
    }
    if let Some(pages) = cli.scoring.event_pages {
        config.event_pages = pages;
    }
    if cli.scoring.no_ai {
        config.anthropic_api_key = None;
    }

    let pipeline = build_pipeline(&config)?;

    match cli.command {
        Command::Analyze {
            username,
            format,
            output,
        } => {
            let style = ProgressStyle::default_spinner()
                .tick_strings(&["-", "\\", "|", "/", " "])
                .template("{spinner:.blue} {msg}")
                .context("Failed to create progress bar style")?;
            let pb = ProgressBar::new_spinner();
            pb.set_style(style);
            pb.set_message(format!("Analyzing {}...", username));
            pb.enable_steady_tick(Duration::from_millis(120));

            let result = pipeline.analyze_user(&username).await;
            pb.finish_and_clear();

            output_result(&result?, &format, output.as_deref())?;
        }
        Command::Serve => {
            let addr = format!("{}:{}", config.host, config.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Server running on http://{}", addr);
            axum::serve(listener, server::app(AppState::new(pipeline))).await?;
        }
    }

    Ok(())
}

fn build_pipeline(config: &Config) -> anyhow::Result<AnalysisPipeline> {
    let github = GitHubClient::new(config.github_token.as_deref())?
        .with_base_url(config.github_api_url.clone());
    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set, unauthenticated requests are limited to 60 per hour");
    }

    let engine = RatingEngine::new(ScoringConfig::new(config.preset))?;
    tracing::info!("Scoring with the {} preset", config.preset);

    let mut pipeline = AnalysisPipeline::new(github, engine, PipelineConfig::from(config));
    if let Some(ref api_key) = config.anthropic_api_key {
        let claude = ClaudeProvider::new(api_key.clone(), Some(config.anthropic_model.clone()))?;
        pipeline = pipeline.with_narrator(claude);
    }
    Ok(pipeline)
}

fn output_result(result: &AnalysisResult, format: &str, path: Option<&str>) -> anyhow::Result<()> {
    let output = match format {
        "json" => serde_json::to_string_pretty(result)?,
        "markdown" => format_markdown(result),
        _ => format_text(result),
    };

    if let Some(path) = path {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn dimension_rows(result: &AnalysisResult) -> [(&'static str, u8); 6] {
    let b = &result.scores.breakdown;
    [
        ("Documentation", b.documentation),
        ("Code Structure", b.code_structure),
        ("Activity", b.activity),
        ("Organization", b.organization),
        ("Impact", b.impact),
        ("Technical", b.technical),
    ]
}

const TOP_REPOS_SHOWN: usize = 6;
const NO_RISKS: &str = "No critical risks detected. Clean record.";

fn last_active(activity: &ActivityStats) -> String {
    activity
        .last_active
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn format_text(result: &AnalysisResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== Profile Analysis: {} ===\n\n", result.username));

    if let Some(ref name) = result.profile.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = result.profile.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    output.push_str(&format!(
        "Followers: {}  Public repos: {}\n",
        result.profile.followers, result.profile.public_repos
    ));
    output.push_str(&format!("\nOverall Score: {}/100\n\n", result.scores.overall));

    output.push_str("Dimensions:\n");
    for (label, score) in dimension_rows(result) {
        output.push_str(&format!("  {:<15} {:>3}/100\n", label, score));
    }

    let activity = result.activity_stats();
    output.push_str(&format!(
        "\nRecent Activity: {} pushes, {} commits, last active {}\n",
        activity.push_events,
        activity.commits,
        last_active(&activity)
    ));

    if !result.repos.is_empty() {
        output.push_str("\nTop Repositories:\n");
        for repo in result.repos.iter().take(TOP_REPOS_SHOWN) {
            output.push_str(&format!(
                "  - {} [{}] {} stars, score {}\n",
                repo.name,
                repo.language.as_deref().unwrap_or("n/a"),
                repo.stars,
                repo.overall
            ));
        }
    }

    if !result.languages.is_empty() {
        let languages: Vec<_> = result
            .languages
            .iter()
            .map(|(lang, count)| format!("{} ({})", lang, count))
            .collect();
        output.push_str(&format!("\nLanguages: {}\n", languages.join(", ")));
    }

    if !result.strengths.is_empty() {
        output.push_str("\nStrengths:\n");
        for strength in &result.strengths {
            output.push_str(&format!("  + {}\n", strength.text));
        }
    }

    output.push_str("\nRisk Flags:\n");
    if result.red_flags.is_empty() {
        output.push_str(&format!("  {}\n", NO_RISKS));
    }
    for flag in &result.red_flags {
        output.push_str(&format!("  ! {}\n", flag.text));
    }

    if !result.recommendations.is_empty() {
        output.push_str("\nRecommendations:\n");
        for rec in &result.recommendations {
            output.push_str(&format!("  [{}] {}: {}\n", rec.kind, rec.title, rec.text));
        }
    }

    if let Some(ref insight) = result.ai_insight {
        output.push_str(&format!("\nKey Strength: {}\n", insight.key_strength));
        output.push_str(&format!("Recruiter Tip: {}\n", insight.recruiter_tip));
    }

    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        result.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_markdown(result: &AnalysisResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Profile Analysis: {}\n\n", result.username));

    if let Some(ref name) = result.profile.name {
        output.push_str(&format!("**Name:** {}\n\n", name));
    }
    if let Some(ref bio) = result.profile.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str(&format!("**Overall Score:** {}/100\n\n", result.scores.overall));

    output.push_str("## Dimensions\n\n");
    output.push_str("| Dimension | Score |\n|-----------|-------|\n");
    for (label, score) in dimension_rows(result) {
        output.push_str(&format!("| {} | {}/100 |\n", label, score));
    }

    let activity = result.activity_stats();
    output.push_str("\n## Recent Activity\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Pushes | {} |\n", activity.push_events));
    output.push_str(&format!("| Commits | {} |\n", activity.commits));
    output.push_str(&format!("| Last Active | {} |\n", last_active(&activity)));

    if !result.repos.is_empty() {
        output.push_str("\n## Top Repositories\n\n");
        output.push_str("| Repository | Language | Stars | Docs | Impact | Score |\n");
        output.push_str("|------------|----------|-------|------|--------|-------|\n");
        for repo in result.repos.iter().take(TOP_REPOS_SHOWN) {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                repo.name,
                repo.language.as_deref().unwrap_or("-"),
                repo.stars,
                repo.scores.doc,
                repo.scores.impact,
                repo.overall
            ));
        }
    }

    if !result.strengths.is_empty() {
        output.push_str("\n## Strengths\n\n");
        for strength in &result.strengths {
            output.push_str(&format!("- {}\n", strength.text));
        }
    }

    output.push_str("\n## Risk Flags\n\n");
    if result.red_flags.is_empty() {
        output.push_str(&format!("{}\n", NO_RISKS));
    }
    for flag in &result.red_flags {
        output.push_str(&format!("- {}\n", flag.text));
    }

    if !result.recommendations.is_empty() {
        output.push_str("\n## Recommendations\n\n");
        for rec in &result.recommendations {
            output.push_str(&format!("- **{}** ({}): {}\n", rec.title, rec.kind, rec.text));
        }
    }

    if let Some(ref insight) = result.ai_insight {
        output.push_str("\n## Recruiter Notes\n\n");
        output.push_str(&format!("- **Key strength:** {}\n", insight.key_strength));
        output.push_str(&format!("- **Tip:** {}\n", insight.recruiter_tip));
    }

    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        result.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
