use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use job_agent::config::{self, AgentConfig, AppConfig};
use job_agent::error::AppError;
use job_agent::telemetry;
use job_agent::workflows::jobs::{
    ApplicationRecord, ApplicationTracker, CandidateProfile, JobApplicationAgent, JobSource,
    KeywordMatcher, KeywordQuery, LocalJobSource, MatchResult,
};
use std::path::PathBuf;
use tracing::info;

// Without a subcommand the keywords and candidate flags run the apply workflow.
#[derive(Parser, Debug)]
#[command(
    name = "job-agent",
    about = "Match job postings against desired keywords and record applications",
    version,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    apply: Option<ApplyArgs>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank matching postings without recording anything
    Matches(MatchArgs),
    /// Print every recorded application in log order
    History(HistoryArgs),
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Keywords that describe the desired job
    #[arg(required = true, num_args = 1..)]
    keywords: Vec<String>,
    /// Path to the job listings JSON (defaults to JOB_AGENT_JOBS or data/jobs.json)
    #[arg(long)]
    jobs: Option<PathBuf>,
    /// Keyword match threshold, usually between 0.0 and 1.0 (defaults to JOB_AGENT_THRESHOLD or 0.4)
    #[arg(long, value_parser = parse_threshold)]
    threshold: Option<f64>,
    /// Print matches as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ApplyArgs {
    #[command(flatten)]
    matching: MatchArgs,
    /// CSV file to log applications (defaults to JOB_AGENT_LOG or applications.csv)
    #[arg(long)]
    log: Option<PathBuf>,
    /// Candidate full name
    #[arg(long)]
    name: String,
    /// Candidate email address
    #[arg(long)]
    email: String,
    /// Path to the resume file
    #[arg(long)]
    resume: PathBuf,
    /// Optional cover letter template file
    #[arg(long)]
    cover_letter: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    /// CSV file holding recorded applications
    #[arg(long)]
    log: Option<PathBuf>,
    /// Print records as JSON instead of text
    #[arg(long)]
    json: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "job agent starting");

    match (cli.command, cli.apply) {
        (Some(Command::Matches(args)), _) => run_matches(args, config.agent),
        (Some(Command::History(args)), _) => run_history(args, config.agent),
        (None, Some(args)) => run_apply(args, config.agent),
        (None, None) => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "keywords and --name, --email, --resume are required to apply",
            )
            .exit(),
    }
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    config::parse_threshold(raw).map_err(|err| err.to_string())
}

fn build_agent(
    matching: &MatchArgs,
    log: Option<PathBuf>,
    candidate: CandidateProfile,
    defaults: AgentConfig,
) -> Result<JobApplicationAgent<LocalJobSource>, AppError> {
    let jobs = matching.jobs.clone().unwrap_or(defaults.jobs_path);
    let log = log.unwrap_or(defaults.log_path);
    let matcher = KeywordMatcher::new(matching.threshold.unwrap_or(defaults.threshold))?;

    Ok(JobApplicationAgent::new(
        LocalJobSource::new(jobs),
        ApplicationTracker::new(log),
        candidate,
        matcher,
    ))
}

fn run_apply(args: ApplyArgs, defaults: AgentConfig) -> Result<(), AppError> {
    let ApplyArgs {
        matching,
        log,
        name,
        email,
        resume,
        cover_letter,
    } = args;

    let mut candidate = CandidateProfile::new(name, email, resume);
    if let Some(path) = cover_letter {
        candidate = candidate.with_cover_letter_template(std::fs::read_to_string(path)?);
    }
    let agent = build_agent(&matching, log, candidate, defaults)?;
    let matches = agent.apply_to_matches(&matching.keywords)?;

    if matching.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print!("{}", render_submitted(&matches));
    }
    Ok(())
}

fn run_matches(args: MatchArgs, defaults: AgentConfig) -> Result<(), AppError> {
    let jobs = args.jobs.clone().unwrap_or(defaults.jobs_path);
    let matcher = KeywordMatcher::new(args.threshold.unwrap_or(defaults.threshold))?;
    let source = LocalJobSource::new(jobs);

    let listings = source.job_listings()?;
    let query = KeywordQuery::new(&args.keywords);
    let matches = matcher.rank(listings, &query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print!("{}", render_ranked(&matches));
    }
    Ok(())
}

fn run_history(args: HistoryArgs, defaults: AgentConfig) -> Result<(), AppError> {
    let tracker = ApplicationTracker::new(args.log.unwrap_or(defaults.log_path));
    let records = tracker.list_applications()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", render_history(&records));
    }
    Ok(())
}

fn match_line(found: &MatchResult) -> String {
    format!(
        "- {} at {} (score: {:.2})\n",
        found.listing.title(),
        found.listing.company(),
        found.score
    )
}

fn render_submitted(matches: &[MatchResult]) -> String {
    if matches.is_empty() {
        return "No matching positions found. No applications submitted.\n".to_string();
    }

    let mut out = String::from("Submitted applications for the following positions:\n");
    out.extend(matches.iter().map(match_line));
    out
}

fn render_ranked(matches: &[MatchResult]) -> String {
    if matches.is_empty() {
        return "No matching positions found.\n".to_string();
    }

    let mut out = String::from("Matching positions:\n");
    for found in matches {
        out.push_str(&match_line(found));
        out.push_str(&format!(
            "    matched: {}\n",
            found.matched_keywords.join(", ")
        ));
    }
    out
}

fn render_history(records: &[ApplicationRecord]) -> String {
    if records.is_empty() {
        return "No applications recorded.\n".to_string();
    }

    records
        .iter()
        .map(|record| {
            format!(
                "{} | {} | {} | {}\n",
                record.timestamp.format("%Y-%m-%dT%H:%M:%S"),
                record.company,
                record.title,
                record.url
            )
        })
        .collect()
}
