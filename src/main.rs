mod client;
mod config;
mod draft;
mod edit;
mod outline;
mod validate;


use std::path::PathBuf;

use clap::{Parser, Subcommand};
use editor::block::BlockId;
use editor::document::Document;
use editor::wire;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_DRAFT};
use crate::edit::EditCommand;
use crate::validate::ValidationError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing bearer token; pass --token or set QUIZBOARD_TOKEN")]
    MissingToken,
    #[error("no draft at {0}; run `quizboard new` first")]
    NoDraft(String),
    #[error("draft already exists at {0}; pass --force to replace it")]
    DraftExists(String),
    #[error("no block with id {0}")]
    UnknownBlock(BlockId),
    #[error("block {id} has no {what}")]
    NotApplicable { id: BlockId, what: &'static str },
    #[error("assessment is not ready to save:\n{}", list(.0))]
    Invalid(Vec<ValidationError>),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("draft error: {0}")]
    Wire(#[from] wire::WireError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

fn list(problems: &[ValidationError]) -> String {
    problems.iter().map(|p| format!("  - {p}")).collect::<Vec<_>>().join("\n")
}

#[derive(Parser, Debug)]
#[command(name = "quizboard", about = "Author block-based assessments from the command line")]
struct Cli {
    #[arg(long, env = "QUIZBOARD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "QUIZBOARD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "QUIZBOARD_DRAFT", default_value = DEFAULT_DRAFT)]
    draft: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new draft.
    New {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the draft as an outline.
    Show {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    #[command(flatten)]
    Edit(EditCommand),
    /// Check the draft is ready to save.
    Validate,
    /// Validate and send the draft to the server.
    Save {
        #[arg(long)]
        assessment_id: Option<Uuid>,
    },
    /// Upload an image file and attach it to an image block.
    Upload {
        id: BlockId,
        file: PathBuf,
        #[arg(long, default_value = "")]
        alt: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so command output stays pipeable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(std::io::stderr)).init();

    let cli = Cli::parse();
    let config = Config::new(cli.base_url, cli.token, cli.draft);

    match cli.command {
        Command::New { title, description, force } => run_new(&config, title, description, force).await,
        Command::Show { json } => run_show(&config, json).await,
        Command::Edit(command) => run_edit(&config, command).await,
        Command::Validate => run_validate(&config).await,
        Command::Save { assessment_id } => run_save(&config, assessment_id).await,
        Command::Upload { id, file, alt } => run_upload(&config, id, file, alt).await,
    }
}

async fn run_new(config: &Config, title: String, description: String, force: bool) -> Result<(), CliError> {
    if !force && tokio::fs::try_exists(&config.draft).await? {
        return Err(CliError::DraftExists(config.draft.display().to_string()));
    }
    let doc = Document::with_header(title, description);
    draft::save(&config.draft, &doc).await?;
    info!(path = %config.draft.display(), "draft created");
    Ok(())
}

async fn run_show(config: &Config, json: bool) -> Result<(), CliError> {
    let doc = draft::load(&config.draft).await?;
    if json {
        println!("{}", wire::to_json(&doc)?);
    } else {
        print!("{}", outline::render(&doc));
    }
    Ok(())
}

async fn run_edit(config: &Config, command: EditCommand) -> Result<(), CliError> {
    let mut doc = draft::load(&config.draft).await?;
    let focus = edit::apply(&mut doc, command)?;
    draft::save(&config.draft, &doc).await?;
    if let Some(id) = focus {
        println!("{id}");
    }
    Ok(())
}

async fn run_validate(config: &Config) -> Result<(), CliError> {
    let doc = draft::load(&config.draft).await?;
    check(&doc)?;
    println!("ok");
    Ok(())
}

async fn run_save(config: &Config, assessment_id: Option<Uuid>) -> Result<(), CliError> {
    let doc = draft::load(&config.draft).await?;
    check(&doc)?;
    let client = ApiClient::new(config.clone())?;
    let response = client.save_assessment(assessment_id, &wire::to_record(&doc)).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_upload(config: &Config, id: BlockId, file: PathBuf, alt: String) -> Result<(), CliError> {
    let mut doc = draft::load(&config.draft).await?;
    let Some(block) = doc.get(&id) else {
        return Err(CliError::UnknownBlock(id));
    };
    if block.kind() != editor::block::BlockKind::ImageBlock {
        return Err(CliError::NotApplicable { id, what: "image source" });
    }
    let client = ApiClient::new(config.clone())?;
    let reference = client.upload(&file).await?;
    doc.set_image(&id, reference.as_str(), alt);
    draft::save(&config.draft, &doc).await?;
    println!("{reference}");
    Ok(())
}

fn check(doc: &Document) -> Result<(), CliError> {
    let problems = validate::validate(doc);
    if problems.is_empty() { Ok(()) } else { Err(CliError::Invalid(problems)) }
}
