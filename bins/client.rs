use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use configs::AppConfig;
use dotenvy::dotenv;
use models::{JobListing, LoginCredentials, ResumeFile, ResumeScore, SignupCredentials};
use service::backend::Backend;
use service::latency::LatencyProfile;
use service::random::SeededRandom;
use service::storage::{FileStore, KeyValueStore};
use service::{AuthSession, HttpBackend, MockBackend};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "client", about = "resume scoring and job matching client")]
struct Cmd {
    /// Which backend answers the requests
    #[arg(long, value_enum, default_value_t = BackendKind::Mock, env = "RESUME_BOOST_BACKEND")]
    backend: BackendKind,

    /// API base url for `--backend http`; overrides `[client] base_url`
    #[arg(long, env = "RESUME_BOOST_URL")]
    url: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: SubCommandType,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendKind {
    Mock,
    Http,
}

#[derive(Subcommand)]
enum SubCommandType {
    Login {
        email: String,
        #[arg(long, env = "RESUME_BOOST_PASSWORD")]
        password: String,
    },
    Signup {
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "RESUME_BOOST_PASSWORD")]
        password: String,
    },
    Logout,
    Whoami,
    /// Score a resume file (.pdf, .doc or .docx)
    Analyze { path: PathBuf },
    /// List recommended jobs
    Jobs,
    Apply { id: String },
}

async fn build_backend(cmd: &Cmd, cfg: &AppConfig) -> anyhow::Result<Arc<dyn Backend>> {
    common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
    let store: Arc<dyn KeyValueStore> = FileStore::open(cfg.storage.session_path())
        .await
        .context("opening session store")?;

    let backend: Arc<dyn Backend> = match cmd.backend {
        BackendKind::Mock => {
            let backend = MockBackend::builder()
                .store(store)
                .random(Arc::new(SeededRandom::from_optional_seed(cfg.mock.seed)))
                .latency(LatencyProfile::scaled(cfg.mock.latency_scale))
                .build()
                .await?;
            Arc::new(backend)
        }
        BackendKind::Http => {
            let base_url = cmd.url.clone().unwrap_or_else(|| cfg.client.base_url.clone());
            debug!(%base_url, "using http backend");
            Arc::new(HttpBackend::new(&base_url, store)?)
        }
    };
    Ok(backend)
}

async fn read_resume(path: &Path) -> anyhow::Result<ResumeFile> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("resume path has no file name")?;
    let content_type = ResumeFile::guess_content_type(&file_name).map(str::to_string);
    let bytes = tokio::fs::read(path).await.with_context(|| format!("reading {}", path.display()))?;
    let file = ResumeFile::new(file_name, content_type, bytes);
    if !file.has_accepted_type() {
        bail!("unsupported file type: {} (expected .pdf, .doc or .docx)", file.file_name);
    }
    Ok(file)
}

fn print_score(score: &ResumeScore) {
    println!("Resume analyzed! Your resume scored {}/100", score.overall);
    for (name, value) in score.categories.iter() {
        println!("  {name:<12} {value:>3}");
    }
    println!("Suggestions:");
    for s in &score.suggestions {
        println!("  - {s}");
    }
}

fn print_jobs(jobs: &[JobListing]) {
    for job in jobs {
        println!(
            "[{}] {} at {} ({}, {}) {}% match, {}, posted {}",
            job.id, job.title, job.company, job.location, job.job_type, job.match_score, job.salary, job.posted_at
        );
    }
}

fn emit<T: serde::Serialize>(as_json: bool, value: &T, human: impl FnOnce(&T)) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

/// Runs inside `AuthSession::scope`, so every command sees the same holder.
async fn dispatch(cmd: Cmd) -> anyhow::Result<()> {
    let session = AuthSession::current();
    let backend = Arc::clone(session.backend());
    match cmd.command {
        SubCommandType::Login { email, password } => match session.login(LoginCredentials::new(email, password)).await {
            Ok(user) => emit(cmd.json, &user, |u| println!("Welcome back, {}! You have successfully logged in.", u.username))?,
            Err(e) => bail!("Login failed: {e}"),
        },
        SubCommandType::Signup { email, username, password } => {
            match session.signup(SignupCredentials::new(email, password, username)).await {
                Ok(user) => emit(cmd.json, &user, |u| println!("Account created! Welcome, {}.", u.username))?,
                Err(e) => bail!("Signup failed: {e}"),
            }
        }
        SubCommandType::Logout => {
            session.logout().await?;
            println!("Logged out successfully");
        }
        SubCommandType::Whoami => match session.user() {
            Some(user) => emit(cmd.json, &user, |u| println!("{} <{}> (id {})", u.username, u.email, u.id))?,
            None => bail!("not logged in"),
        },
        SubCommandType::Analyze { path } => {
            let file = read_resume(&path).await?;
            match backend.analyze_resume(&file).await {
                Ok(score) => emit(cmd.json, &score, print_score)?,
                Err(e) => bail!("Analysis failed: {e}"),
            }
        }
        SubCommandType::Jobs => {
            let jobs = backend.job_recommendations(None).await?;
            emit(cmd.json, &jobs, |j| print_jobs(j))?;
        }
        SubCommandType::Apply { id } => {
            let result = backend.apply_to_job(&id).await?;
            emit(cmd.json, &result, |r| {
                let title = if r.success { "Application sent!" } else { "Application failed" };
                println!("{title} {}", r.message);
            })?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_cli();

    let cmd = Cmd::parse();
    let cfg = match AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "configuration rejected");
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let backend = match build_backend(&cmd, &cfg).await {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let session = AuthSession::initialize(backend).await;
    match AuthSession::scope(session, dispatch(cmd)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
