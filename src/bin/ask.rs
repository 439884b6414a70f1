//! CLI entry point: answer one question from the command line.
//!
//! Usage: `ask [--file <path>] [--deadline-secs <n>] <question...>`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use askroute::config::RouterConfig;
use askroute::files::UploadStore;
use askroute::matcher::FuzzyIntentMatcher;
use askroute::model::OpenAiExtractor;
use askroute::ops::OperationRegistry;
use askroute::pipeline::{Router, StatusClass, Upload};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("ask failed: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askroute=info".parse().expect("valid env filter")),
        )
        .init();

    let mut file: Option<PathBuf> = None;
    let mut deadline: Option<Duration> = None;
    let mut question_words: Vec<String> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" => {
                let value = args.next().ok_or("--file requires a path")?;
                file = Some(PathBuf::from(value));
            }
            "--deadline-secs" => {
                let value = args.next().ok_or("--deadline-secs requires a number")?;
                let secs: u64 = value
                    .parse()
                    .map_err(|_| format!("invalid --deadline-secs value '{value}'"))?;
                deadline = Some(Duration::from_secs(secs));
            }
            other => question_words.push(other.to_string()),
        }
    }

    let question = question_words.join(" ");
    if question.trim().is_empty() {
        return Err("usage: ask [--file <path>] [--deadline-secs <n>] <question...>".to_string());
    }

    let config = RouterConfig::from_env().map_err(|e| e.to_string())?;
    let registry = Arc::new(OperationRegistry::with_builtins());
    let matcher = Arc::new(FuzzyIntentMatcher::from_registry(&registry));
    let extractor = Arc::new(OpenAiExtractor::new(config.extractor));
    let router = Router::new(
        registry,
        matcher,
        extractor,
        UploadStore::new(config.staging_dir),
    );

    let upload = match file {
        Some(path) => {
            let bytes = std::fs::read(&path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| format!("invalid file name: {}", path.display()))?
                .to_string();
            Some(Upload { file_name, bytes })
        }
        None => None,
    };

    let outcome = router.handle(&question, upload, deadline).await;
    println!("{}", outcome.answer);
    if outcome.status == StatusClass::ServerError {
        return Err("request failed with a server-class error".to_string());
    }
    Ok(())
}
