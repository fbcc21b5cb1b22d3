use std::env;
use std::error::Error;

use llm_service::OpenAiService;
use pr_summarizer::{CompletionAdapter, GitHubClient, RepoRef, openai_model_config, run_summary};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Optional .env; in CI everything comes from the job environment.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let github_token = env::var("GITHUB_TOKEN")?;
    let github_api = env_or("GITHUB_API_URL", "https://api.github.com");
    let openai_key = env::var("OPENAI_API_KEY")?;
    let openai_api = env_or("OPENAI_API_URL", "https://api.openai.com");
    let repo = RepoRef::parse(&env::var("GITHUB_REPOSITORY")?)?;
    let pull_number: u64 = env::var("PR_NUMBER")?.parse()?;

    let host = GitHubClient::from_config(github_api, github_token)?;
    let backend = OpenAiService::new(openai_model_config(openai_api, openai_key))?;
    let llm = CompletionAdapter::new(backend);

    let report = run_summary(&host, &llm, &repo, pull_number).await?;
    info!(
        "summarized PR {}/{}#{}: files={}, commits={}",
        repo.owner,
        repo.name,
        pull_number,
        report.file_summaries.len(),
        report.commit_summaries.len()
    );

    Ok(())
}
