use std::sync::Arc;

use ai_client::Claude;
use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use punchline_api::{router, AppState};
use punchline_common::Config;
use punchline_eval::FunninessScorer;

fn build_scorer(config: &Config) -> FunninessScorer {
    let Some(api_key) = config.anthropic_api_key.as_deref() else {
        warn!("ANTHROPIC_API_KEY not set; remote funniness scoring disabled");
        return FunninessScorer::offline();
    };

    let mut claude = Claude::new(api_key, &config.judge_model);
    if let Some(url) = &config.judge_base_url {
        claude = claude.with_base_url(url);
    }
    info!(model = %claude.model(), endpoint = %claude.base_url(), "Funniness judge ready");
    FunninessScorer::new(Arc::new(claude))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("punchline=info".parse()?))
        .init();

    let config = Config::from_env()?;
    let scorer = build_scorer(&config);
    let state = Arc::new(AppState::new(config.joke_sources.clone(), scorer)?);

    let app = router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Punchline starting on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
