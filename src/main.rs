use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use film_oner::{
    cli::{self, Cli, Cmd},
    config::Config,
    services::TmdbProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "film_oner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Some(Cmd::Moods) = cli.cmd {
        print!("{}", cli::render_catalog());
        return Ok(());
    }

    // No request can succeed without a key, so refuse to start
    let config = Config::from_env()?;
    let provider = TmdbProvider::from_config(&config);

    tracing::info!(
        api_url = %config.tmdb_api_url,
        language = %config.tmdb_language,
        sample_size = config.sample_size,
        "Starting film-oner"
    );

    let (mood, sample_size) = match cli.cmd {
        Some(Cmd::Browse { mood, sample_size }) => (mood, sample_size),
        _ => (None, None),
    };

    cli::run(&provider, &config, mood, sample_size).await?;

    Ok(())
}
