use clap::Parser;
use services::TriviaServices;
use storage::repository::Storage;
use tracing_subscriber::fmt::format::FmtSpan;
use trivia_api::config::{Cli, Command, log_filter, prepare_sqlite_file};
use trivia_api::{AppState, router};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let cli = Cli::parse();
    let db_url = cli.database_url();
    prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url).await?;

    match cli.command() {
        Command::Seed => {
            storage.seed_sample_catalog().await?;
            tracing::info!(db = %db_url, "seeded sample catalogue");
        }
        Command::Serve => {
            let app = router(AppState {
                services: TriviaServices::from_storage(&storage),
            });
            let listener = tokio::net::TcpListener::bind(cli.address).await?;
            tracing::info!(address = %cli.address, db = %db_url, "listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
