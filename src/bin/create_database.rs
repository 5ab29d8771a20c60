use tracing::info;
use user_registry::{
    config::AppConfig,
    db::{self, InitOutcome},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("create_database=info,user_registry=info");

    let config = AppConfig::from_env()?;
    match db::initialize(&config).await? {
        InitOutcome::Created => info!("database created successfully"),
        InitOutcome::AlreadyExists => info!("database already exists"),
    }
    Ok(())
}
