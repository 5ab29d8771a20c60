use user_registry::{app, db, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("user_registry=debug,axum=info,tower_http=info");

    let app_state = AppState::init().await?;
    db::create_schema(&app_state.db).await?;

    let addr = app_state.config.listen_addr()?;
    let router = app::build_app(app_state);
    app::serve(router, addr).await
}
