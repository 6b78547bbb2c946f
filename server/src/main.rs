use sea_orm::{ConnectOptions, Database};
use tracing::info;

use catalog_migration::{Migrator, MigratorTrait};
use catalog_server::config::CatalogConfig;
use catalog_server::infra::seed;
use catalog_server::router::build_router;
use catalog_server::state::AppState;

#[tokio::main]
async fn main() {
    catalog_core::tracing::init_tracing();

    let config = CatalogConfig::from_env();

    let mut options = ConnectOptions::new(&config.database_url);
    options.max_connections(config.db_pool_size);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    Migrator::up(&db, None).await.expect("migrations failed");
    seed::seed(&db, &config).await.expect("seeding failed");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("catalog server listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
