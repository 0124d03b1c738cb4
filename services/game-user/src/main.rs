//! game-user Service

use std::sync::Arc;

use game_bootstrap::{Infrastructure, run_http};
use tracing::info;

use game_user::api::http::{AppState, create_router};
use game_user::application::UserService;
use game_user::infrastructure::persistence::{PostgresUserRepository, migrations};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    run_http("config", migrations(), |infra: Infrastructure| async move {
        info!("Initializing game-user service...");

        let repo = Arc::new(PostgresUserRepository::new(infra.postgres_pool()));
        let service = Arc::new(UserService::new(repo));

        Ok(create_router(AppState::new(service)))
    })
    .await
}
