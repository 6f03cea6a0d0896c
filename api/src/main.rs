use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use lh_api::app::{create_app, AppState};
use lh_infra::database::connection::create_pool;
use lh_infra::database::MIGRATOR;
use lh_infra::{
    MySqlBookingRepository, MySqlCommentRepository, MySqlItemRepository,
    MySqlItemRequestRepository, MySqlUserRepository,
};
use lh_shared::config::{DatabaseConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting LendHub API Server");

    let database_config = DatabaseConfig::from_env();
    let server_config = ServerConfig::from_env();

    let pool = create_pool(&database_config).await?;
    MIGRATOR.run(&pool).await?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let item_repository = Arc::new(MySqlItemRepository::new(pool.clone()));
    let booking_repository = Arc::new(MySqlBookingRepository::new(pool.clone()));
    let comment_repository = Arc::new(MySqlCommentRepository::new(pool.clone()));
    let request_repository = Arc::new(MySqlItemRequestRepository::new(pool.clone()));

    let app_state = web::Data::new(AppState::new(
        user_repository,
        item_repository,
        booking_repository,
        comment_repository,
        request_repository,
    ));

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}
