use actix_multipart::form::MultipartFormConfig;
use actix_web::{App, HttpServer, web};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

mod api;
mod config;
mod db;
mod media;
mod shutdown;

use crate::api::{
    application::{ApplicationService, application_config},
    auth::{TokenSigner, UserService, user_config},
    health::health_config,
    job::{JobService, job_config},
    validation,
};
use crate::media::{HttpMediaStore, MediaStore};
use crate::shutdown::ShutdownCoordinator;

/// Command-line overrides for the bind address
#[derive(Parser, Debug)]
#[command(name = "workio", about = "Workio job portal API server")]
struct Args {
    /// Host to bind (overrides BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let cfg = config::Config::from_env().expect("Failed to load configuration");

    let bind_addr = args.bind.unwrap_or_else(|| cfg.bind_addr.clone());
    let port = args.port.unwrap_or(cfg.port);

    // Create logs directory if it doesn't exist
    std::fs::create_dir_all(&cfg.log_dir).expect("Failed to create logs directory");

    // File-based logging with daily rotation, plus console output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(&cfg.log_dir, "info.log");
    let error_file = tracing_appender::rolling::daily(&cfg.log_dir, "error.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(error_layer)
        .init();

    info!("Starting workio API server");

    // Get database connection pool
    let pool = db::connection::get_connection(&cfg.database_url, cfg.max_db_connections)
        .await
        .expect("Failed to connect to database");

    info!("Database connection pool established");

    // Run migrations on startup
    db::migrations::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Shared collaborators
    let signer = web::Data::new(TokenSigner::new(&cfg.jwt_secret, cfg.session_ttl_days));
    let media: Arc<dyn MediaStore> = Arc::new(HttpMediaStore::new(cfg.media_upload_url.clone()));

    // Clone pool for the HTTP server; the first handle is kept for shutdown
    let server_pool = pool.clone();
    let server_cfg = cfg.clone();

    let server = HttpServer::new(move || {
        let user_service = web::Data::new(UserService::new(server_pool.clone(), media.clone()));
        let job_service = web::Data::new(JobService::new(server_pool.clone()));
        let application_service = web::Data::new(ApplicationService::new(
            server_pool.clone(),
            server_cfg.strict_status_transitions,
        ));

        // JSON bodies are small; multipart carries the uploads plus some
        // slack for the text fields
        let payload_config = web::PayloadConfig::default().limit(1024 * 1024);
        let multipart_limit =
            server_cfg.max_image_size.max(server_cfg.max_resume_size) + 1024 * 1024;
        let multipart_config = MultipartFormConfig::default().total_limit(multipart_limit);

        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(web::Data::new(server_cfg.clone()))
            .app_data(signer.clone())
            .app_data(user_service)
            .app_data(job_service)
            .app_data(application_service)
            .app_data(payload_config)
            .app_data(multipart_config)
            .app_data(validation::json_config())
            .configure(health_config)
            .configure(user_config)
            .configure(job_config)
            .configure(application_config)
    });

    info!("Server starting on http://{}:{}", bind_addr, port);

    let server = server.bind((bind_addr.as_str(), port))?.run();

    // Get server handle for graceful shutdown
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let coordinator = ShutdownCoordinator::new(server_handle, server_task, pool);
    coordinator.wait_for_shutdown().await
}
