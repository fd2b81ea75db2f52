use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use app_api::configure;
use biz_service::client::meeting_client::meeting_client_from_config;
use biz_service::client::object_storage::LocalObjectStorage;
use biz_service::init_service;
use biz_service::repos::Repos;
use common::config::{init_log, AppConfig, DatabaseBackend};
use common::db;
use log::{info, warn};
use std::sync::Arc;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let app_cfg = AppConfig::new("api-config.toml").context("load api-config.toml")?;
    let sys = app_cfg.get_sys();
    init_log(&sys.log_level);

    let database = app_cfg.get_database();
    let repos = match database.backend {
        DatabaseBackend::Mongo => Repos::mongo(&db::connect(&database).await?).await?,
        DatabaseBackend::Memory => {
            warn!("using the in-memory store, data is lost on restart");
            Repos::memory()
        }
    };

    let services = init_service(
        repos,
        &app_cfg,
        meeting_client_from_config(&app_cfg.get_meeting()),
        Arc::new(LocalObjectStorage::from_config(&sys)),
    );
    services.user.bootstrap_admin(&app_cfg.get_auth()).await?;

    std::fs::create_dir_all(&sys.upload_path).with_context(|| format!("create upload dir {}", sys.upload_path))?;
    let state = web::Data::new(services);
    let server = app_cfg.get_server();
    let address_and_port = format!("{}:{}", server.host, server.port);
    info!("Starting server on {}", address_and_port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .configure(configure)
            .service(actix_files::Files::new(&sys.file_url_prefix, &sys.upload_path))
    })
    .keep_alive(std::time::Duration::from_secs(75))
    .bind(address_and_port)?
    .run()
    .await?;
    Ok(())
}
