//! Batch runner for program mail jobs, meant to be triggered by an external scheduler.

use anyhow::{bail, Context};
use biz_service::client::meeting_client::DisabledMeetingClient;
use biz_service::client::object_storage::LocalObjectStorage;
use biz_service::init_service;
use biz_service::repos::Repos;
use clap::Parser;
use common::config::{init_log, AppConfig, DatabaseBackend};
use common::db;
use log::{error, info};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "app_job")]
#[command(about = "Sends the remind mail of a program to its approved applicants", long_about = None)]
struct Args {
    /// Program to remind
    #[arg(long, value_name = "PROGRAM_ID")]
    program_id: i64,

    /// Configuration file
    #[arg(long, value_name = "FILE", default_value = "job-config.toml", env = "JOB_CONFIG")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let app_cfg = AppConfig::new(&args.config).with_context(|| format!("load {}", args.config))?;
    let sys = app_cfg.get_sys();
    init_log(&sys.log_level);

    let database = app_cfg.get_database();
    if database.backend == DatabaseBackend::Memory {
        bail!("the remind job needs the mongo backend, the in-memory store holds no programs");
    }
    let repos = Repos::mongo(&db::connect(&database).await?).await?;
    let services = init_service(repos, &app_cfg, Arc::new(DisabledMeetingClient), Arc::new(LocalObjectStorage::from_config(&sys)));

    info!("remind mail job started for program {}", args.program_id);
    match services.remind_job.run(args.program_id).await {
        Ok(report) => {
            println!("{}", serde_json::to_string(&report)?);
            Ok(())
        }
        Err(e) => {
            error!("remind mail job failed: {}", e);
            Err(e.into())
        }
    }
}
