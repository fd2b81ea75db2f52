pub mod application_handler;
pub mod attendance_handler;
pub mod banner_handler;
pub mod coupon_handler;
pub mod file_handler;
pub mod memo_handler;
pub mod mission_handler;
pub mod program_handler;
pub mod review_handler;
pub mod swagger;
pub mod user_handler;

use actix_web::web;
use common::errors::AppError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // malformed bodies and queries use the common error body
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| AppError::Validation(err.to_string()).into()))
        .app_data(web::QueryConfig::default().error_handler(|err, _| AppError::Validation(err.to_string()).into()))
        .app_data(web::PathConfig::default().error_handler(|err, _| AppError::Validation(err.to_string()).into()));

    swagger::configure(cfg);
    user_handler::configure(cfg);
    program_handler::configure(cfg);
    application_handler::configure(cfg);
    mission_handler::configure(cfg);
    attendance_handler::configure(cfg);
    coupon_handler::configure(cfg);
    banner_handler::configure(cfg);
    memo_handler::configure(cfg);
    review_handler::configure(cfg);
    file_handler::configure(cfg);
}
