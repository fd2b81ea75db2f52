pub mod auth;
pub mod handlers;
pub mod result;

use actix_web::web;
use biz_service::BizServices;

/// Shared handler state.
pub type AppState = web::Data<BizServices>;

/// Registers every route under the given scope config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    handlers::configure(cfg);
}
