use crate::auth::{AdminPrincipal, LoginUser};
use crate::result::{result_created, result_data, ApiResponse};
use crate::AppState;
use actix_web::{delete, get, patch, post, web, Responder};
use biz_service::dto::mission_dto::{MissionCreateRequest, MissionResponse, MissionUpdateRequest};
use biz_service::dto::{IdResponse, PageQuery};
use common::errors::AppError;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(mission_admin_list)
        .service(mission_visible_list)
        .service(mission_create)
        .service(mission_get)
        .service(mission_update)
        .service(mission_delete);
}

#[utoipa::path(post, path = "/mission/{program_id}", tag = "mission", request_body = MissionCreateRequest, responses((status = 201, body = ApiResponse<IdResponse>)))]
#[post("/mission/{program_id}")]
pub async fn mission_create(
    state: AppState,
    _admin: AdminPrincipal,
    program_id: web::Path<i64>,
    dto: web::Json<MissionCreateRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_created(state.mission.create(program_id.into_inner(), &dto).await?))
}

#[utoipa::path(patch, path = "/mission/{id}", tag = "mission", request_body = MissionUpdateRequest, responses((status = 200, body = ApiResponse<IdResponse>)))]
#[patch("/mission/{id}")]
pub async fn mission_update(
    state: AppState,
    _admin: AdminPrincipal,
    id: web::Path<i64>,
    dto: web::Json<MissionUpdateRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_data(state.mission.update(id.into_inner(), &dto).await?))
}

#[utoipa::path(delete, path = "/mission/{id}", tag = "mission", responses((status = 200, body = ApiResponse<IdResponse>)))]
#[delete("/mission/{id}")]
pub async fn mission_delete(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.mission.delete(id.into_inner()).await?))
}

#[utoipa::path(get, path = "/mission/{id}", tag = "mission", responses((status = 200, body = ApiResponse<MissionResponse>)))]
#[get("/mission/{id}")]
pub async fn mission_get(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.mission.get_one(id.into_inner()).await?))
}

#[utoipa::path(get, path = "/mission/admin/{program_id}", tag = "mission", params(PageQuery), responses((status = 200)))]
#[get("/mission/admin/{program_id}")]
pub async fn mission_admin_list(
    state: AppState,
    _admin: AdminPrincipal,
    program_id: web::Path<i64>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.mission.admin_list(program_id.into_inner(), &page.to_page()).await?))
}

/// Missions open to participants of the program.
#[utoipa::path(get, path = "/mission/program/{program_id}", tag = "mission", responses((status = 200, body = ApiResponse<Vec<MissionResponse>>)))]
#[get("/mission/program/{program_id}")]
pub async fn mission_visible_list(state: AppState, _user: LoginUser, program_id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.mission.visible_list(program_id.into_inner()).await?))
}
