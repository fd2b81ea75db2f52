use crate::auth::{AdminPrincipal, LoginUser};
use crate::result::{result_created, result_data, ApiResponse};
use crate::AppState;
use actix_web::{delete, get, patch, post, web, Responder};
use biz_service::dto::attendance_dto::{AttendanceAdminUpdateRequest, AttendanceLinkRequest, AttendanceResponse};
use biz_service::dto::{IdResponse, PageQuery};
use common::errors::AppError;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(attendance_my_list)
        .service(attendance_admin_list)
        .service(attendance_admin_update)
        .service(attendance_submit)
        .service(attendance_resubmit)
        .service(attendance_get)
        .service(attendance_delete);
}

/// Status is PRESENT before the mission ends and LATE after.
#[utoipa::path(
    post,
    path = "/attendance/{mission_id}",
    tag = "attendance",
    request_body = AttendanceLinkRequest,
    responses((status = 201, body = ApiResponse<IdResponse>), (status = 409, description = "already submitted"))
)]
#[post("/attendance/{mission_id}")]
pub async fn attendance_submit(
    state: AppState,
    user: LoginUser,
    mission_id: web::Path<i64>,
    dto: web::Json<AttendanceLinkRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_created(state.attendance.submit(mission_id.into_inner(), user.0, &dto.link).await?))
}

#[utoipa::path(patch, path = "/attendance/{id}", tag = "attendance", request_body = AttendanceLinkRequest, responses((status = 200, body = ApiResponse<IdResponse>)))]
#[patch("/attendance/{id}")]
pub async fn attendance_resubmit(
    state: AppState,
    user: LoginUser,
    id: web::Path<i64>,
    dto: web::Json<AttendanceLinkRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_data(state.attendance.resubmit(id.into_inner(), user.0, &dto.link).await?))
}

#[utoipa::path(patch, path = "/attendance/admin/{id}", tag = "attendance", request_body = AttendanceAdminUpdateRequest, responses((status = 200, body = ApiResponse<IdResponse>)))]
#[patch("/attendance/admin/{id}")]
pub async fn attendance_admin_update(
    state: AppState,
    _admin: AdminPrincipal,
    id: web::Path<i64>,
    dto: web::Json<AttendanceAdminUpdateRequest>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.attendance.admin_update(id.into_inner(), &dto).await?))
}

#[utoipa::path(delete, path = "/attendance/{id}", tag = "attendance", responses((status = 200, body = ApiResponse<IdResponse>)))]
#[delete("/attendance/{id}")]
pub async fn attendance_delete(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.attendance.delete(id.into_inner()).await?))
}

#[utoipa::path(get, path = "/attendance/{id}", tag = "attendance", responses((status = 200, body = ApiResponse<AttendanceResponse>)))]
#[get("/attendance/{id}")]
pub async fn attendance_get(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.attendance.get_one(id.into_inner()).await?))
}

#[utoipa::path(get, path = "/attendance/admin/mission/{mission_id}", tag = "attendance", params(PageQuery), responses((status = 200)))]
#[get("/attendance/admin/mission/{mission_id}")]
pub async fn attendance_admin_list(
    state: AppState,
    _admin: AdminPrincipal,
    mission_id: web::Path<i64>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.attendance.list_by_mission(mission_id.into_inner(), &page.to_page()).await?))
}

#[utoipa::path(get, path = "/attendance", tag = "attendance", responses((status = 200, body = ApiResponse<Vec<AttendanceResponse>>)))]
#[get("/attendance")]
pub async fn attendance_my_list(state: AppState, user: LoginUser) -> Result<impl Responder, AppError> {
    Ok(result_data(state.attendance.my_list(user.0).await?))
}
