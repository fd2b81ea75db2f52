use crate::auth::{AdminPrincipal, MaybeUser};
use crate::result::{result_created, result_data, ApiResponse};
use crate::AppState;
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use biz_service::dto::program_dto::{
    AdminProgramQuery, EmailTemplateResponse, FinalHeadcountResponse, LetsChatAfterNoticeResponse, LetsChatPriorNoticeResponse,
    MailTypeQuery, MentorPasswordRequest, MentorPasswordResponse, ProgramAdminResponse, ProgramCountResponse, ProgramCreateRequest,
    ProgramDetailResponse, ProgramTypeQuery, ProgramUpdateRequest,
};
use biz_service::dto::{IdResponse, PageQuery};
use biz_service::job::remind_mail_job::RemindMailReport;
use common::errors::AppError;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // static segments before `/program/{id}`
    cfg.service(program_health)
        .service(program_count)
        .service(program_admin_list)
        .service(program_admin_by_user)
        .service(program_admin_detail)
        .service(program_thumbnail_list)
        .service(program_create)
        .service(program_detail)
        .service(program_update)
        .service(program_delete)
        .service(program_final_headcount)
        .service(program_mentor_password)
        .service(program_prior_notice)
        .service(program_after_notice)
        .service(program_email_template)
        .service(program_remind_mail);
}

#[utoipa::path(get, path = "/program/tg", tag = "program", responses((status = 200, body = String)))]
#[get("/program/tg")]
pub async fn program_health() -> impl Responder {
    HttpResponse::Ok().body("success")
}

#[utoipa::path(get, path = "/program/count", tag = "program", responses((status = 200, body = ApiResponse<ProgramCountResponse>)))]
#[get("/program/count")]
pub async fn program_count(state: AppState) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.count_done().await?))
}

#[utoipa::path(get, path = "/program", tag = "program", params(ProgramTypeQuery, PageQuery), responses((status = 200)))]
#[get("/program")]
pub async fn program_thumbnail_list(
    state: AppState,
    query: web::Query<ProgramTypeQuery>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.thumbnail_list(query.program_type, &page.to_page()).await?))
}

#[utoipa::path(get, path = "/program/{id}", tag = "program", responses((status = 200, body = ApiResponse<ProgramDetailResponse>)))]
#[get("/program/{id}")]
pub async fn program_detail(state: AppState, user: MaybeUser, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.detail(id.into_inner(), user.0).await?))
}

#[utoipa::path(get, path = "/program/admin", tag = "program", params(AdminProgramQuery, PageQuery), responses((status = 200)))]
#[get("/program/admin")]
pub async fn program_admin_list(
    state: AppState,
    _admin: AdminPrincipal,
    query: web::Query<AdminProgramQuery>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.admin_list(&query, &page.to_page()).await?))
}

#[utoipa::path(get, path = "/program/admin/user/{user_id}", tag = "program", params(PageQuery), responses((status = 200)))]
#[get("/program/admin/user/{user_id}")]
pub async fn program_admin_by_user(
    state: AppState,
    _admin: AdminPrincipal,
    user_id: web::Path<i64>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.user_programs(user_id.into_inner(), &page.to_page()).await?))
}

#[utoipa::path(get, path = "/program/admin/{id}", tag = "program", responses((status = 200, body = ApiResponse<ProgramAdminResponse>)))]
#[get("/program/admin/{id}")]
pub async fn program_admin_detail(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.admin_detail(id.into_inner()).await?))
}

#[utoipa::path(
    post,
    path = "/program",
    tag = "program",
    request_body = ProgramCreateRequest,
    responses(
        (status = 201, body = ApiResponse<IdResponse>),
        (status = 400, description = "type specific inputs missing"),
        (status = 502, description = "meeting room could not be created"),
    )
)]
#[post("/program")]
pub async fn program_create(state: AppState, _admin: AdminPrincipal, dto: web::Json<ProgramCreateRequest>) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_created(state.program.create(&dto).await?))
}

#[utoipa::path(patch, path = "/program/{id}", tag = "program", request_body = ProgramUpdateRequest, responses((status = 200, body = ApiResponse<IdResponse>)))]
#[patch("/program/{id}")]
pub async fn program_update(
    state: AppState,
    _admin: AdminPrincipal,
    id: web::Path<i64>,
    dto: web::Json<ProgramUpdateRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_data(state.program.update(id.into_inner(), &dto).await?))
}

#[utoipa::path(delete, path = "/program/{id}", tag = "program", responses((status = 200, body = ApiResponse<IdResponse>)))]
#[delete("/program/{id}")]
pub async fn program_delete(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.delete(id.into_inner()).await?))
}

#[utoipa::path(patch, path = "/program/{id}/final-headcount", tag = "program", responses((status = 200, body = ApiResponse<FinalHeadcountResponse>)))]
#[patch("/program/{id}/final-headcount")]
pub async fn program_final_headcount(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.save_final_headcount(id.into_inner()).await?))
}

#[utoipa::path(get, path = "/program/{id}/mentor-password", tag = "program", responses((status = 200, body = ApiResponse<MentorPasswordResponse>)))]
#[get("/program/{id}/mentor-password")]
pub async fn program_mentor_password(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.mentor_password(id.into_inner()).await?))
}

/// Session brief for the LETS_CHAT mentor, unlocked by the mentor password.
#[utoipa::path(
    post,
    path = "/program/{id}/lets-chat/prior-notice",
    tag = "program",
    request_body = MentorPasswordRequest,
    responses((status = 200, body = ApiResponse<LetsChatPriorNoticeResponse>), (status = 403, description = "wrong mentor password"))
)]
#[post("/program/{id}/lets-chat/prior-notice")]
pub async fn program_prior_notice(state: AppState, id: web::Path<i64>, dto: web::Json<MentorPasswordRequest>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.prior_notice(id.into_inner(), &dto.mentor_password).await?))
}

#[utoipa::path(
    post,
    path = "/program/{id}/lets-chat/after-notice",
    tag = "program",
    request_body = MentorPasswordRequest,
    responses((status = 200, body = ApiResponse<LetsChatAfterNoticeResponse>))
)]
#[post("/program/{id}/lets-chat/after-notice")]
pub async fn program_after_notice(state: AppState, id: web::Path<i64>, dto: web::Json<MentorPasswordRequest>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.after_notice(id.into_inner(), &dto.mentor_password).await?))
}

#[utoipa::path(get, path = "/program/{id}/email", tag = "program", params(MailTypeQuery), responses((status = 200, body = ApiResponse<EmailTemplateResponse>)))]
#[get("/program/{id}/email")]
pub async fn program_email_template(
    state: AppState,
    _admin: AdminPrincipal,
    id: web::Path<i64>,
    query: web::Query<MailTypeQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.program.email_template(id.into_inner(), query.mail_type).await?))
}

#[utoipa::path(post, path = "/program/{id}/remind-mail", tag = "program", responses((status = 200, body = ApiResponse<RemindMailReport>)))]
#[post("/program/{id}/remind-mail")]
pub async fn program_remind_mail(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.remind_job.run(id.into_inner()).await?))
}
