use super::*;
use actix_web::{get, web, HttpResponse, Responder};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // user
        user_handler::user_sign_up,
        user_handler::user_sign_in,
        user_handler::user_sign_out,
        user_handler::user_info,
        user_handler::user_update,
        user_handler::user_admin_list,
        user_handler::user_admin_search,
        user_handler::user_change_role,
        // program
        program_handler::program_health,
        program_handler::program_count,
        program_handler::program_thumbnail_list,
        program_handler::program_detail,
        program_handler::program_admin_list,
        program_handler::program_admin_by_user,
        program_handler::program_admin_detail,
        program_handler::program_create,
        program_handler::program_update,
        program_handler::program_delete,
        program_handler::program_final_headcount,
        program_handler::program_mentor_password,
        program_handler::program_prior_notice,
        program_handler::program_after_notice,
        program_handler::program_email_template,
        program_handler::program_remind_mail,
        // application
        application_handler::application_submit,
        application_handler::application_admin_list,
        application_handler::application_my_list,
        application_handler::application_admin_by_user,
        application_handler::application_update,
        application_handler::application_update_introduction,
        application_handler::application_delete,
        application_handler::application_reject_remaining,
        application_handler::application_email_list,
        application_handler::application_challenge_list,
        application_handler::application_challenge_detail,
        // mission / attendance
        mission_handler::mission_create,
        mission_handler::mission_update,
        mission_handler::mission_delete,
        mission_handler::mission_get,
        mission_handler::mission_admin_list,
        mission_handler::mission_visible_list,
        attendance_handler::attendance_submit,
        attendance_handler::attendance_resubmit,
        attendance_handler::attendance_admin_update,
        attendance_handler::attendance_delete,
        attendance_handler::attendance_get,
        attendance_handler::attendance_admin_list,
        attendance_handler::attendance_my_list,
        // coupon / banner / memo / review / file
        coupon_handler::coupon_create,
        coupon_handler::coupon_update,
        coupon_handler::coupon_delete,
        coupon_handler::coupon_admin_list,
        coupon_handler::coupon_admin_get,
        coupon_handler::coupon_apply,
        banner_handler::banner_create,
        banner_handler::banner_update,
        banner_handler::banner_delete,
        banner_handler::banner_admin_list,
        banner_handler::banner_admin_get,
        banner_handler::banner_shown_now,
        memo_handler::memo_create,
        memo_handler::memo_list,
        memo_handler::memo_update,
        memo_handler::memo_delete,
        review_handler::review_create,
        review_handler::review_visibility,
        review_handler::review_admin_list,
        file_handler::file_upload,
        file_handler::file_delete,
    ),
    tags(
        (name = "program", description = "Programs, FAQs and LETS_CHAT notices"),
        (name = "application", description = "Applications and approval"),
    )
)]
pub struct ApiDoc;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}

#[get("/api-doc/openapi.json")]
async fn openapi_json() -> impl Responder {
    match ApiDoc::openapi().to_json() {
        Ok(json) => HttpResponse::Ok().content_type("application/json").body(json),
        Err(e) => {
            log::error!("openapi render failed: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
