use crate::dto::application_dto::{ApplicationAdminResponse, ApplicationCreateRequest, MissionProgressResponse, UserApplicationResponse};
use crate::entitys::attendance_entity::AttendanceEntity;
use crate::entitys::mission_entity::MissionEntity;
use crate::entitys::application_entity::{ApplicationEntity, ApplicationStatus, ApprovalState};
use crate::entitys::program_entity::ProgramEntity;
use crate::entitys::user_entity::UserEntity;
use crate::manager::application_manager::Applicant;
use common::util::date_util::time_to_str;

pub fn to_entity(id: i64, program_id: i64, req: &ApplicationCreateRequest, applicant: Applicant, now: i64) -> ApplicationEntity {
    let (user_id, guest_name, guest_phone_num, guest_email) = match applicant {
        Applicant::Member(user_id) => (Some(user_id), None, None, None),
        Applicant::Guest => (None, req.guest_name.clone(), req.guest_phone_num.clone(), req.guest_email.as_ref().map(|e| e.trim().to_lowercase())),
    };
    ApplicationEntity {
        id,
        program_id,
        user_id,
        guest_name,
        guest_phone_num,
        guest_email,
        status: ApplicationStatus::Applied,
        approval: ApprovalState::Undecided,
        grade: req.grade,
        wish_company: req.wish_company.clone(),
        wish_job: req.wish_job.clone(),
        apply_motive: req.apply_motive.clone(),
        introduction: None,
        attendance: None,
        create_time: now,
    }
}

/// Admin row; member contact data comes from `user`, guest data from the application.
pub fn to_admin_response(application: ApplicationEntity, user: Option<&UserEntity>) -> ApplicationAdminResponse {
    let (name, email, phone_num) = match user {
        Some(user) => (Some(user.name.clone()), Some(user.email.clone()), Some(user.phone_num.clone())),
        None => (application.guest_name.clone(), application.guest_email.clone(), application.guest_phone_num.clone()),
    };
    ApplicationAdminResponse {
        id: application.id,
        program_id: application.program_id,
        user_id: application.user_id,
        is_guest: application.is_guest(),
        name,
        email,
        phone_num,
        status: application.status,
        approval: application.approval,
        grade: application.grade,
        wish_company: application.wish_company,
        wish_job: application.wish_job,
        apply_motive: application.apply_motive,
        introduction: application.introduction,
        attendance: application.attendance,
        create_time: time_to_str(application.create_time),
    }
}

pub fn to_user_response(application: ApplicationEntity, program: Option<&ProgramEntity>) -> UserApplicationResponse {
    UserApplicationResponse {
        id: application.id,
        status: application.status,
        approval: application.approval,
        program_id: application.program_id,
        program_title: program.map(|p| p.title.clone()),
        program_type: program.map(|p| p.program_type),
        program_th: program.map(|p| p.th),
        program_status: program.map(|p| p.status),
        program_start_date: program.map(|p| time_to_str(p.start_date)),
        program_end_date: program.map(|p| time_to_str(p.end_date)),
        create_time: time_to_str(application.create_time),
    }
}

pub fn to_mission_progress(mission: &MissionEntity, attendance: Option<&AttendanceEntity>) -> MissionProgressResponse {
    MissionProgressResponse {
        mission_id: mission.id,
        th: mission.th,
        title: mission.title.clone(),
        mission_type: mission.mission_type,
        mission_status: mission.status,
        attendance_id: attendance.map(|a| a.id),
        link: attendance.map(|a| a.link.clone()),
        attendance_status: attendance.map(|a| a.status),
        attendance_result: attendance.map(|a| a.result),
        is_refunded: attendance.map(|a| a.is_refunded),
    }
}
