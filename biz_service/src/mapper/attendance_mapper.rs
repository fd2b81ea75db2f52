use crate::dto::attendance_dto::AttendanceResponse;
use crate::entitys::attendance_entity::{AttendanceEntity, AttendanceResult, AttendanceStatus};
use crate::entitys::mission_entity::MissionEntity;
use common::util::date_util::time_to_str;

pub fn to_entity(id: i64, mission: &MissionEntity, user_id: i64, link: &str, now: i64) -> AttendanceEntity {
    AttendanceEntity {
        id,
        mission_id: mission.id,
        user_id,
        link: link.to_string(),
        status: AttendanceStatus::for_submission(now, mission.end_date),
        result: AttendanceResult::Waiting,
        is_refunded: false,
        comments: None,
        create_time: now,
    }
}

pub fn to_response(attendance: AttendanceEntity) -> AttendanceResponse {
    AttendanceResponse {
        id: attendance.id,
        mission_id: attendance.mission_id,
        user_id: attendance.user_id,
        link: attendance.link,
        status: attendance.status,
        result: attendance.result,
        is_refunded: attendance.is_refunded,
        comments: attendance.comments,
        create_time: time_to_str(attendance.create_time),
    }
}
