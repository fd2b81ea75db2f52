use crate::dto::attendance_dto::AttendanceAdminUpdateRequest;
use crate::entitys::attendance_entity::{AttendanceEntity, AttendanceStatus};
use crate::error_code::{on_duplicate, ErrorCode};
use crate::mapper::attendance_mapper;
use crate::repos::Repos;
use common::errors::AppError;
use common::query_builder::{newest_first, PageRequest, PageResult, QueryBuilder};
use common::util::common_utils::build_snow_id;
use common::util::date_util::now;
use log::{info, warn};
use mongodb::bson::doc;

pub struct AttendanceManager {
    repos: Repos,
}

impl AttendanceManager {
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }

    pub async fn find_attendance(&self, attendance_id: i64) -> Result<AttendanceEntity, AppError> {
        self.repos.attendance.find_by_id(attendance_id).await?.ok_or_else(|| ErrorCode::AttendanceNotFound.into())
    }

    /// First submission of a mission link; PRESENT until the mission ends, LATE after.
    pub async fn submit(&self, mission_id: i64, user_id: i64, link: &str) -> Result<AttendanceEntity, AppError> {
        let mission = self.repos.mission.find_by_id(mission_id).await?.ok_or(AppError::from(ErrorCode::MissionNotFound))?;
        if self.repos.attendance.count(doc! { "mission_id": mission_id, "user_id": user_id }).await? > 0 {
            warn!("user {} already attended mission {}", user_id, mission_id);
            return Err(ErrorCode::DuplicateAttendance.into());
        }
        let attendance = attendance_mapper::to_entity(build_snow_id(), &mission, user_id, link, now());
        self.repos.attendance.insert(&attendance).await.map_err(on_duplicate(ErrorCode::DuplicateAttendance))?;
        info!("attendance {} for mission {} by user {} is {}", attendance.id, mission_id, user_id, attendance.status);
        Ok(attendance)
    }

    /// A member replacing their own link.
    pub async fn resubmit(&self, attendance_id: i64, user_id: i64, link: &str) -> Result<i64, AppError> {
        let attendance = self.find_attendance(attendance_id).await?;
        if attendance.user_id != user_id {
            return Err(ErrorCode::AttendanceNotFound.into());
        }
        self.repos
            .attendance
            .update_one(doc! { "_id": attendance_id }, doc! { "$set": { "link": link, "status": AttendanceStatus::Updated.as_ref() } })
            .await?;
        Ok(attendance_id)
    }

    pub async fn admin_update(&self, attendance_id: i64, req: &AttendanceAdminUpdateRequest) -> Result<i64, AppError> {
        let mut attendance = self.find_attendance(attendance_id).await?;
        common::merge_fields!(attendance, req; status, result, is_refunded);
        common::merge_opt_fields!(attendance, req; comments);
        self.repos.attendance.save(attendance.id, &attendance).await?;
        info!("attendance {} reviewed: {} / {}", attendance.id, attendance.status, attendance.result);
        Ok(attendance.id)
    }

    pub async fn delete(&self, attendance_id: i64) -> Result<i64, AppError> {
        if self.repos.attendance.delete_by_id(attendance_id).await? == 0 {
            return Err(ErrorCode::AttendanceNotFound.into());
        }
        Ok(attendance_id)
    }

    pub async fn list_by_mission(&self, mission_id: i64, page: &PageRequest) -> Result<PageResult<AttendanceEntity>, AppError> {
        self.repos.attendance.query_by_page(doc! { "mission_id": mission_id }, Some(newest_first()), page).await
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<AttendanceEntity>, AppError> {
        self.repos.attendance.find_all(doc! { "user_id": user_id }, Some(newest_first())).await
    }

    /// Attendances of the given members over the given missions.
    pub async fn list_for_missions(&self, mission_ids: Vec<i64>, user_ids: Vec<i64>) -> Result<Vec<AttendanceEntity>, AppError> {
        if mission_ids.is_empty() || user_ids.is_empty() {
            return Ok(vec![]);
        }
        let filter = QueryBuilder::new().in_array("mission_id", mission_ids).in_array("user_id", user_ids).build();
        self.repos.attendance.find_all(filter, None).await
    }
}
