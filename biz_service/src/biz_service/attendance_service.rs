use crate::dto::attendance_dto::{AttendanceAdminUpdateRequest, AttendanceResponse};
use crate::dto::IdResponse;
use crate::manager::attendance_manager::AttendanceManager;
use crate::manager::session_manager::Principal;
use crate::mapper::attendance_mapper;
use common::errors::AppError;
use common::query_builder::{PageRequest, PageResult};
use std::sync::Arc;

pub struct AttendanceService {
    attendances: Arc<AttendanceManager>,
}

impl AttendanceService {
    pub fn new(attendances: Arc<AttendanceManager>) -> Self {
        Self { attendances }
    }

    pub async fn submit(&self, mission_id: i64, principal: Principal, link: &str) -> Result<IdResponse, AppError> {
        Ok(self.attendances.submit(mission_id, principal.user_id, link).await?.id.into())
    }

    pub async fn resubmit(&self, attendance_id: i64, principal: Principal, link: &str) -> Result<IdResponse, AppError> {
        Ok(self.attendances.resubmit(attendance_id, principal.user_id, link).await?.into())
    }

    pub async fn admin_update(&self, attendance_id: i64, req: &AttendanceAdminUpdateRequest) -> Result<IdResponse, AppError> {
        Ok(self.attendances.admin_update(attendance_id, req).await?.into())
    }

    pub async fn delete(&self, attendance_id: i64) -> Result<IdResponse, AppError> {
        Ok(self.attendances.delete(attendance_id).await?.into())
    }

    pub async fn get_one(&self, attendance_id: i64) -> Result<AttendanceResponse, AppError> {
        Ok(attendance_mapper::to_response(self.attendances.find_attendance(attendance_id).await?))
    }

    pub async fn list_by_mission(&self, mission_id: i64, page: &PageRequest) -> Result<PageResult<AttendanceResponse>, AppError> {
        Ok(self.attendances.list_by_mission(mission_id, page).await?.map(attendance_mapper::to_response))
    }

    pub async fn my_list(&self, principal: Principal) -> Result<Vec<AttendanceResponse>, AppError> {
        Ok(self.attendances.list_by_user(principal.user_id).await?.into_iter().map(attendance_mapper::to_response).collect())
    }
}
