use crate::dto::mission_dto::{MissionCreateRequest, MissionResponse, MissionUpdateRequest};
use crate::dto::IdResponse;
use crate::manager::mission_manager::MissionManager;
use crate::mapper::mission_mapper;
use common::errors::AppError;
use common::query_builder::{PageRequest, PageResult};
use std::sync::Arc;

pub struct MissionService {
    missions: Arc<MissionManager>,
}

impl MissionService {
    pub fn new(missions: Arc<MissionManager>) -> Self {
        Self { missions }
    }

    pub async fn create(&self, program_id: i64, req: &MissionCreateRequest) -> Result<IdResponse, AppError> {
        Ok(self.missions.create(program_id, req).await?.into())
    }

    pub async fn update(&self, mission_id: i64, req: &MissionUpdateRequest) -> Result<IdResponse, AppError> {
        Ok(self.missions.update(mission_id, req).await?.into())
    }

    pub async fn delete(&self, mission_id: i64) -> Result<IdResponse, AppError> {
        Ok(self.missions.delete(mission_id).await?.into())
    }

    pub async fn get_one(&self, mission_id: i64) -> Result<MissionResponse, AppError> {
        Ok(mission_mapper::to_response(self.missions.find_mission(mission_id).await?))
    }

    pub async fn admin_list(&self, program_id: i64, page: &PageRequest) -> Result<PageResult<MissionResponse>, AppError> {
        Ok(self.missions.list_by_program(program_id, page).await?.map(mission_mapper::to_response))
    }

    pub async fn visible_list(&self, program_id: i64) -> Result<Vec<MissionResponse>, AppError> {
        Ok(self.missions.visible_by_program(program_id).await?.into_iter().map(mission_mapper::to_response).collect())
    }
}
