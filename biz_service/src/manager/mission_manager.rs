use crate::dto::mission_dto::{MissionCreateRequest, MissionUpdateRequest};
use crate::entitys::mission_entity::MissionEntity;
use crate::error_code::ErrorCode;
use crate::mapper::{mission_mapper, parse_opt_date_field};
use crate::repos::Repos;
use common::errors::AppError;
use common::query_builder::{sort_by, OrderType, PageRequest, PageResult};
use common::util::common_utils::build_snow_id;
use log::info;
use mongodb::bson::{doc, Document};

fn by_day() -> Document {
    sort_by("th", OrderType::Asc)
}

pub struct MissionManager {
    repos: Repos,
}

impl MissionManager {
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }

    pub async fn find_mission(&self, mission_id: i64) -> Result<MissionEntity, AppError> {
        self.repos.mission.find_by_id(mission_id).await?.ok_or_else(|| ErrorCode::MissionNotFound.into())
    }

    pub async fn create(&self, program_id: i64, req: &MissionCreateRequest) -> Result<i64, AppError> {
        if self.repos.program.find_by_id(program_id).await?.is_none() {
            return Err(ErrorCode::ProgramNotFound.into());
        }
        let mission = mission_mapper::to_entity(build_snow_id(), program_id, req)?;
        self.repos.mission.insert(&mission).await?;
        info!("mission {} (day {}) created for program {}", mission.id, mission.th, program_id);
        Ok(mission.id)
    }

    pub async fn update(&self, mission_id: i64, req: &MissionUpdateRequest) -> Result<i64, AppError> {
        let mut mission = self.find_mission(mission_id).await?;
        let start_date = parse_opt_date_field("startDate", req.start_date.as_deref())?;
        let end_date = parse_opt_date_field("endDate", req.end_date.as_deref())?;

        common::merge_fields!(mission, req; th, title, contents, mission_type, status, refund, is_visible);
        common::merge_opt_fields!(mission, req; guide, template_link);
        common::util::patch::set_if_some(&mut mission.start_date, start_date);
        common::util::patch::set_if_some(&mut mission.end_date, end_date);

        self.repos.mission.save(mission.id, &mission).await?;
        Ok(mission.id)
    }

    pub async fn delete(&self, mission_id: i64) -> Result<i64, AppError> {
        if self.repos.mission.delete_by_id(mission_id).await? == 0 {
            return Err(ErrorCode::MissionNotFound.into());
        }
        info!("mission {} deleted", mission_id);
        Ok(mission_id)
    }

    pub async fn list_by_program(&self, program_id: i64, page: &PageRequest) -> Result<PageResult<MissionEntity>, AppError> {
        self.repos.mission.query_by_page(doc! { "program_id": program_id }, Some(by_day()), page).await
    }

    /// Every mission of a program, hidden ones included, by day.
    pub async fn all_by_program(&self, program_id: i64) -> Result<Vec<MissionEntity>, AppError> {
        self.repos.mission.find_all(doc! { "program_id": program_id }, Some(by_day())).await
    }

    /// Visible missions of a program, by day.
    pub async fn visible_by_program(&self, program_id: i64) -> Result<Vec<MissionEntity>, AppError> {
        self.repos.mission.find_all(doc! { "program_id": program_id, "is_visible": true }, Some(by_day())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entitys::mission_entity::MissionStatus;
    use crate::error_code::is_code;
    use crate::test_support::{insert_program, mission_request, test_repos};

    #[tokio::test]
    async fn mission_requires_program() {
        let missions = MissionManager::new(test_repos());
        let err = missions.create(1, &mission_request(1, 1)).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ProgramNotFound));
    }

    #[tokio::test]
    async fn crud_and_listing() {
        let repos = test_repos();
        let missions = MissionManager::new(repos.clone());
        let program_id = insert_program(&repos).await;

        let second = missions.create(program_id, &mission_request(2, 2)).await.unwrap();
        let first = missions.create(program_id, &mission_request(1, 1)).await.unwrap();

        let listed = missions.list_by_program(program_id, &PageRequest::default()).await.unwrap();
        assert_eq!(listed.items.iter().map(|m| m.id).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(missions.visible_by_program(program_id).await.unwrap().len(), 1);

        let patch = MissionUpdateRequest { status: Some(MissionStatus::CheckDone), ..Default::default() };
        missions.update(first, &patch).await.unwrap();
        let stored = missions.find_mission(first).await.unwrap();
        assert_eq!(stored.status, MissionStatus::CheckDone);
        assert_eq!(stored.title, "day 1");

        missions.delete(first).await.unwrap();
        let err = missions.delete(first).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::MissionNotFound));
    }
}
