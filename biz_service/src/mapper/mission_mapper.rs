use crate::dto::mission_dto::{MissionCreateRequest, MissionResponse};
use crate::entitys::mission_entity::{MissionEntity, MissionStatus};
use crate::mapper::parse_date_field;
use common::errors::AppError;
use common::util::date_util::time_to_str;

pub fn to_entity(id: i64, program_id: i64, req: &MissionCreateRequest) -> Result<MissionEntity, AppError> {
    Ok(MissionEntity {
        id,
        program_id,
        th: req.th,
        title: req.title.clone(),
        contents: req.contents.clone(),
        guide: req.guide.clone(),
        template_link: req.template_link.clone(),
        mission_type: req.mission_type,
        status: MissionStatus::Waiting,
        refund: req.refund,
        start_date: parse_date_field("startDate", &req.start_date)?,
        end_date: parse_date_field("endDate", &req.end_date)?,
        is_visible: req.is_visible,
    })
}

pub fn to_response(mission: MissionEntity) -> MissionResponse {
    MissionResponse {
        id: mission.id,
        program_id: mission.program_id,
        th: mission.th,
        title: mission.title,
        contents: mission.contents,
        guide: mission.guide,
        template_link: mission.template_link,
        mission_type: mission.mission_type,
        status: mission.status,
        refund: mission.refund,
        start_date: time_to_str(mission.start_date),
        end_date: time_to_str(mission.end_date),
        is_visible: mission.is_visible,
    }
}
