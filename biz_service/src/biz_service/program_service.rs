use crate::dto::program_dto::{
    AdminProgramQuery, EmailTemplateResponse, FinalHeadcountResponse, LetsChatAfterNoticeResponse, LetsChatPriorNoticeResponse,
    MentorPasswordResponse, ProgramAdminResponse, ProgramCountResponse, ProgramCreateRequest, ProgramDetailResponse,
    ProgramThumbnailResponse, ProgramUpdateRequest,
};
use crate::dto::application_dto::UserApplicationResponse;
use crate::dto::IdResponse;
use crate::entitys::mail_entity::MailType;
use crate::entitys::program_entity::ProgramType;
use crate::manager::application_manager::ApplicationManager;
use crate::manager::program_manager::ProgramManager;
use crate::manager::review_manager::ReviewManager;
use crate::manager::session_manager::Principal;
use crate::mapper::{application_mapper, program_mapper, review_mapper};
use common::errors::AppError;
use common::query_builder::{PageRequest, PageResult};
use std::collections::HashMap;
use std::sync::Arc;

pub struct ProgramService {
    programs: Arc<ProgramManager>,
    applications: Arc<ApplicationManager>,
    reviews: Arc<ReviewManager>,
    service_name: String,
}

impl ProgramService {
    pub fn new(programs: Arc<ProgramManager>, applications: Arc<ApplicationManager>, reviews: Arc<ReviewManager>, service_name: &str) -> Self {
        Self { programs, applications, reviews, service_name: service_name.to_string() }
    }

    pub async fn thumbnail_list(&self, program_type: Option<ProgramType>, page: &PageRequest) -> Result<PageResult<ProgramThumbnailResponse>, AppError> {
        Ok(self.programs.thumbnail_list(program_type, page).await?.map(program_mapper::to_thumbnail))
    }

    pub async fn detail(&self, program_id: i64, principal: Option<Principal>) -> Result<ProgramDetailResponse, AppError> {
        let program = self.programs.find_program(program_id).await?;
        let faqs = self.programs.faqs(program_id).await?;
        let reviews = self.reviews.visible_by_program(program_id).await?.into_iter().map(review_mapper::to_response).collect();
        let is_applied = match principal {
            Some(p) => self.applications.has_applied(program_id, p.user_id).await?,
            None => false,
        };
        Ok(program_mapper::to_detail(program, faqs, reviews, is_applied))
    }

    pub async fn admin_list(&self, query: &AdminProgramQuery, page: &PageRequest) -> Result<PageResult<ProgramAdminResponse>, AppError> {
        Ok(self.programs.admin_list(query.program_type, query.th, page).await?.map(program_mapper::to_admin_response))
    }

    pub async fn admin_detail(&self, program_id: i64) -> Result<ProgramAdminResponse, AppError> {
        Ok(program_mapper::to_admin_response(self.programs.find_program(program_id).await?))
    }

    /// Programs a user applied to, newest application first, with the application state.
    pub async fn user_programs(&self, user_id: i64, page: &PageRequest) -> Result<PageResult<UserApplicationResponse>, AppError> {
        let applications = self.applications.list_by_user(user_id, page).await?;
        let program_ids = applications.items.iter().map(|a| a.program_id).collect();
        let programs: HashMap<_, _> = self.programs.find_by_ids(program_ids).await?.into_iter().map(|p| (p.id, p)).collect();
        Ok(applications.map(|a| {
            let program = programs.get(&a.program_id);
            application_mapper::to_user_response(a, program)
        }))
    }

    pub async fn count_done(&self) -> Result<ProgramCountResponse, AppError> {
        Ok(ProgramCountResponse { count: self.programs.count_done().await? })
    }

    pub async fn create(&self, req: &ProgramCreateRequest) -> Result<IdResponse, AppError> {
        Ok(self.programs.create(req).await?.id.into())
    }

    pub async fn update(&self, program_id: i64, req: &ProgramUpdateRequest) -> Result<IdResponse, AppError> {
        Ok(self.programs.update(program_id, req).await?.into())
    }

    pub async fn delete(&self, program_id: i64) -> Result<IdResponse, AppError> {
        Ok(self.programs.delete(program_id).await?.into())
    }

    pub async fn save_final_headcount(&self, program_id: i64) -> Result<FinalHeadcountResponse, AppError> {
        Ok(FinalHeadcountResponse { final_head_count: self.programs.save_final_headcount(program_id).await? })
    }

    pub async fn mentor_password(&self, program_id: i64) -> Result<MentorPasswordResponse, AppError> {
        Ok(MentorPasswordResponse { mentor_password: self.programs.mentor_password(program_id).await? })
    }

    pub async fn prior_notice(&self, program_id: i64, mentor_password: &str) -> Result<LetsChatPriorNoticeResponse, AppError> {
        let program = self.programs.check_mentor_password(program_id, mentor_password).await?;
        let motives = self.applications.approved_motives(program_id).await?;
        Ok(program_mapper::to_prior_notice(program, motives))
    }

    pub async fn after_notice(&self, program_id: i64, mentor_password: &str) -> Result<LetsChatAfterNoticeResponse, AppError> {
        let program = self.programs.check_mentor_password(program_id, mentor_password).await?;
        Ok(program_mapper::to_after_notice(&program))
    }

    /// Recipients and text of a lifecycle mail, for the admin to review or send.
    pub async fn email_template(&self, program_id: i64, mail_type: MailType) -> Result<EmailTemplateResponse, AppError> {
        let program = self.programs.find_program(program_id).await?;
        let email_list = self.applications.approved_emails(program_id).await?;
        let (subject, contents) = program_mapper::email_template(&program, mail_type, &self.service_name);
        Ok(EmailTemplateResponse { email_list, subject, contents })
    }
}
