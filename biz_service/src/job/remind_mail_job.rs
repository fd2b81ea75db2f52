use crate::biz_service::mail_service::{MailDraft, MailOutbox};
use crate::entitys::mail_entity::MailType;
use crate::entitys::program_entity::MailStatus;
use crate::manager::application_manager::ApplicationManager;
use crate::manager::program_manager::ProgramManager;
use crate::mapper::program_mapper;
use common::errors::AppError;
use log::{error, info};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemindMailReport {
    pub program_id: i64,
    pub recipients: usize,
    /// Outbox record, absent when nobody was approved.
    pub mail_id: Option<i64>,
}

/// Reminder for approved applicants, run shortly before a program starts.
///
/// Step one queues the mail, step two marks the program. A failing first
/// step leaves the program unmarked so the job can simply be rerun.
pub struct RemindMailJob {
    programs: Arc<ProgramManager>,
    applications: Arc<ApplicationManager>,
    outbox: Arc<dyn MailOutbox>,
    service_name: String,
}

impl RemindMailJob {
    pub fn new(programs: Arc<ProgramManager>, applications: Arc<ApplicationManager>, outbox: Arc<dyn MailOutbox>, service_name: &str) -> Self {
        Self { programs, applications, outbox, service_name: service_name.to_string() }
    }

    pub async fn run(&self, program_id: i64) -> Result<RemindMailReport, AppError> {
        let report = self.queue_reminder(program_id).await.inspect_err(|e| {
            error!("remind mail for program {} failed, program left unmarked: {}", program_id, e);
        })?;
        self.programs.mark_mail_status(program_id, MailStatus::Remind).await?;
        info!("remind mail job done for program {}: {:?}", program_id, report);
        Ok(report)
    }

    async fn queue_reminder(&self, program_id: i64) -> Result<RemindMailReport, AppError> {
        let program = self.programs.find_program(program_id).await?;
        let recipients = self.applications.approved_emails(program_id).await?;
        if recipients.is_empty() {
            return Ok(RemindMailReport { program_id, recipients: 0, mail_id: None });
        }

        let (subject, contents) = program_mapper::email_template(&program, MailType::Remind, &self.service_name);
        let count = recipients.len();
        let mail_id = self
            .outbox
            .enqueue(MailDraft { program_id, mail_type: MailType::Remind, recipients, subject, contents })
            .await?;
        Ok(RemindMailReport { program_id, recipients: count, mail_id: Some(mail_id) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biz_service::mail_service::MailService;
    use crate::dto::application_dto::{ApplicationCreateRequest, ApplicationUpdateRequest};
    use crate::entitys::program_entity::ProgramType;
    use crate::manager::application_manager::Applicant;
    use crate::repos::Repos;
    use crate::test_support::{program_request, test_repos, StubMeetingClient};
    use async_trait::async_trait;
    use common::config::MailConfig;
    use mongodb::bson::doc;

    struct BrokenOutbox;

    #[async_trait]
    impl MailOutbox for BrokenOutbox {
        async fn enqueue(&self, _draft: MailDraft) -> Result<i64, AppError> {
            Err(AppError::Internal("outbox unavailable".to_string()))
        }
    }

    struct Fixture {
        repos: Repos,
        programs: Arc<ProgramManager>,
        applications: Arc<ApplicationManager>,
    }

    impl Fixture {
        fn new() -> Self {
            let repos = test_repos();
            let programs = Arc::new(ProgramManager::new(repos.clone(), Arc::new(StubMeetingClient::default())));
            let applications = Arc::new(ApplicationManager::new(repos.clone(), programs.clone()));
            Self { repos, programs, applications }
        }

        fn job(&self, outbox: Arc<dyn MailOutbox>) -> RemindMailJob {
            RemindMailJob::new(self.programs.clone(), self.applications.clone(), outbox, "Intern Hub")
        }

        fn outbox(&self) -> Arc<dyn MailOutbox> {
            Arc::new(MailService::new(self.repos.mail.clone(), &MailConfig::default()))
        }

        async fn program_with_approved_guest(&self) -> i64 {
            let program = self.programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();
            let req = ApplicationCreateRequest {
                guest_name: Some("Guest".into()),
                guest_phone_num: Some("010-9999-9999".into()),
                guest_email: Some("g@x.io".into()),
                ..Default::default()
            };
            let application = self.applications.submit(program.id, &req, Applicant::Guest).await.unwrap();
            let approve = ApplicationUpdateRequest { is_approved: Some(true), ..Default::default() };
            self.applications.update(application.id, &approve).await.unwrap();
            program.id
        }
    }

    #[tokio::test]
    async fn queues_mail_then_marks_program() {
        let f = Fixture::new();
        let program_id = f.program_with_approved_guest().await;

        let report = f.job(f.outbox()).run(program_id).await.unwrap();
        assert_eq!(report.recipients, 1);
        assert!(report.mail_id.is_some());
        assert_eq!(f.programs.find_program(program_id).await.unwrap().mail_status, MailStatus::Remind);

        let mail = f.repos.mail.find_one(doc! { "program_id": program_id }).await.unwrap().unwrap();
        assert_eq!(mail.recipients, vec!["g@x.io".to_string()]);
        assert_eq!(mail.mail_type, MailType::Remind);
    }

    #[tokio::test]
    async fn nobody_approved_still_marks_program() {
        let f = Fixture::new();
        let program = f.programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();
        let report = f.job(f.outbox()).run(program.id).await.unwrap();
        assert_eq!(report.mail_id, None);
        assert_eq!(f.repos.mail.count(doc! {}).await.unwrap(), 0);
        assert_eq!(f.programs.find_program(program.id).await.unwrap().mail_status, MailStatus::Remind);
    }

    #[tokio::test]
    async fn failed_enqueue_skips_marking() {
        let f = Fixture::new();
        let program_id = f.program_with_approved_guest().await;
        assert!(f.job(Arc::new(BrokenOutbox)).run(program_id).await.is_err());
        assert_eq!(f.programs.find_program(program_id).await.unwrap().mail_status, MailStatus::None);
    }
}
