use crate::entitys::mail_entity::{MailEntity, MailType};
use crate::repos::Repo;
use async_trait::async_trait;
use common::config::MailConfig;
use common::errors::AppError;
use common::util::common_utils::build_snow_id;
use common::util::date_util::now;
use log::info;

/// A mail ready to be queued.
#[derive(Debug, Clone)]
pub struct MailDraft {
    pub program_id: i64,
    pub mail_type: MailType,
    pub recipients: Vec<String>,
    pub subject: String,
    pub contents: String,
}

#[async_trait]
pub trait MailOutbox: Send + Sync {
    /// Queues the mail for delivery and returns the outbox record id.
    async fn enqueue(&self, draft: MailDraft) -> Result<i64, AppError>;
}

/// Outbox stored next to the business data; delivery reads it elsewhere.
pub struct MailService {
    repo: Repo<MailEntity>,
    sender: String,
}

impl MailService {
    pub fn new(repo: Repo<MailEntity>, config: &MailConfig) -> Self {
        Self { repo, sender: config.sender.clone() }
    }
}

#[async_trait]
impl MailOutbox for MailService {
    async fn enqueue(&self, draft: MailDraft) -> Result<i64, AppError> {
        let mail = MailEntity {
            id: build_snow_id(),
            program_id: draft.program_id,
            mail_type: draft.mail_type,
            sender: self.sender.clone(),
            recipients: draft.recipients,
            subject: draft.subject,
            contents: draft.contents,
            create_time: now(),
        };
        self.repo.insert(&mail).await?;
        info!("{} mail {} queued for program {} ({} recipients)", mail.mail_type, mail.id, mail.program_id, mail.recipients.len());
        Ok(mail.id)
    }
}
