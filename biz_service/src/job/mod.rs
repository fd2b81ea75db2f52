pub mod remind_mail_job;
