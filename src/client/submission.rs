use tracing::{debug, info, warn};

use crate::client::draft::{DraftStore, JOB_FORM_KEY};
use crate::client::error::ClientError;
use crate::client::form::JobForm;
use crate::client::gateway::JobsGateway;
use crate::dto::job_dto::JobPosting;

pub const CREATE_FAILED_MESSAGE: &str = "Failed to create job";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Editing,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(JobPosting),
    /// Blocked by the local checks; no request was sent.
    Rejected(String),
    /// The request was sent and did not succeed.
    Failed(String),
}

/// One HR user's editing session for a new job posting.
///
/// Every edit is written through to the draft store so the form survives a
/// restart. Submitting borrows the session mutably, which keeps at most one
/// creation request in flight.
pub struct JobPostingSession<G, S> {
    gateway: G,
    drafts: S,
    form: JobForm,
    phase: SubmissionPhase,
    error: Option<String>,
}

impl<G, S> JobPostingSession<G, S>
where
    G: JobsGateway,
    S: DraftStore,
{
    /// Starts a session, restoring the stored draft when there is a readable one.
    pub fn open(gateway: G, drafts: S) -> Self {
        let form = match drafts.load(JOB_FORM_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "Discarding unreadable job form draft");
                JobForm::default()
            }),
            Ok(None) => JobForm::default(),
            Err(err) => {
                warn!(error = %err, "Could not load job form draft");
                JobForm::default()
            }
        };

        Self {
            gateway,
            drafts,
            form,
            phase: SubmissionPhase::Editing,
            error: None,
        }
    }

    pub fn form(&self) -> &JobForm {
        &self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Message from the last failed submission, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.phase != SubmissionPhase::Submitting
    }

    /// Applies a change to the form and persists the whole draft.
    pub fn edit<F>(&mut self, change: F) -> Result<(), ClientError>
    where
        F: FnOnce(&mut JobForm),
    {
        change(&mut self.form);
        self.transition(SubmissionPhase::Editing);
        self.persist()
    }

    /// Drops the draft and goes back to a blank form.
    pub fn reset(&mut self) -> Result<(), ClientError> {
        self.drafts.clear(JOB_FORM_KEY)?;
        self.form = JobForm::default();
        self.error = None;
        self.transition(SubmissionPhase::Editing);
        Ok(())
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.error = None;
        self.transition(SubmissionPhase::Validating);

        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                let message = err.user_message_or(CREATE_FAILED_MESSAGE);
                self.fail(message.clone());
                return SubmitOutcome::Rejected(message);
            }
        };

        self.transition(SubmissionPhase::Submitting);
        match self.gateway.create_job(&payload).await {
            Ok(job) => {
                if let Err(err) = self.drafts.clear(JOB_FORM_KEY) {
                    warn!(error = %err, "Could not clear job form draft");
                }
                self.form = JobForm::default();
                self.transition(SubmissionPhase::Succeeded);
                info!(job_id = %job.id, "Job posted");
                SubmitOutcome::Created(job)
            }
            Err(err) => {
                warn!(error = %err, "Job submission failed");
                let message = err.user_message_or(CREATE_FAILED_MESSAGE);
                self.fail(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.transition(SubmissionPhase::Failed);
        self.error = Some(message);
        self.transition(SubmissionPhase::Editing);
    }

    fn transition(&mut self, next: SubmissionPhase) {
        if self.phase != next {
            debug!(from = ?self.phase, to = ?next, "Job form phase change");
            self.phase = next;
        }
    }

    fn persist(&self) -> Result<(), ClientError> {
        let raw = serde_json::to_string(&self.form)?;
        self.drafts.save(JOB_FORM_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::draft::MemoryDraftStore;
    use crate::client::form::{DESCRIPTION_TOO_SHORT, SKILLS_REQUIRED};
    use crate::client::gateway::MockJobsGateway;
    use crate::dto::job_dto::CreateJobPayload;
    use crate::models::job::{JobType, WorkType};
    use tokio_test::assert_ok;
    use uuid::Uuid;

    fn posting_for(payload: &CreateJobPayload) -> JobPosting {
        serde_json::from_value(serde_json::json!({
            "_id": Uuid::new_v4(),
            "title": payload.title,
            "description": payload.description,
            "department": payload.department,
            "technicalSkills": payload.technical_skills,
            "softSkills": payload.soft_skills,
            "requiredSkills": payload.required_skills,
            "workType": payload.work_type,
            "jobType": payload.job_type,
            "location": payload.location,
        }))
        .unwrap()
    }

    fn fill(form: &mut JobForm) {
        form.title = "Front-End Developer".into();
        form.department = "IT".into();
        form.description = "Build the candidate-facing job pages.".into();
        form.technical_skills = "React, Node.js, ".into();
        form.location = "Cairo".into();
    }

    #[tokio::test]
    async fn successful_submission_clears_draft_and_form() {
        let drafts = MemoryDraftStore::new();
        let mut gateway = MockJobsGateway::new();
        gateway
            .expect_create_job()
            .withf(|payload| {
                payload.required_skills == Some(vec!["React".to_string(), "Node.js".to_string()])
                    && payload.job_type == Some(JobType::FullTime)
            })
            .times(1)
            .returning(|payload| Ok(posting_for(payload)));

        let mut session = JobPostingSession::open(gateway, drafts.clone());
        assert_ok!(session.edit(fill));
        assert!(drafts.load(JOB_FORM_KEY).unwrap().is_some());

        let outcome = session.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Created(ref job) if job.title == "Front-End Developer"));
        assert_eq!(session.phase(), SubmissionPhase::Succeeded);
        assert_eq!(session.form(), &JobForm::default());
        assert_eq!(drafts.load(JOB_FORM_KEY).unwrap(), None);
        assert!(session.can_submit());
    }

    #[tokio::test]
    async fn short_description_never_reaches_the_network() {
        let drafts = MemoryDraftStore::new();
        let mut gateway = MockJobsGateway::new();
        gateway.expect_create_job().times(0);

        let mut session = JobPostingSession::open(gateway, drafts.clone());
        assert_ok!(session.edit(|form| {
            fill(form);
            form.description = "0123456789".into();
        }));

        let outcome = session.submit().await;
        assert_eq!(outcome, SubmitOutcome::Rejected(DESCRIPTION_TOO_SHORT.to_string()));
        assert_eq!(session.phase(), SubmissionPhase::Editing);
        assert_eq!(session.error(), Some(DESCRIPTION_TOO_SHORT));
        assert_eq!(session.form().description, "0123456789");
        assert!(drafts.load(JOB_FORM_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn missing_skills_never_reach_the_network() {
        let mut gateway = MockJobsGateway::new();
        gateway.expect_create_job().times(0);

        let mut session = JobPostingSession::open(gateway, MemoryDraftStore::new());
        assert_ok!(session.edit(|form| {
            fill(form);
            form.technical_skills = ",,".into();
            form.soft_skills = " ".into();
        }));

        let outcome = session.submit().await;
        assert_eq!(outcome, SubmitOutcome::Rejected(SKILLS_REQUIRED.to_string()));
    }

    #[tokio::test]
    async fn server_failure_keeps_input_and_surfaces_message() {
        let drafts = MemoryDraftStore::new();
        let mut gateway = MockJobsGateway::new();
        gateway.expect_create_job().times(1).returning(|_| {
            Err(ClientError::Api {
                status: 400,
                message: Some("Location is required".into()),
            })
        });

        let mut session = JobPostingSession::open(gateway, drafts.clone());
        assert_ok!(session.edit(|form| {
            fill(form);
            form.work_type = WorkType::Remote;
        }));
        let before = session.form().clone();

        let outcome = session.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed("Location is required".into()));
        assert_eq!(session.phase(), SubmissionPhase::Editing);
        assert_eq!(session.form(), &before);
        assert!(drafts.load(JOB_FORM_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_message() {
        let mut gateway = MockJobsGateway::new();
        gateway
            .expect_create_job()
            .returning(|_| Err(ClientError::Config("connection refused".into())));

        let mut session = JobPostingSession::open(gateway, MemoryDraftStore::new());
        assert_ok!(session.edit(fill));

        let outcome = session.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed(CREATE_FAILED_MESSAGE.into()));
        assert_eq!(session.error(), Some(CREATE_FAILED_MESSAGE));
    }

    #[test]
    fn reopening_restores_the_draft() {
        let drafts = MemoryDraftStore::new();
        let mut first = JobPostingSession::open(MockJobsGateway::new(), drafts.clone());
        assert_ok!(first.edit(|form| form.title = "Saved title".into()));
        assert_ok!(first.edit(|form| form.soft_skills = "Teamwork".into()));

        let second = JobPostingSession::open(MockJobsGateway::new(), drafts.clone());
        assert_eq!(second.form().title, "Saved title");
        assert_eq!(second.form().soft_skills, "Teamwork");
    }

    #[test]
    fn corrupt_draft_falls_back_to_defaults() {
        let drafts = MemoryDraftStore::new();
        drafts.save(JOB_FORM_KEY, "{not json").unwrap();

        let session = JobPostingSession::open(MockJobsGateway::new(), drafts);
        assert_eq!(session.form(), &JobForm::default());
    }

    #[test]
    fn reset_clears_the_draft() {
        let drafts = MemoryDraftStore::new();
        let mut session = JobPostingSession::open(MockJobsGateway::new(), drafts.clone());
        assert_ok!(session.edit(fill));
        assert_ok!(session.reset());
        assert_eq!(session.form(), &JobForm::default());
        assert_eq!(drafts.load(JOB_FORM_KEY).unwrap(), None);
    }
}
