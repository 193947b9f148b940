use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::job::{ExperienceLevel, Job, JobStatus, JobType, OpeningReason, WorkType};
use crate::services::job_service::JobList;
use crate::services::normalizer::build_required_skills;

pub const DEFAULT_CURRENCY: &str = "EGP";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub min: Option<i32>,
    pub max: Option<i32>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for Salary {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualifications {
    pub degree: Option<String>,
    #[serde(default)]
    pub years_of_experience: i32,
    #[serde(default)]
    pub certificates: Vec<String>,
}

/// Sign-offs collected before a posting goes out. Each one is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approvals {
    #[serde(default)]
    pub direct_manager_approval: bool,
    #[serde(default)]
    pub finance_approval: bool,
    #[serde(default)]
    pub general_manager_approval: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDetails {
    pub company_logo: Option<String>,
    pub company_description: Option<String>,
    /// Email address when it contains `@`, a URL otherwise.
    pub application_link: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Body of `POST /api/jobs`.
///
/// `requiredSkills` and `jobType` are accepted from older clients but never
/// stored as sent: both are derived from the canonical fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_job_payload"))]
pub struct CreateJobPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<String>>,
    #[serde(default)]
    pub qualifications: Qualifications,
    pub experience_level: Option<ExperienceLevel>,
    pub work_type: Option<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub salary: Option<Salary>,
    pub expected_start_date: Option<String>,
    pub opening_reason: Option<OpeningReason>,
    pub direct_manager: Option<String>,
    #[serde(default)]
    pub approvals: Approvals,
    #[serde(default)]
    pub publication_details: PublicationDetails,
    pub status: Option<JobStatus>,
    pub company_id: Option<Uuid>,
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_job_payload(payload: &CreateJobPayload) -> Result<(), ValidationError> {
    if payload.title.trim().is_empty() {
        return Err(validation_error("title", "Title is required"));
    }
    if payload.department.trim().is_empty() {
        return Err(validation_error("department", "Department is required"));
    }
    if payload.location.trim().is_empty() {
        return Err(validation_error("location", "Location is required"));
    }

    let has_skill = payload
        .technical_skills
        .iter()
        .chain(payload.soft_skills.iter())
        .chain(payload.required_skills.iter().flatten())
        .any(|skill| !skill.trim().is_empty());
    if !has_skill {
        return Err(validation_error(
            "skills",
            "Please add at least one skill (technical or soft)",
        ));
    }

    if payload.qualifications.years_of_experience < 0 {
        return Err(validation_error(
            "years_of_experience",
            "Years of experience cannot be negative",
        ));
    }

    if let Some(salary) = &payload.salary {
        if salary.min.is_some_and(|v| v < 0) || salary.max.is_some_and(|v| v < 0) {
            return Err(validation_error("salary", "Salary cannot be negative"));
        }
        if let (Some(min), Some(max)) = (salary.min, salary.max) {
            if min > max {
                return Err(validation_error(
                    "salary_range",
                    "Minimum salary cannot exceed maximum salary",
                ));
            }
        }
    }

    Ok(())
}

/// A job posting as served to clients. Carries both the canonical fields and
/// the derived legacy ones, so older readers keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub department: String,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub qualifications: Qualifications,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub work_type: Option<WorkType>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: Option<Salary>,
    #[serde(default)]
    pub expected_start_date: Option<String>,
    #[serde(default)]
    pub opening_reason: Option<OpeningReason>,
    #[serde(default)]
    pub direct_manager: Option<String>,
    #[serde(default)]
    pub approvals: Approvals,
    #[serde(default)]
    pub publication_details: PublicationDetails,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub applicants_count: i32,
    #[serde(default)]
    pub posted_by: Option<Uuid>,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    /// Modality label to show: the bilingual `workType`, falling back to the
    /// legacy `jobType` for records that predate it.
    pub fn display_work_type(&self) -> Option<&'static str> {
        self.work_type
            .map(WorkType::label)
            .or_else(|| self.job_type.map(JobType::label))
    }

    /// Legacy modality, derived from `workType` when the record lacks one.
    pub fn legacy_job_type(&self) -> JobType {
        self.job_type
            .or_else(|| self.work_type.map(WorkType::legacy_job_type))
            .unwrap_or_default()
    }

    /// All skills, preferring the split lists over the legacy aggregate.
    pub fn skills(&self) -> Vec<&str> {
        if self.technical_skills.is_empty() && self.soft_skills.is_empty() {
            self.required_skills.iter().map(String::as_str).collect()
        } else {
            self.technical_skills
                .iter()
                .chain(self.soft_skills.iter())
                .map(String::as_str)
                .collect()
        }
    }
}

impl From<Job> for JobPosting {
    fn from(value: Job) -> Self {
        let work_type = value.work_type.parse::<WorkType>().ok();
        if work_type.is_none() {
            tracing::warn!(job_id = %value.id, work_type = %value.work_type, "Stored work type not recognised");
        }
        let required_skills = build_required_skills(&value.technical_skills, &value.soft_skills);

        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            department: value.department,
            technical_skills: value.technical_skills,
            soft_skills: value.soft_skills,
            required_skills,
            qualifications: Qualifications {
                degree: value.degree,
                years_of_experience: value.years_of_experience,
                certificates: value.certificates,
            },
            experience_level: value.experience_level.and_then(|v| v.parse().ok()),
            work_type,
            job_type: work_type.map(WorkType::legacy_job_type),
            location: value.location,
            salary: Some(Salary {
                min: value.salary_min,
                max: value.salary_max,
                currency: value.salary_currency,
            }),
            expected_start_date: value.expected_start_date,
            opening_reason: value.opening_reason.and_then(|v| v.parse().ok()),
            direct_manager: value.direct_manager,
            approvals: Approvals {
                direct_manager_approval: value.direct_manager_approval,
                finance_approval: value.finance_approval,
                general_manager_approval: value.general_manager_approval,
            },
            publication_details: PublicationDetails {
                company_logo: value.company_logo,
                company_description: value.company_description,
                application_link: value.application_link,
                deadline: value.deadline,
            },
            status: value.status.parse().unwrap_or_default(),
            applicants_count: value.applicants_count,
            posted_by: Some(value.posted_by),
            company_id: value.company_id,
            created_at: Some(value.created_at),
            updated_at: Some(value.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<JobStatus>,
    pub department: Option<String>,
    pub search: Option<String>,
}

impl JobListQuery {
    /// `(page, per_page, offset)`: page starts at 1, per_page is clamped to
    /// 1..=100 and the offset saturates instead of overflowing.
    pub fn paging(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobPosting>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<JobList> for JobListResponse {
    fn from(value: JobList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
