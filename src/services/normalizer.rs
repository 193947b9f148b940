//! Turns loosely shaped job input into the canonical record.
//!
//! Two representations of the same facts exist on the wire: the bilingual
//! `workType` with split technical/soft skills, and the legacy English
//! `jobType` with a single `requiredSkills` list. Only the former is stored;
//! everything here either parses free text into it or derives the latter
//! from it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, DEFAULT_CURRENCY};
use crate::models::job::{ExperienceLevel, JobStatus, JobType, OpeningReason, WorkType};

/// Splits comma-separated input, trims every token and drops the empty ones.
/// Order is kept and duplicates are not removed.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// The legacy aggregate: technical skills first, then soft skills.
pub fn build_required_skills(technical: &[String], soft: &[String]) -> Vec<String> {
    technical.iter().chain(soft.iter()).cloned().collect()
}

/// Legacy `jobType` for a raw `workType` label. Labels in either vocabulary
/// map to their own modality; anything unrecognised is treated as full time.
pub fn map_work_type_to_legacy_job_type(work_type: &str) -> JobType {
    work_type
        .parse::<WorkType>()
        .map(WorkType::legacy_job_type)
        .unwrap_or_default()
}

/// Same trim-and-drop rule as [`parse_skill_list`], for lists that arrive
/// already split.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Canonical, ready-to-insert job record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub department: String,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub degree: Option<String>,
    pub years_of_experience: i32,
    pub certificates: Vec<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub work_type: WorkType,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: String,
    pub location: String,
    pub expected_start_date: Option<String>,
    pub opening_reason: Option<OpeningReason>,
    pub direct_manager: Option<String>,
    pub direct_manager_approval: bool,
    pub finance_approval: bool,
    pub general_manager_approval: bool,
    pub company_logo: Option<String>,
    pub company_description: Option<String>,
    pub application_link: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub posted_by: Uuid,
    pub company_id: Option<Uuid>,
}

/// Reconciles a validated creation payload into the stored shape.
pub fn normalize_payload(payload: CreateJobPayload, posted_by: Uuid) -> NewJob {
    let mut technical_skills = clean_list(payload.technical_skills);
    let soft_skills = clean_list(payload.soft_skills);
    let legacy_skills = payload.required_skills.map(clean_list).unwrap_or_default();

    if technical_skills.is_empty() && soft_skills.is_empty() {
        technical_skills = legacy_skills;
    } else if !legacy_skills.is_empty()
        && legacy_skills != build_required_skills(&technical_skills, &soft_skills)
    {
        tracing::debug!("Ignoring requiredSkills that disagree with technical/soft skills");
    }

    let work_type = match (payload.work_type, payload.job_type) {
        (Some(work_type), Some(job_type)) => {
            if work_type.legacy_job_type() != job_type {
                tracing::debug!(
                    work_type = %work_type,
                    job_type = %job_type,
                    "Ignoring jobType inconsistent with workType"
                );
            }
            work_type
        }
        (Some(work_type), None) => work_type,
        (None, Some(job_type)) => WorkType::from_legacy(job_type),
        (None, None) => WorkType::default(),
    };

    let salary = payload.salary.unwrap_or_default();
    let currency = match salary.currency.trim() {
        "" => DEFAULT_CURRENCY.to_string(),
        other => other.to_string(),
    };

    let publication = payload.publication_details;

    NewJob {
        title: payload.title.trim().to_string(),
        description: payload.description,
        department: payload.department.trim().to_string(),
        technical_skills,
        soft_skills,
        degree: non_blank(payload.qualifications.degree),
        years_of_experience: payload.qualifications.years_of_experience.max(0),
        certificates: clean_list(payload.qualifications.certificates),
        experience_level: payload.experience_level,
        work_type,
        salary_min: salary.min,
        salary_max: salary.max,
        salary_currency: currency,
        location: payload.location.trim().to_string(),
        expected_start_date: non_blank(payload.expected_start_date),
        opening_reason: payload.opening_reason,
        direct_manager: non_blank(payload.direct_manager),
        direct_manager_approval: payload.approvals.direct_manager_approval,
        finance_approval: payload.approvals.finance_approval,
        general_manager_approval: payload.approvals.general_manager_approval,
        company_logo: non_blank(publication.company_logo),
        company_description: non_blank(publication.company_description),
        application_link: non_blank(publication.application_link),
        deadline: publication.deadline,
        status: payload.status.unwrap_or_default(),
        posted_by,
        company_id: payload.company_id,
    }
}
