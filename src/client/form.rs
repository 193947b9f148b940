use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::error::ClientError;
use crate::dto::job_dto::{
    Approvals, CreateJobPayload, PublicationDetails, Qualifications, Salary, DEFAULT_CURRENCY,
};
use crate::models::job::{ExperienceLevel, JobStatus, OpeningReason, WorkType};
use crate::services::normalizer::{build_required_skills, parse_skill_list};

pub const MIN_DESCRIPTION_CHARS: usize = 20;
pub const DESCRIPTION_TOO_SHORT: &str = "Description must be at least 20 characters";
pub const SKILLS_REQUIRED: &str = "Please add at least one skill (technical or soft)";
pub const INVALID_DEADLINE: &str = "Application deadline must be a date (YYYY-MM-DD)";

/// Raw contents of the HR posting form, exactly as typed. Skill and
/// certificate fields are comma-separated text; numbers are kept as text
/// until submission. Serialized as the stored draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobForm {
    pub title: String,
    pub department: String,
    pub description: String,
    pub technical_skills: String,
    pub soft_skills: String,
    pub degree: String,
    pub years_of_experience: String,
    pub certificates: String,
    pub work_type: WorkType,
    pub location: String,
    pub salary_min: String,
    pub salary_max: String,
    pub expected_start_date: String,
    pub opening_reason: OpeningReason,
    pub direct_manager: String,
    pub direct_manager_approval: bool,
    pub finance_approval: bool,
    pub general_manager_approval: bool,
    pub company_logo: String,
    pub company_description: String,
    pub application_link: String,
    pub deadline: String,
    pub experience_level: ExperienceLevel,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            department: String::new(),
            description: String::new(),
            technical_skills: String::new(),
            soft_skills: String::new(),
            degree: String::new(),
            years_of_experience: String::new(),
            certificates: String::new(),
            work_type: WorkType::FullTime,
            location: String::new(),
            salary_min: String::new(),
            salary_max: String::new(),
            expected_start_date: String::new(),
            opening_reason: OpeningReason::NewPosition,
            direct_manager: String::new(),
            direct_manager_approval: false,
            finance_approval: false,
            general_manager_approval: false,
            company_logo: String::new(),
            company_description: String::new(),
            application_link: String::new(),
            deadline: String::new(),
            experience_level: ExperienceLevel::Mid,
        }
    }
}

fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_amount(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

fn parse_deadline(text: &str) -> Result<Option<DateTime<Utc>>, ClientError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()));
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| ClientError::Validation(INVALID_DEADLINE.to_string()))
}

impl JobForm {
    /// Runs the pre-submission checks and builds the request body. Nothing
    /// here touches the network.
    pub fn to_payload(&self) -> Result<CreateJobPayload, ClientError> {
        if self.description.chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(ClientError::Validation(DESCRIPTION_TOO_SHORT.to_string()));
        }

        let technical_skills = parse_skill_list(&self.technical_skills);
        let soft_skills = parse_skill_list(&self.soft_skills);
        if technical_skills.is_empty() && soft_skills.is_empty() {
            return Err(ClientError::Validation(SKILLS_REQUIRED.to_string()));
        }

        let deadline = parse_deadline(&self.deadline)?;
        let required_skills = build_required_skills(&technical_skills, &soft_skills);

        Ok(CreateJobPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            department: self.department.clone(),
            technical_skills,
            soft_skills,
            required_skills: Some(required_skills),
            qualifications: Qualifications {
                degree: optional(&self.degree),
                years_of_experience: parse_amount(&self.years_of_experience)
                    .filter(|years| *years >= 0)
                    .unwrap_or(0),
                certificates: parse_skill_list(&self.certificates),
            },
            experience_level: Some(self.experience_level),
            work_type: Some(self.work_type),
            job_type: Some(self.work_type.legacy_job_type()),
            location: self.location.clone(),
            salary: Some(Salary {
                min: parse_amount(&self.salary_min),
                max: parse_amount(&self.salary_max),
                currency: DEFAULT_CURRENCY.to_string(),
            }),
            expected_start_date: optional(&self.expected_start_date),
            opening_reason: Some(self.opening_reason),
            direct_manager: optional(&self.direct_manager),
            approvals: Approvals {
                direct_manager_approval: self.direct_manager_approval,
                finance_approval: self.finance_approval,
                general_manager_approval: self.general_manager_approval,
            },
            publication_details: PublicationDetails {
                company_logo: optional(&self.company_logo),
                company_description: optional(&self.company_description),
                application_link: optional(&self.application_link),
                deadline,
            },
            status: Some(JobStatus::Active),
            company_id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobType;

    fn filled_form() -> JobForm {
        JobForm {
            title: "Front-End Developer".into(),
            department: "IT Department".into(),
            description: "Build the candidate-facing job pages.".into(),
            technical_skills: "React, Node.js, ".into(),
            location: "Cairo, Egypt".into(),
            ..JobForm::default()
        }
    }

    #[test]
    fn defaults_match_the_blank_form() {
        let form = JobForm::default();
        assert_eq!(form.work_type, WorkType::FullTime);
        assert_eq!(form.opening_reason, OpeningReason::NewPosition);
        assert_eq!(form.experience_level, ExperienceLevel::Mid);
        assert!(!form.finance_approval);
    }

    #[test]
    fn skills_are_parsed_and_aggregated() {
        let payload = filled_form().to_payload().unwrap();
        assert_eq!(payload.technical_skills, vec!["React", "Node.js"]);
        assert!(payload.soft_skills.is_empty());
        assert_eq!(
            payload.required_skills,
            Some(vec!["React".to_string(), "Node.js".to_string()])
        );
    }

    #[test]
    fn short_description_blocks_submission() {
        let form = JobForm {
            description: "Ten chars!".into(),
            ..filled_form()
        };
        let err = form.to_payload().unwrap_err();
        assert!(matches!(err, ClientError::Validation(msg) if msg == DESCRIPTION_TOO_SHORT));
    }

    #[test]
    fn description_length_counts_characters() {
        let form = JobForm {
            description: "وصف الوظيفة بالتفصيل هنا".into(),
            ..filled_form()
        };
        assert!(form.to_payload().is_ok());
    }

    #[test]
    fn blank_skills_block_submission() {
        let form = JobForm {
            technical_skills: " , ".into(),
            soft_skills: "".into(),
            ..filled_form()
        };
        let err = form.to_payload().unwrap_err();
        assert!(matches!(err, ClientError::Validation(msg) if msg == SKILLS_REQUIRED));
    }

    #[test]
    fn description_is_checked_before_skills() {
        let form = JobForm {
            description: "short".into(),
            technical_skills: "".into(),
            ..filled_form()
        };
        let err = form.to_payload().unwrap_err();
        assert!(matches!(err, ClientError::Validation(msg) if msg == DESCRIPTION_TOO_SHORT));
    }

    #[test]
    fn hybrid_keeps_its_modality_in_the_legacy_field() {
        let form = JobForm {
            work_type: WorkType::Hybrid,
            ..filled_form()
        };
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.job_type, Some(JobType::Hybrid));
    }

    #[test]
    fn numbers_and_optionals_parse_leniently() {
        let form = JobForm {
            years_of_experience: "three".into(),
            salary_min: "15000".into(),
            salary_max: "".into(),
            certificates: "AWS Certified, , Google Cloud".into(),
            degree: "  ".into(),
            deadline: "2026-12-31".into(),
            ..filled_form()
        };
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.qualifications.years_of_experience, 0);
        assert_eq!(payload.qualifications.degree, None);
        assert_eq!(
            payload.qualifications.certificates,
            vec!["AWS Certified", "Google Cloud"]
        );
        let salary = payload.salary.unwrap();
        assert_eq!((salary.min, salary.max), (Some(15000), None));
        assert_eq!(salary.currency, "EGP");
        assert_eq!(
            payload.publication_details.deadline.map(|d| d.to_rfc3339()),
            Some("2026-12-31T00:00:00+00:00".to_string())
        );
        assert_eq!(payload.status, Some(JobStatus::Active));
    }

    #[test]
    fn garbage_deadline_is_a_validation_error() {
        let form = JobForm {
            deadline: "next friday".into(),
            ..filled_form()
        };
        assert!(matches!(
            form.to_payload(),
            Err(ClientError::Validation(msg)) if msg == INVALID_DEADLINE
        ));
    }

    #[test]
    fn draft_json_uses_form_field_names() {
        let json = serde_json::to_value(filled_form()).unwrap();
        assert_eq!(json["technicalSkills"], "React, Node.js, ");
        assert_eq!(json["workType"], "Full-time");
        assert_eq!(json["openingReason"], "New Position");

        let partial: JobForm = serde_json::from_str(r#"{"title":"Saved title"}"#).unwrap();
        assert_eq!(partial.title, "Saved title");
        assert_eq!(partial.experience_level, ExperienceLevel::Mid);
    }
}
