use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Columns selected for every `Job` query, in `FromRow` order.
pub const JOB_COLUMNS: &str = "id, title, description, department, technical_skills, soft_skills, \
    degree, years_of_experience, certificates, experience_level, work_type, salary_min, salary_max, \
    salary_currency, location, expected_start_date, opening_reason, direct_manager, \
    direct_manager_approval, finance_approval, general_manager_approval, company_logo, \
    company_description, application_link, deadline, status, applicants_count, posted_by, \
    company_id, created_at, updated_at";

/// A job posting as stored. Only the canonical fields are persisted; the
/// legacy `jobType` and `requiredSkills` are derived when the row is
/// rendered (see `dto::job_dto::JobPosting`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub department: String,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub degree: Option<String>,
    pub years_of_experience: i32,
    pub certificates: Vec<String>,
    pub experience_level: Option<String>,
    pub work_type: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: String,
    pub location: String,
    pub expected_start_date: Option<String>,
    pub opening_reason: Option<String>,
    pub direct_manager: Option<String>,
    pub direct_manager_approval: bool,
    pub finance_approval: bool,
    pub general_manager_approval: bool,
    pub company_logo: Option<String>,
    pub company_description: Option<String>,
    pub application_link: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub applicants_count: i32,
    pub posted_by: Uuid,
    pub company_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The exact string stored in the database and sent over the wire.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownLabel {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

labelled_enum! {
    /// Employment modality in either vocabulary. The Arabic labels came
    /// first; the English ones were added alongside them.
    WorkType {
        FullTimeAr => "دوام كامل",
        PartTimeAr => "دوام جزئي",
        InternshipAr => "تدريب",
        RemoteAr => "عمل عن بُعد",
        HybridAr => "هجين",
        FullTime => "Full-time",
        PartTime => "Part-time",
        Contract => "Contract",
        Remote => "Remote",
        Hybrid => "Hybrid",
        Internship => "Internship",
    }
}

labelled_enum! {
    /// Legacy English-only modality.
    JobType {
        FullTime => "Full-time",
        PartTime => "Part-time",
        Contract => "Contract",
        Remote => "Remote",
        Hybrid => "Hybrid",
        Internship => "Internship",
    }
}

labelled_enum! {
    ExperienceLevel {
        Entry => "Entry",
        Junior => "Junior",
        Mid => "Mid",
        Senior => "Senior",
        Lead => "Lead",
    }
}

labelled_enum! {
    OpeningReason {
        NewAr => "جديدة",
        ReplacementAr => "بديلة عن موظف",
        TeamExpansionAr => "توسّع في الفريق",
        NewPosition => "New Position",
        Replacement => "Replacement",
        TeamExpansion => "Team Expansion",
    }
}

labelled_enum! {
    JobStatus {
        Active => "Active",
        Closed => "Closed",
        Draft => "Draft",
    }
}

impl Default for WorkType {
    fn default() -> Self {
        WorkType::FullTimeAr
    }
}

impl Default for JobType {
    fn default() -> Self {
        JobType::FullTime
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Active
    }
}

impl WorkType {
    /// The same modality in the legacy vocabulary.
    pub fn legacy_job_type(self) -> JobType {
        match self {
            WorkType::FullTimeAr | WorkType::FullTime => JobType::FullTime,
            WorkType::PartTimeAr | WorkType::PartTime => JobType::PartTime,
            WorkType::InternshipAr | WorkType::Internship => JobType::Internship,
            WorkType::RemoteAr | WorkType::Remote => JobType::Remote,
            WorkType::HybridAr | WorkType::Hybrid => JobType::Hybrid,
            WorkType::Contract => JobType::Contract,
        }
    }

    /// Lifts a legacy value into the English half of the bilingual vocabulary.
    pub fn from_legacy(job_type: JobType) -> Self {
        match job_type {
            JobType::FullTime => WorkType::FullTime,
            JobType::PartTime => WorkType::PartTime,
            JobType::Contract => WorkType::Contract,
            JobType::Remote => WorkType::Remote,
            JobType::Hybrid => WorkType::Hybrid,
            JobType::Internship => WorkType::Internship,
        }
    }

    pub fn is_remote(self) -> bool {
        self.legacy_job_type() == JobType::Remote
    }

    pub fn is_full_time(self) -> bool {
        self.legacy_job_type() == JobType::FullTime
    }
}
