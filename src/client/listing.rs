use std::str::FromStr;

use tracing::{info, warn};
use uuid::Uuid;

use crate::client::gateway::JobsGateway;
use crate::dto::job_dto::JobPosting;
use crate::models::job::{JobType, WorkType};

pub const LOAD_FAILED_MESSAGE: &str = "فشل في تحميل الوظائف";
pub const NO_JOBS_MESSAGE: &str = "لا توجد وظائف متاحة حالياً";
pub const NO_SAVED_JOBS_MESSAGE: &str = "لا توجد وظائف محفوظة بعد";
pub const DEFAULT_COMPANY_LOGO: &str = "🏢";

const MAX_TECHNICAL_CHIPS: usize = 5;
const MAX_SOFT_CHIPS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobFilter {
    #[default]
    All,
    Remote,
    FullTime,
    Saved,
}

impl FromStr for JobFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(JobFilter::All),
            "remote" => Ok(JobFilter::Remote),
            "fulltime" => Ok(JobFilter::FullTime),
            "saved" => Ok(JobFilter::Saved),
            other => Err(format!("Unknown job filter: {}", other)),
        }
    }
}

/// Postings the candidate bookmarked during this session. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct SavedJobs {
    ids: Vec<Uuid>,
}

impl SavedJobs {
    /// Adds the id if absent, removes it otherwise. Returns whether it is now saved.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if let Some(pos) = self.ids.iter().position(|saved| *saved == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

pub fn matches_filter(job: &JobPosting, filter: JobFilter, saved: &SavedJobs) -> bool {
    match filter {
        JobFilter::All => true,
        JobFilter::Remote => {
            job.location.to_lowercase().contains("remote")
                || job.work_type.is_some_and(WorkType::is_remote)
        }
        JobFilter::FullTime => {
            job.work_type.is_some_and(WorkType::is_full_time)
                || job.job_type == Some(JobType::FullTime)
        }
        JobFilter::Saved => saved.contains(job.id),
    }
}

/// Subset of `jobs` visible under `filter`, in input order.
pub fn apply_filter<'a>(
    jobs: &'a [JobPosting],
    filter: JobFilter,
    saved: &SavedJobs,
) -> Vec<&'a JobPosting> {
    jobs.iter()
        .filter(|job| matches_filter(job, filter, saved))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardState {
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyLink {
    Email { address: String, href: String },
    Url(String),
}

impl ApplyLink {
    pub fn parse(link: &str) -> Option<Self> {
        let link = link.trim();
        if link.is_empty() {
            None
        } else if link.contains('@') {
            Some(ApplyLink::Email {
                address: link.to_string(),
                href: format!("mailto:{}", link),
            })
        } else {
            Some(ApplyLink::Url(link.to_string()))
        }
    }

    pub fn href(&self) -> &str {
        match self {
            ApplyLink::Email { href, .. } => href,
            ApplyLink::Url(url) => url,
        }
    }
}

/// What a single listing card shows.
#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub logo: String,
    pub work_type: Option<&'static str>,
    pub salary: Option<String>,
    pub years_of_experience: Option<i32>,
    pub technical_chips: Vec<String>,
    pub soft_chips: Vec<String>,
    pub apply_link: Option<ApplyLink>,
    pub saved: bool,
}

fn group_thousands(value: i32) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

fn salary_range(job: &JobPosting) -> Option<String> {
    let salary = job.salary.as_ref()?;
    match (salary.min, salary.max) {
        (Some(min), Some(max)) if min > 0 && max > 0 => Some(format!(
            "{} - {} {}",
            group_thousands(min),
            group_thousands(max),
            salary.currency
        )),
        _ => None,
    }
}

impl JobCard {
    pub fn new(job: &JobPosting, saved: &SavedJobs) -> Self {
        let logo = job
            .publication_details
            .company_logo
            .as_deref()
            .map(str::trim)
            .filter(|logo| !logo.is_empty())
            .unwrap_or(DEFAULT_COMPANY_LOGO)
            .to_string();

        let (technical_chips, soft_chips) =
            if job.technical_skills.is_empty() && job.soft_skills.is_empty() {
                let legacy = job.skills().into_iter().map(str::to_string);
                (legacy.take(MAX_TECHNICAL_CHIPS).collect(), Vec::new())
            } else {
                (
                    job.technical_skills.iter().take(MAX_TECHNICAL_CHIPS).cloned().collect(),
                    job.soft_skills.iter().take(MAX_SOFT_CHIPS).cloned().collect(),
                )
            };

        Self {
            id: job.id,
            title: job.title.clone(),
            department: job.department.clone(),
            location: job.location.clone(),
            logo,
            work_type: job.display_work_type(),
            salary: salary_range(job),
            years_of_experience: Some(job.qualifications.years_of_experience)
                .filter(|years| *years > 0),
            technical_chips,
            soft_chips,
            apply_link: job
                .publication_details
                .application_link
                .as_deref()
                .and_then(ApplyLink::parse),
            saved: saved.contains(job.id),
        }
    }
}

/// Candidate-facing board: loads active postings once, then filters locally.
#[derive(Debug, Clone)]
pub struct JobBoard {
    jobs: Vec<JobPosting>,
    state: BoardState,
    filter: JobFilter,
    saved: SavedJobs,
}

impl Default for JobBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl JobBoard {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            state: BoardState::Loading,
            filter: JobFilter::All,
            saved: SavedJobs::default(),
        }
    }

    /// Fetches the active postings. A failure leaves the board empty with
    /// an error message; there is no retry.
    pub async fn activate<G>(&mut self, gateway: &G)
    where
        G: JobsGateway + ?Sized,
    {
        self.state = BoardState::Loading;
        match gateway.fetch_public_jobs().await {
            Ok(jobs) => {
                info!(count = jobs.len(), "Job board loaded");
                self.jobs = jobs;
                self.state = BoardState::Ready;
            }
            Err(err) => {
                warn!(error = %err, "Job board failed to load");
                self.jobs.clear();
                self.state = BoardState::Error(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn filter(&self) -> JobFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: JobFilter) {
        self.filter = filter;
    }

    pub fn saved(&self) -> &SavedJobs {
        &self.saved
    }

    pub fn toggle_save(&mut self, id: Uuid) -> bool {
        self.saved.toggle(id)
    }

    pub fn visible_jobs(&self) -> Vec<&JobPosting> {
        apply_filter(&self.jobs, self.filter, &self.saved)
    }

    pub fn cards(&self) -> Vec<JobCard> {
        self.visible_jobs()
            .into_iter()
            .map(|job| JobCard::new(job, &self.saved))
            .collect()
    }

    /// Text for an empty result under the current filter.
    pub fn empty_message(&self) -> &'static str {
        match self.filter {
            JobFilter::Saved => NO_SAVED_JOBS_MESSAGE,
            _ => NO_JOBS_MESSAGE,
        }
    }
}
