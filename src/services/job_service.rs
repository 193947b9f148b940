use crate::dto::job_dto::JobListQuery;
use crate::error::Result;
use crate::models::job::{Job, JobStatus, JOB_COLUMNS};
use crate::services::normalizer::NewJob;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Search predicate backed by the `jobs_search_idx` GIN index.
const SEARCH_PREDICATE: &str = "jobs_search_document(title, description, technical_skills, soft_skills) @@ plainto_tsquery('simple', {})";

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, job: NewJob) -> Result<Job> {
        let query = format!(
            r#"
            INSERT INTO jobs (
                title, description, department, technical_skills, soft_skills,
                degree, years_of_experience, certificates, experience_level, work_type,
                salary_min, salary_max, salary_currency, location, expected_start_date,
                opening_reason, direct_manager, direct_manager_approval, finance_approval,
                general_manager_approval, company_logo, company_description, application_link,
                deadline, status, posted_by, company_id
            ) VALUES (
                $1,$2,$3,$4,$5,
                $6,$7,$8,$9,$10,
                $11,$12,$13,$14,$15,
                $16,$17,$18,$19,
                $20,$21,$22,$23,
                $24,$25,$26,$27
            )
            RETURNING {}
            "#,
            JOB_COLUMNS
        );

        let created = sqlx::query_as::<_, Job>(&query)
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.department)
            .bind(&job.technical_skills)
            .bind(&job.soft_skills)
            .bind(&job.degree)
            .bind(job.years_of_experience)
            .bind(&job.certificates)
            .bind(job.experience_level.map(|v| v.label()))
            .bind(job.work_type.label())
            .bind(job.salary_min)
            .bind(job.salary_max)
            .bind(&job.salary_currency)
            .bind(&job.location)
            .bind(&job.expected_start_date)
            .bind(job.opening_reason.map(|v| v.label()))
            .bind(&job.direct_manager)
            .bind(job.direct_manager_approval)
            .bind(job.finance_approval)
            .bind(job.general_manager_approval)
            .bind(&job.company_logo)
            .bind(&job.company_description)
            .bind(&job.application_link)
            .bind(job.deadline)
            .bind(job.status.label())
            .bind(job.posted_by)
            .bind(job.company_id)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(job_id = %created.id, posted_by = %created.posted_by, "Job posting created");
        Ok(created)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let query = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        let job = sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(job)
    }

    /// Every active posting, newest first. This is what candidates browse.
    pub async fn list_active(&self) -> Result<Vec<Job>> {
        let query = format!(
            "SELECT {} FROM jobs WHERE status = $1 ORDER BY created_at DESC",
            JOB_COLUMNS
        );
        let items = sqlx::query_as::<_, Job>(&query)
            .bind(JobStatus::Active.label())
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(count = items.len(), "Listed active jobs");
        Ok(items)
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let (page, per_page, offset) = query.paging();

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            filters.push(format!("status = ${}", args.len() + 1));
            args.push(status.label().to_string());
        }
        if let Some(department) = query.department.filter(|d| !d.trim().is_empty()) {
            filters.push(format!("department ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", department.trim()));
        }
        if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
            filters.push(SEARCH_PREDICATE.replace("{}", &format!("${}", args.len() + 1)));
            args.push(search.trim().to_string());
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "SELECT {}
             FROM jobs
             {}
             ORDER BY created_at DESC
             LIMIT ${} OFFSET ${}",
            JOB_COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );

        let total_query = format!("SELECT COUNT(*) FROM jobs {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Job>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(per_page).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }
}
