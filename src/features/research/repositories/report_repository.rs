use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::research::models::{NewResearchReport, ResearchReport};

/// Append-only store of intake records
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn insert(&self, report: NewResearchReport) -> Result<ResearchReport>;
}

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, report: NewResearchReport) -> Result<ResearchReport> {
        sqlx::query_as::<_, ResearchReport>(
            r#"
            INSERT INTO heritage_reports (files, uploader_name, uploader_email)
            VALUES ($1, $2, $3)
            RETURNING id, files, uploader_name, uploader_email, created_at, updated_at
            "#,
        )
        .bind(Json(&report.files))
        .bind(&report.uploader_name)
        .bind(&report.uploader_email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create research report: {:?}", e);
            AppError::Database(e)
        })
    }
}
