use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::research::dtos::{FileDescriptorDto, UploadReportDto};
use crate::features::research::models::{FileDescriptor, NewResearchReport};
use crate::features::research::repositories::ReportRepository;

pub const NO_FILES_MESSAGE: &str = "No files provided";

/// Records upload batches as metadata-only intake records
pub struct ReportIntakeService {
    reports: Arc<dyn ReportRepository>,
}

impl ReportIntakeService {
    pub fn new(reports: Arc<dyn ReportRepository>) -> Self {
        Self { reports }
    }

    /// Persist one intake record and return its id
    pub async fn record_upload(&self, dto: UploadReportDto) -> Result<Uuid> {
        let files = match dto.files {
            Some(files) if !files.is_empty() => files,
            _ => return Err(AppError::Validation(NO_FILES_MESSAGE.to_string())),
        };

        let files = files
            .into_iter()
            .enumerate()
            .map(|(index, file)| to_descriptor(index, file))
            .collect::<Result<Vec<_>>>()?;

        let file_count = files.len();
        let report = self
            .reports
            .insert(NewResearchReport {
                files,
                uploader_name: dto.uploader_name,
                uploader_email: dto.uploader_email,
            })
            .await?;

        tracing::info!(
            "Research report recorded: id={}, files={}",
            report.id,
            file_count
        );

        Ok(report.id)
    }
}

fn to_descriptor(index: usize, file: FileDescriptorDto) -> Result<FileDescriptor> {
    match (file.name, file.size, file.media_type) {
        (Some(name), Some(size), Some(media_type)) => Ok(FileDescriptor {
            name,
            size,
            media_type,
        }),
        _ => Err(AppError::Validation(format!(
            "files[{}] must include name, size, and type",
            index
        ))),
    }
}
