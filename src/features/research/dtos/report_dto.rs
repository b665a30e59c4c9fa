use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One file entry as sent by the upload page
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FileDescriptorDto {
    #[schema(example = "trench-b-survey.pdf")]
    pub name: Option<String>,

    /// Size in bytes
    #[schema(example = 482133)]
    pub size: Option<i64>,

    /// Declared media type
    #[serde(rename = "type")]
    #[schema(example = "application/pdf")]
    pub media_type: Option<String>,
}

/// Request DTO for recording an upload batch
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadReportDto {
    /// Anything other than an array reads as absent
    #[serde(default, deserialize_with = "files_if_array")]
    pub files: Option<Vec<FileDescriptorDto>>,
    pub uploader_name: Option<String>,
    pub uploader_email: Option<String>,
}

fn files_if_array<'de, D>(deserializer: D) -> Result<Option<Vec<FileDescriptorDto>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Files {
        List(Vec<FileDescriptorDto>),
        Other(IgnoredAny),
    }

    Ok(match Files::deserialize(deserializer)? {
        Files::List(files) => Some(files),
        Files::Other(_) => None,
    })
}

/// Response payload for a recorded upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    pub id: Uuid,
}
