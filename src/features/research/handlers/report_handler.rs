use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::research::dtos::{UploadReportDto, UploadResponseDto};
use crate::features::research::services::ReportIntakeService;
use crate::shared::types::ApiResponse;

/// Record metadata for a batch of research files
///
/// Only file names, sizes and declared types are stored; no file content is
/// received.
#[utoipa::path(
    post,
    path = "/api/research/upload",
    request_body = UploadReportDto,
    responses(
        (status = 201, description = "Upload saved", body = UploadResponseDto),
        (status = 400, description = "No files provided or incomplete file entry"),
        (status = 500, description = "Internal server error")
    ),
    tag = "research"
)]
pub async fn upload_report(
    State(service): State<Arc<ReportIntakeService>>,
    AppJson(dto): AppJson<UploadReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponseDto>>)> {
    let id = service.record_upload(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            UploadResponseDto { id },
            "Upload saved to research database",
        )),
    ))
}

#[cfg(test)]
mod tests {
    use crate::features::research::routes::routes;
    use crate::features::research::services::ReportIntakeService;
    use crate::shared::test_helpers::InMemoryReportRepository;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn server(repo: Arc<InMemoryReportRepository>) -> TestServer {
        TestServer::new(routes(Arc::new(ReportIntakeService::new(repo)))).unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_new_id() {
        let repo = Arc::new(InMemoryReportRepository::default());
        let server = server(repo.clone());

        let response = server
            .post("/api/research/upload")
            .json(&json!({
                "files": [{"name": "pottery.jpg", "size": 1024, "type": "image/jpeg"}],
                "uploaderName": "Jane Doe",
                "uploaderEmail": "jane@x.edu"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Upload saved to research database");
        assert_eq!(body["id"], json!(repo.reports()[0].id));
    }

    #[tokio::test]
    async fn test_upload_without_files_is_bad_request() {
        let server = server(Arc::new(InMemoryReportRepository::default()));

        for body in [
            json!({}),
            json!({"files": []}),
            json!({"files": null}),
            json!({"files": "site-map.png"}),
            json!({"files": {"name": "a.pdf"}}),
        ] {
            let response = server.post("/api/research/upload").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(response.json::<Value>()["message"], "No files provided");
        }
    }

    #[tokio::test]
    async fn test_upload_descriptor_missing_type_is_bad_request() {
        let server = server(Arc::new(InMemoryReportRepository::default()));

        server
            .post("/api/research/upload")
            .json(&json!({"files": [{"name": "x.pdf", "size": 1}]}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
