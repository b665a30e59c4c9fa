use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::research::{dtos as research_dtos, handlers as research_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        // Research intake
        research_handlers::upload_report,
    ),
    components(
        schemas(
            // Auth
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::AccountDto,
            auth_dtos::AuthResponseDto,
            // Research intake
            research_dtos::FileDescriptorDto,
            research_dtos::UploadReportDto,
            research_dtos::UploadResponseDto,
        )
    ),
    tags(
        (name = "auth", description = "Researcher registration and login"),
        (name = "research", description = "Research file metadata intake"),
    ),
    info(
        title = "Legacy Atlas API",
        version = "0.1.0",
        description = "Account and research intake API for Legacy Atlas",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
