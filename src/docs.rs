use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::modules::transcode::handler::process_video),
    components(
        schemas(
            crate::common::response::ErrorResponse,
            crate::modules::transcode::dto::Resolution,
        )
    ),
    tags(
        (name = "Transcode", description = "Video upload and transform")
    )
)]
pub struct ApiDoc;
