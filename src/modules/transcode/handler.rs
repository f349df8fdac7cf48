use super::dto::{Resolution, TranscodeOptions, TranscodeSubmission, UploadedClip};
use super::error::TranscodeError;
use super::service::TranscodeService;
use crate::common::response::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State, multipart::Field},
    http::header,
    response::IntoResponse,
};
use bytes::BytesMut;
use futures_util::StreamExt;
use tracing::info;

/// Process an uploaded video
/// Scales the primary clip to the selected resolution, optionally mirrors it
/// horizontally, optionally appends an outro clip, and returns the processed
/// file as a download.
#[utoipa::path(
    post,
    path = "/api/v1/videos/process",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Processed video bytes", body = Vec<u8>, content_type = "video/mp4"),
        (status = 400, description = "Missing primary clip or non-video upload", body = ErrorResponse),
        (status = 500, description = "Staging or transcode failure", body = ErrorResponse)
    ),
    tag = "Transcode"
)]
pub async fn process_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut primary: Option<UploadedClip> = None;
    let mut outro: Option<UploadedClip> = None;
    let mut resolution = Resolution::default();
    let mut mirrored = false;

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "video" => match read_clip_field(field).await {
                Ok(clip) => primary = Some(clip),
                Err(e) => return ApiError(e.to_string(), e.status_code()).into_response(),
            },
            "outroVideo" => match read_clip_field(field).await {
                Ok(clip) => outro = Some(clip),
                Err(e) => return ApiError(e.to_string(), e.status_code()).into_response(),
            },
            "resolution" => {
                let selector = field.text().await.unwrap_or_default();
                resolution = Resolution::from_selector(&selector);
            }
            "mirrored" => {
                mirrored = field.text().await.unwrap_or_default() == "true";
            }
            _ => {}
        }
    }

    let submission = TranscodeSubmission {
        primary,
        outro,
        options: TranscodeOptions {
            resolution,
            mirrored,
        },
    };

    match TranscodeService::process(state, submission).await {
        Ok(video) => {
            let content_type = mime_guess::from_path(&video.file_name)
                .first_or_octet_stream()
                .to_string();

            (
                [
                    (header::CONTENT_TYPE, content_type),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", video.file_name),
                    ),
                ],
                video.data,
            )
                .into_response()
        }
        Err(e) => ApiError(e.to_string(), e.status_code()).into_response(),
    }
}

/// Pulls one uploaded clip field fully into memory. Validation happens
/// before the body is consumed; nothing touches the filesystem here.
async fn read_clip_field(mut field: Field<'_>) -> Result<UploadedClip, TranscodeError> {
    let file_name = field.file_name().unwrap_or("clip.mp4").to_string();

    if let Some(declared) = field.content_type() {
        let is_video = declared
            .parse::<mime::Mime>()
            .map(|m| m.type_() == mime::VIDEO)
            .unwrap_or(false);
        if !is_video {
            return Err(TranscodeError::UnsupportedMediaType(declared.to_string()));
        }
    }

    let mut data = BytesMut::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk
            .map_err(|e| TranscodeError::Staging(format!("upload stream interrupted: {e}")))?;
        data.extend_from_slice(&chunk);
    }

    info!("📦 Received clip {} ({} bytes)", file_name, data.len());

    Ok(UploadedClip {
        file_name,
        data: data.freeze(),
    })
}
