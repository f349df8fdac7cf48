use super::command::{self, Invocation};
use super::dto::{ConcatStrategy, ProcessedVideo, TranscodeOptions, TranscodeSubmission, UploadedClip};
use super::error::TranscodeError;
use super::workspace::Workspace;
use crate::state::AppState;
use bytes::Bytes;
use std::path::Path;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

pub struct TranscodeService;

impl TranscodeService {
    /// Owns one request end to end: validate, stage the uploads, run the
    /// transcoder, read the produced file back, and clean up every staged
    /// path whether the run succeeded or not.
    pub async fn process(
        state: AppState,
        submission: TranscodeSubmission,
    ) -> Result<ProcessedVideo, TranscodeError> {
        // Fail fast before any filesystem or subprocess activity.
        let primary = match submission.primary {
            Some(clip) if !clip.data.is_empty() => clip,
            _ => return Err(TranscodeError::MissingPrimaryClip),
        };
        // An outro field submitted without a selection arrives empty.
        let outro = submission.outro.filter(|clip| !clip.data.is_empty());
        let options = submission.options;

        let mut workspace = state.scratch.workspace();
        info!(
            "🎥 Transcode request {}: {} mirrored={} outro={}",
            workspace.token(),
            options.resolution.label(),
            options.mirrored,
            outro.is_some(),
        );

        let result =
            Self::run_pipeline(&state, &mut workspace, &primary, outro.as_ref(), &options).await;

        // Cleanup runs on every exit path, after the output bytes (or the
        // failure) are already in hand.
        workspace.cleanup().await;

        result
    }

    async fn run_pipeline(
        state: &AppState,
        workspace: &mut Workspace,
        primary: &UploadedClip,
        outro: Option<&UploadedClip>,
        options: &TranscodeOptions,
    ) -> Result<ProcessedVideo, TranscodeError> {
        state
            .scratch
            .ensure()
            .await
            .map_err(|e| TranscodeError::Staging(format!("scratch area unavailable: {e}")))?;

        let input_path = workspace.input_path(&primary.file_name);
        fs::write(&input_path, &primary.data)
            .await
            .map_err(|e| TranscodeError::Staging(format!("writing primary clip: {e}")))?;

        let program = &state.config.transcoder_program;
        let output_path = workspace.output_path();

        match outro {
            None => {
                let invocation = command::single_clip(program, &input_path, &output_path, options);
                Self::run_invocation(invocation).await?;
            }
            Some(outro_clip) => {
                let outro_path = workspace.outro_path(&outro_clip.file_name);
                fs::write(&outro_path, &outro_clip.data)
                    .await
                    .map_err(|e| TranscodeError::Staging(format!("writing outro clip: {e}")))?;

                match state.config.concat_strategy {
                    ConcatStrategy::FilterGraph => {
                        let invocation = command::concat_filter_graph(
                            program,
                            &input_path,
                            &outro_path,
                            &output_path,
                            options,
                        );
                        Self::run_invocation(invocation).await?;
                    }
                    ConcatStrategy::TwoPass => {
                        let primary_norm = workspace.normalized_path("primary");
                        let outro_norm = workspace.normalized_path("outro");

                        Self::run_invocation(command::normalize_clip(
                            program,
                            &input_path,
                            &primary_norm,
                            options,
                            options.mirrored,
                        ))
                        .await?;
                        Self::run_invocation(command::normalize_clip(
                            program,
                            &outro_path,
                            &outro_norm,
                            options,
                            false,
                        ))
                        .await?;

                        let manifest_path = workspace.manifest_path();
                        let manifest = command::concat_manifest(&[&primary_norm, &outro_norm]);
                        fs::write(&manifest_path, manifest)
                            .await
                            .map_err(|e| TranscodeError::Staging(format!("writing manifest: {e}")))?;

                        Self::run_invocation(command::concat_by_manifest(
                            program,
                            &manifest_path,
                            &output_path,
                        ))
                        .await?;
                    }
                }
            }
        }

        let data = fs::read(&output_path)
            .await
            .map_err(TranscodeError::Readback)?;
        info!(
            "✅ Transcode request {} done ({} bytes)",
            workspace.token(),
            data.len()
        );

        Ok(ProcessedVideo {
            file_name: download_name(&primary.file_name, options),
            data: Bytes::from(data),
        })
    }

    async fn run_invocation(invocation: Invocation) -> Result<(), TranscodeError> {
        debug!("Running {} {}", invocation.program, invocation.args.join(" "));

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()
            .await
            .map_err(|source| TranscodeError::TranscoderSpawn {
                program: invocation.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(TranscodeError::TranscoderExit {
                status: output.status.to_string(),
                detail: stderr_tail(&output.stderr),
            });
        }

        Ok(())
    }
}

/// Last few non-empty stderr lines; the transcoder prints the actual failure
/// at the end of a long banner, and sometimes nothing at all.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return "no diagnostic output".to_string();
    }
    lines[lines.len().saturating_sub(3)..].join(" | ")
}

/// Suggested download name: sanitized original stem, resolution label, and a
/// millisecond timestamp.
fn download_name(original_name: &str, options: &TranscodeOptions) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("video");
    let mut stem: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        stem = "video".to_string();
    }

    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("{}_{}_{}.mp4", stem, options.resolution.label(), millis)
}
