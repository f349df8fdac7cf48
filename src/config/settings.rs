use crate::config::env::{self, EnvKey};
use crate::modules::transcode::dto::ConcatStrategy;
use std::path::PathBuf;

// Multipart bodies carry whole video files, so the default cap is generous.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub scratch_dir: PathBuf,
    pub transcoder_program: String,
    pub concat_strategy: ConcatStrategy,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let scratch_default = std::env::temp_dir().join("clipforge");

        Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            scratch_dir: env::get(EnvKey::ScratchDir)
                .map(PathBuf::from)
                .unwrap_or(scratch_default),
            transcoder_program: env::get_or(EnvKey::TranscoderProgram, "ffmpeg"),
            concat_strategy: ConcatStrategy::from_config_value(&env::get_or(
                EnvKey::ConcatStrategy,
                "two-pass",
            )),
            max_upload_bytes: env::get_parsed(EnvKey::MaxUploadBytes, DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}
