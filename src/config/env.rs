use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    ScratchDir,
    TranscoderProgram,
    ConcatStrategy,
    MaxUploadBytes,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::ScratchDir => "CLIPFORGE_SCRATCH_DIR",
            EnvKey::TranscoderProgram => "CLIPFORGE_FFMPEG_PATH",
            EnvKey::ConcatStrategy => "CLIPFORGE_CONCAT_STRATEGY",
            EnvKey::MaxUploadBytes => "CLIPFORGE_MAX_UPLOAD_BYTES",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
