#![allow(dead_code)]

use clipforge::config::settings::AppConfig;
use clipforge::infrastructure::scratch::ScratchArea;
use clipforge::modules::transcode::dto::ConcatStrategy;
use clipforge::state::AppState;
use std::path::{Path, PathBuf};

pub async fn test_state(scratch_root: &Path, program: &str, strategy: ConcatStrategy) -> AppState {
    let config = AppConfig {
        server_port: 0,
        scratch_dir: scratch_root.to_path_buf(),
        transcoder_program: program.to_string(),
        concat_strategy: strategy,
        max_upload_bytes: 64 * 1024 * 1024,
    };
    let scratch = ScratchArea::init(config.scratch_dir.clone())
        .await
        .expect("scratch init");
    AppState::new(config, scratch)
}

/// Stand-in for the transcoder. Appends its argument line to `call_log` and
/// writes a marker to its final argument, which the command builder
/// guarantees is the output path. Keeps the whole pipeline testable without
/// a real ffmpeg.
#[cfg(unix)]
pub fn write_stub_transcoder(dir: &Path, call_log: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("stub-ffmpeg.sh");
    let body = format!(
        "#!/bin/sh\n\
         echo \"$@\" >> '{}'\n\
         out=\"\"\n\
         for arg in \"$@\"; do out=\"$arg\"; done\n\
         printf 'stub output' > \"$out\"\n",
        call_log.display()
    );
    std::fs::write(&script, body).expect("write stub transcoder");

    let mut perms = std::fs::metadata(&script)
        .expect("stat stub transcoder")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&script, perms).expect("chmod stub transcoder");

    script
}

pub fn scratch_file_count(root: &Path) -> usize {
    std::fs::read_dir(root).expect("read scratch dir").count()
}

/// Hand-rolled multipart body; enough structure for the extractor, nothing
/// more.
pub struct MultipartBuilder {
    boundary: &'static str,
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self {
            boundary: "clipforge-test-boundary",
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: {}\r\n\r\n",
                self.boundary, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Returns the `Content-Type` header value and the finished body.
    pub fn build(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}
