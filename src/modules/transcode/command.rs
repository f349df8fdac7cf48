//! Transcoder command construction.
//!
//! Every function here is pure: options plus staged paths in, a fully-formed
//! argument vector out. Invocations are executed without a shell, so paths
//! never need quoting; the output path is always the trailing argument.

use super::dto::{ResolutionProfile, TranscodeOptions};
use std::path::Path;

const VIDEO_CODEC: &str = "libx264";
const VIDEO_PRESET: &str = "medium";
const VIDEO_CRF: &str = "23";
const AUDIO_CODEC: &str = "aac";
const AUDIO_BITRATE: &str = "128k";

// Both normalize passes pin this rate; the stream-copy concat requires the
// segments to share one codec/frame-rate profile.
const NORMALIZED_FRAME_RATE: &str = "30";

/// One fully-formed transcoder command: executable plus ordered arguments.
/// Built once per subprocess run, consumed once, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Invocation for a lone clip: optional horizontal flip, scale to the target
/// profile, uniform re-encode.
pub fn single_clip(
    program: &str,
    input: &Path,
    output: &Path,
    options: &TranscodeOptions,
) -> Invocation {
    let profile = options.resolution.profile();

    let mut args = vec!["-y".to_string()];
    args.push("-i".to_string());
    args.push(path_arg(input));
    args.push("-vf".to_string());
    args.push(video_filter(&profile, options.mirrored));
    args.extend(encode_args());
    args.push(path_arg(output));

    Invocation {
        program: program.to_string(),
        args,
    }
}

/// Single-pass outro concatenation: two inputs, one filter graph that scales
/// (and, for the primary stream, optionally flips) each input, then splices
/// the video and audio pairs into one output stream each.
pub fn concat_filter_graph(
    program: &str,
    input: &Path,
    outro: &Path,
    output: &Path,
    options: &TranscodeOptions,
) -> Invocation {
    let profile = options.resolution.profile();
    let graph = format!(
        "[0:v]{}[v0];[1:v]{}[v1];[v0][0:a][v1][1:a]concat=n=2:v=1:a=1[outv][outa]",
        video_filter(&profile, options.mirrored),
        video_filter(&profile, false),
    );

    let mut args = vec!["-y".to_string()];
    args.push("-i".to_string());
    args.push(path_arg(input));
    args.push("-i".to_string());
    args.push(path_arg(outro));
    args.push("-filter_complex".to_string());
    args.push(graph);
    args.push("-map".to_string());
    args.push("[outv]".to_string());
    args.push("-map".to_string());
    args.push("[outa]".to_string());
    args.extend(encode_args());
    args.push(path_arg(output));

    Invocation {
        program: program.to_string(),
        args,
    }
}

/// First stage of the two-pass outro strategy: re-encode one clip to the
/// shared target profile with the frame rate pinned. `apply_mirror` is true
/// only for the primary clip; the outro is never flipped.
pub fn normalize_clip(
    program: &str,
    input: &Path,
    output: &Path,
    options: &TranscodeOptions,
    apply_mirror: bool,
) -> Invocation {
    let profile = options.resolution.profile();

    let mut args = vec!["-y".to_string()];
    args.push("-i".to_string());
    args.push(path_arg(input));
    args.push("-vf".to_string());
    args.push(video_filter(&profile, apply_mirror));
    args.extend(encode_args());
    args.push("-r".to_string());
    args.push(NORMALIZED_FRAME_RATE.to_string());
    args.push(path_arg(output));

    Invocation {
        program: program.to_string(),
        args,
    }
}

/// Final stage of the two-pass strategy: join already-normalized segments by
/// stream copy, driven by a concat-demuxer manifest.
pub fn concat_by_manifest(program: &str, manifest: &Path, output: &Path) -> Invocation {
    let mut args = vec!["-y".to_string()];
    args.push("-f".to_string());
    args.push("concat".to_string());
    args.push("-safe".to_string());
    args.push("0".to_string());
    args.push("-i".to_string());
    args.push(path_arg(manifest));
    args.push("-c".to_string());
    args.push("copy".to_string());
    args.push(path_arg(output));

    Invocation {
        program: program.to_string(),
        args,
    }
}

/// Manifest contents for the concat demuxer: one `file '<path>'` line per
/// segment, in playback order.
pub fn concat_manifest(segments: &[impl AsRef<Path>]) -> String {
    segments
        .iter()
        .map(|p| format!("file '{}'", p.as_ref().to_string_lossy()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Filter chain for one video stream. The flip has to run before the scale
/// so it operates on the source frame.
fn video_filter(profile: &ResolutionProfile, mirrored: bool) -> String {
    let scale = format!("scale={}:{}", profile.width, profile.height);
    if mirrored {
        format!("hflip,{scale}")
    } else {
        scale
    }
}

fn encode_args() -> Vec<String> {
    vec![
        "-c:v".to_string(),
        VIDEO_CODEC.to_string(),
        "-preset".to_string(),
        VIDEO_PRESET.to_string(),
        "-crf".to_string(),
        VIDEO_CRF.to_string(),
        "-c:a".to_string(),
        AUDIO_CODEC.to_string(),
        "-b:a".to_string(),
        AUDIO_BITRATE.to_string(),
    ]
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
