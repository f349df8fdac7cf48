use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Quality tiers a client can select. The wire values are the literal
/// selector strings the upload form sends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Resolution {
    #[serde(rename = "720p")]
    Hd720,
    #[default]
    #[serde(rename = "1080p")]
    FullHd1080,
    #[serde(rename = "4K")]
    Uhd4k,
}

impl Resolution {
    /// Unrecognized selectors degrade to 1080p without an error; clients
    /// always get a processed file back.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "720p" => Resolution::Hd720,
            "1080p" => Resolution::FullHd1080,
            "4K" => Resolution::Uhd4k,
            _ => Resolution::default(),
        }
    }

    /// Canonical frame geometry, portrait orientation. The same profile is
    /// applied to the primary and the outro clip so concatenation never sees
    /// mismatched frames.
    pub fn profile(self) -> ResolutionProfile {
        match self {
            Resolution::Hd720 => ResolutionProfile {
                width: 720,
                height: 1280,
            },
            Resolution::FullHd1080 => ResolutionProfile {
                width: 1080,
                height: 1920,
            },
            Resolution::Uhd4k => ResolutionProfile {
                width: 2160,
                height: 3840,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resolution::Hd720 => "720p",
            Resolution::FullHd1080 => "1080p",
            Resolution::Uhd4k => "4K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionProfile {
    pub width: u32,
    pub height: u32,
}

/// How an outro clip gets appended. Operator-level knob, not part of the
/// request surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConcatStrategy {
    /// One invocation with two inputs and a filter graph that scales both
    /// streams and concatenates them. No intermediate files.
    FilterGraph,
    /// Normalize each clip to a shared profile in separate passes, then join
    /// the intermediates by manifest with stream copy. More robust when the
    /// sources disagree on frame rate or codec.
    #[default]
    TwoPass,
}

impl ConcatStrategy {
    pub fn from_config_value(value: &str) -> Self {
        match value {
            "filter-graph" => ConcatStrategy::FilterGraph,
            "two-pass" => ConcatStrategy::TwoPass,
            _ => ConcatStrategy::default(),
        }
    }
}

/// Options extracted from the multipart form, already defaulted.
#[derive(Debug, Clone, Copy)]
pub struct TranscodeOptions {
    pub resolution: Resolution,
    pub mirrored: bool,
}

/// One uploaded clip, held in memory until validation decides whether it is
/// staged to disk at all.
#[derive(Debug, Clone)]
pub struct UploadedClip {
    pub file_name: String,
    pub data: Bytes,
}

/// Everything one request submits. `primary` stays optional here so the
/// runner can reject its absence before any file is written.
#[derive(Debug)]
pub struct TranscodeSubmission {
    pub primary: Option<UploadedClip>,
    pub outro: Option<UploadedClip>,
    pub options: TranscodeOptions,
}

/// The finished product handed back to the handler.
#[derive(Debug)]
pub struct ProcessedVideo {
    pub file_name: String,
    pub data: Bytes,
}
