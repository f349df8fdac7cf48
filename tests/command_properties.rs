//! Properties of the transcoder command builders: whatever the request
//! looked like, the produced argument vectors must keep their shape.

use clipforge::modules::transcode::command;
use clipforge::modules::transcode::dto::{Resolution, TranscodeOptions};
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn any_resolution() -> impl Strategy<Value = Resolution> {
    prop_oneof![
        Just(Resolution::Hd720),
        Just(Resolution::FullHd1080),
        Just(Resolution::Uhd4k),
    ]
}

fn scale_for(resolution: Resolution) -> String {
    let profile = resolution.profile();
    format!("scale={}:{}", profile.width, profile.height)
}

fn arg_after<'a>(args: &'a [String], flag: &str) -> &'a str {
    let at = args
        .iter()
        .position(|a| a == flag)
        .unwrap_or_else(|| panic!("missing {flag} in {args:?}"));
    args[at + 1].as_str()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Selectors outside the three supported tiers never error; they land on
    /// the 1080p profile.
    #[test]
    fn prop_unknown_selectors_fall_back_to_1080p(selector in any::<String>()) {
        prop_assume!(!matches!(selector.as_str(), "720p" | "1080p" | "4K"));

        let resolution = Resolution::from_selector(&selector);
        prop_assert_eq!(resolution, Resolution::FullHd1080);
        prop_assert_eq!(resolution.profile().width, 1080);
        prop_assert_eq!(resolution.profile().height, 1920);
    }

    /// Every tier maps to its fixed portrait geometry.
    #[test]
    fn prop_profiles_stay_portrait(resolution in any_resolution()) {
        let profile = resolution.profile();
        let expected = match resolution {
            Resolution::Hd720 => (720, 1280),
            Resolution::FullHd1080 => (1080, 1920),
            Resolution::Uhd4k => (2160, 3840),
        };
        prop_assert_eq!((profile.width, profile.height), expected);
        prop_assert!(profile.height > profile.width);
    }

    /// A lone clip gets exactly one input, the flip exactly when requested
    /// and always ahead of the scale, and the output path as the trailing
    /// argument.
    #[test]
    fn prop_single_clip_flips_iff_mirrored(
        resolution in any_resolution(),
        mirrored in any::<bool>(),
    ) {
        let options = TranscodeOptions { resolution, mirrored };
        let inv = command::single_clip(
            "ffmpeg",
            Path::new("/scratch/input_t.mp4"),
            Path::new("/scratch/output_t.mp4"),
            &options,
        );

        prop_assert_eq!(inv.args.iter().filter(|a| *a == "-i").count(), 1);
        prop_assert_eq!(
            inv.args.last().map(String::as_str),
            Some("/scratch/output_t.mp4")
        );

        let chain = arg_after(&inv.args, "-vf");
        let expected = if mirrored {
            format!("hflip,{}", scale_for(resolution))
        } else {
            scale_for(resolution)
        };
        prop_assert_eq!(chain, expected.as_str());
    }

    /// The concat graph keeps its two branches straight: the primary branch
    /// flips exactly when requested, the outro branch never does, and both
    /// scale to the same geometry before the splice.
    #[test]
    fn prop_concat_graph_is_well_formed(
        resolution in any_resolution(),
        mirrored in any::<bool>(),
    ) {
        let options = TranscodeOptions { resolution, mirrored };
        let inv = command::concat_filter_graph(
            "ffmpeg",
            Path::new("/scratch/input_t.mp4"),
            Path::new("/scratch/outro_t.mp4"),
            Path::new("/scratch/output_t.mp4"),
            &options,
        );

        prop_assert_eq!(inv.args.iter().filter(|a| *a == "-i").count(), 2);
        prop_assert_eq!(
            inv.args.last().map(String::as_str),
            Some("/scratch/output_t.mp4")
        );

        let graph = arg_after(&inv.args, "-filter_complex");
        let branches: Vec<&str> = graph.split(';').collect();
        prop_assert_eq!(branches.len(), 3);

        let scale = scale_for(resolution);
        prop_assert!(branches[0].starts_with("[0:v]"));
        prop_assert!(branches[0].ends_with("[v0]"));
        prop_assert_eq!(branches[0].contains("hflip"), mirrored);
        prop_assert!(branches[0].contains(&scale));

        prop_assert!(branches[1].starts_with("[1:v]"));
        prop_assert!(branches[1].ends_with("[v1]"));
        prop_assert!(!branches[1].contains("hflip"));
        prop_assert!(branches[1].contains(&scale));

        prop_assert!(branches[2].contains("concat=n=2:v=1:a=1"));
        prop_assert!(inv.args.windows(2).any(|w| w == ["-map", "[outv]"]));
        prop_assert!(inv.args.windows(2).any(|w| w == ["-map", "[outa]"]));
    }

    /// Normalize passes flip only when the caller marks the clip as the
    /// primary one, and always pin the shared frame rate so the later
    /// stream-copy concat sees uniform segments.
    #[test]
    fn prop_normalize_mirrors_only_when_asked(
        resolution in any_resolution(),
        mirrored in any::<bool>(),
        apply_mirror in any::<bool>(),
    ) {
        let options = TranscodeOptions { resolution, mirrored };
        let inv = command::normalize_clip(
            "ffmpeg",
            Path::new("/scratch/input_t.mov"),
            Path::new("/scratch/primary_norm_t.mp4"),
            &options,
            apply_mirror,
        );

        let chain = arg_after(&inv.args, "-vf");
        prop_assert_eq!(chain.contains("hflip"), apply_mirror);
        prop_assert!(inv.args.windows(2).any(|w| w == ["-r", "30"]));
        prop_assert_eq!(
            inv.args.last().map(String::as_str),
            Some("/scratch/primary_norm_t.mp4")
        );
    }

    /// The manifest lists every segment, quoted, in playback order.
    #[test]
    fn prop_manifest_preserves_segment_order(
        names in prop::collection::vec("[a-z0-9_]{1,12}", 1..5),
    ) {
        let segments: Vec<PathBuf> = names
            .iter()
            .map(|n| PathBuf::from(format!("/scratch/{n}.mp4")))
            .collect();

        let manifest = command::concat_manifest(&segments);
        let lines: Vec<&str> = manifest.lines().collect();

        prop_assert_eq!(lines.len(), segments.len());
        for (line, segment) in lines.iter().zip(&segments) {
            let expected = format!("file '{}'", segment.display());
            prop_assert_eq!(*line, expected.as_str());
        }
    }
}
