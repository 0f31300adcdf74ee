use osu_rs::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_key_values_into_a_set() {
    let source = "[General]\nAudioFilename: track.mp3\nAudioLeadIn: 1500\n\n[Metadata]\nTitle: Example\nVersion: Hard\n";
    let BeatmapSetOutput {
        set, set_warnings, ..
    } = parse_beatmap_set([("hard.osu", source)], default_config()).unwrap();
    assert_eq!(set_warnings, vec![]);

    let beatmap = set.get("Hard").unwrap();
    assert_eq!(beatmap.general.audio_filename, "track.mp3");
    assert_eq!(beatmap.general.audio_lead_in, 1500);
    assert_eq!(beatmap.difficulty_name(), "Hard");
    assert_eq!(set.metadata.title, "Example");
    assert_eq!(set.difficulty_names().collect::<Vec<_>>(), ["Hard"]);
}

#[test]
fn test_float_key_value() {
    let OsuOutput { beatmap, .. } = parse_beatmap("[Difficulty]\nHPDrainRate: 5.5\n");
    assert_eq!(beatmap.difficulty.hp_drain_rate, 5.5);
}

#[test]
fn test_unknown_keys_and_sections_change_nothing() {
    let plain = parse_beatmap("[General]\nAudioFilename: a.mp3\n").beatmap;
    let noisy = parse_beatmap(
        "[Fonts]\nAudioFilename: b.mp3\n[General]\nAudioFilename: a.mp3\nSecretKey: 1\n[Metadata]\nAudioFilename: c.mp3\n",
    )
    .beatmap;
    assert_eq!(noisy, plain);
}

#[test]
fn test_full_beatmap() {
    let OsuOutput { beatmap, warnings } = parse_beatmap(crate::HARD);
    assert_eq!(warnings.len(), 9);
    assert!(warnings.iter().all(|warning| {
        matches!(
            warning,
            OsuWarning::ParseWarning(warning)
                if *warning.content() == ParseWarning::Structural(StructuralWarning::BlankLine)
        ) && warning.severity() == Severity::Low
    }));

    assert_eq!(beatmap.format_version, Some(14));

    let general = &beatmap.general;
    assert_eq!(general.audio_filename, "audio.mp3");
    assert!(!general.countdown);
    assert_eq!(general.sample_set, SampleSet::Soft);
    assert_eq!(general.stack_leniency, 0.5);
    assert_eq!(general.mode, Mode::Standard);
    assert!(general.letterbox_in_breaks);
    assert!(general.widescreen_storyboard);
    assert!(!general.epilepsy_warning);

    let editor = &beatmap.editor;
    assert_eq!(editor.bookmarks, [1000, 5000]);
    assert_eq!(editor.distance_spacing, 1.2);
    assert_eq!(editor.grid_size, 8);
    assert_eq!(editor.timeline_zoom, 2.0);

    let metadata = &beatmap.metadata;
    assert_eq!(metadata.title, "Example Song");
    assert_eq!(metadata.title_unicode, "例の歌");
    assert_eq!(metadata.creator, "Mapper");
    assert_eq!(metadata.source, "");
    assert_eq!(metadata.tags, ["example", "test", "rhythm"]);
    assert_eq!(metadata.beatmap_id, Some(123456));
    assert_eq!(metadata.beatmap_set_id, Some(65432));
    assert_eq!(metadata.preview_time, 45000);

    let difficulty = &beatmap.difficulty;
    assert_eq!(difficulty.hp_drain_rate, 5.5);
    assert_eq!(difficulty.circle_size, 4.0);
    assert_eq!(difficulty.overall_difficulty, 7.0);
    assert_eq!(difficulty.approach_rate, 8.5);
    assert_eq!(difficulty.slider_multiplier, 1.6);

    let events = &beatmap.events;
    assert_eq!(
        events.background,
        Some(Background {
            filename: "background.jpg".into(),
            offset: Vector2::new(0, 0),
        })
    );
    assert_eq!(events.video, None);
    assert_eq!(
        events.breaks,
        [BreakPeriod {
            start_time: 9000,
            end_time: 12000,
        }]
    );

    assert_eq!(
        beatmap.colours.combo_colours().collect::<Vec<_>>(),
        [Rgb::new(255, 192, 0), Rgb::new(0, 202, 0)]
    );
    assert_eq!(
        beatmap.colours.get("SliderBorder").map(|colour| colour.hex()),
        Some("ffffff".into())
    );

    assert_eq!(beatmap.timing_points.len(), 5);
    assert_eq!(beatmap.hit_objects.len(), 8);
}

#[test]
fn test_crlf_and_byte_order_mark() {
    let OsuOutput { beatmap, warnings } = parse_beatmap(crate::MANIA);
    assert_eq!(beatmap.format_version, Some(14));
    assert_eq!(beatmap.general.mode, Mode::Mania);
    assert_eq!(beatmap.difficulty_name(), "4K Normal");
    assert_eq!(
        warnings
            .iter()
            .filter(|warning| warning.severity() == Severity::Normal)
            .count(),
        0
    );
}

#[test]
fn test_malformed_lines_are_skipped() {
    let OsuOutput { beatmap, warnings } = parse_beatmap(crate::MALFORMED);
    let lines = warnings
        .iter()
        .map(|warning| {
            let OsuWarning::ParseWarning(warning) = warning else {
                panic!("unexpected warning {warning}");
            };
            let line = crate::MALFORMED[..warning.start()].lines().count() + 1;
            (line, warning.content().clone())
        })
        .collect::<Vec<_>>();
    assert_eq!(
        lines,
        [
            (
                4,
                ParseWarning::NumericConversion(NumericConversionError {
                    key: "Mode".into(),
                    value: "seven".into(),
                    expected: "mode 0 to 3",
                })
            ),
            (
                6,
                ParseWarning::Structural(StructuralWarning::UnknownKey {
                    section: "General".into(),
                    key: "NotAKey".into(),
                })
            ),
            (
                7,
                ParseWarning::Structural(StructuralWarning::UnmatchedLine {
                    section: "General".into(),
                    line: "this line has no colon".into(),
                })
            ),
            (
                10,
                ParseWarning::Structural(StructuralWarning::UnknownSection("Fonts".into()))
            ),
            (
                14,
                ParseWarning::MalformedTimingPoint(MalformedTimingPoint::InvalidNumber {
                    field: "offset",
                    value: "abc".into(),
                })
            ),
            (
                15,
                ParseWarning::MalformedTimingPoint(MalformedTimingPoint::TooFewFields(1))
            ),
            (
                17,
                ParseWarning::MalformedColour {
                    name: "Combo1".into(),
                    source: RgbParseError::MissingChannel(2),
                }
            ),
            (
                21,
                ParseWarning::MalformedHitObject(MalformedHitObjectError::TooFewFields {
                    expected: 5,
                    found: 2,
                })
            ),
            (
                22,
                ParseWarning::MalformedHitObject(MalformedHitObjectError::InvalidType(4))
            ),
            (
                23,
                ParseWarning::MalformedHitObject(MalformedHitObjectError::TooFewControlPoints(
                    1
                ))
            ),
            (
                24,
                ParseWarning::MalformedHitObject(MalformedHitObjectError::InvalidCurveKind(
                    "X".into()
                ))
            ),
            (
                25,
                ParseWarning::MalformedHitObject(MalformedHitObjectError::InvalidHitSample(
                    InvalidHitSample("9:0:0:0:".into())
                ))
            ),
        ]
    );

    // Everything around the broken lines is still read.
    assert_eq!(beatmap.general.audio_filename, "audio.mp3");
    assert_eq!(beatmap.general.mode, Mode::Standard);
    assert!(beatmap.general.countdown);
    assert_eq!(beatmap.difficulty_name(), "Broken");
    assert_eq!(beatmap.timing_points.len(), 1);
    assert_eq!(beatmap.colours.len(), 1);
    assert_eq!(
        beatmap
            .hit_objects
            .iter()
            .map(HitObject::offset)
            .collect::<Vec<_>>(),
        [0, 2500]
    );
}

#[test]
fn test_empty_source() {
    let OsuOutput { beatmap, warnings } = parse_beatmap("");
    assert_eq!(beatmap, Beatmap::default());
    assert_eq!(
        warnings,
        [
            OsuWarning::PlayingWarning(PlayingWarning::AudioFilenameUndefined),
            OsuWarning::PlayingWarning(PlayingWarning::NoUninheritedTimingPoint),
            OsuWarning::PlayingWarning(PlayingWarning::NoHitObjects),
        ]
    );
}

#[test]
fn test_tokens_can_be_reused() {
    let tokens = osu_rs::lex::parse(crate::EASY);
    let first = osu_rs::parse_beatmap_with_tokens(&tokens);
    let second = osu_rs::parse_beatmap_with_tokens(&tokens);
    assert_eq!(first, second);
    assert_eq!(first.beatmap.difficulty_name(), "Easy");
}

#[cfg(feature = "serde")]
#[test]
fn test_beatmap_serializes() {
    let OsuOutput { beatmap, .. } = parse_beatmap(crate::HARD);
    let json = serde_json::to_value(&beatmap).unwrap();
    assert_eq!(json["general"]["audio_filename"], "audio.mp3");
    assert_eq!(json["metadata"]["version"], "Hard");
    assert_eq!(
        json["hit_objects"].as_array().map(Vec::len),
        Some(beatmap.hit_objects.len())
    );
}
