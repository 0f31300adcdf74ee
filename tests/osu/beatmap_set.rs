use std::path::Path;

use osu_rs::prelude::*;
use pretty_assertions::assert_eq;

fn with_version(source: &str, version: &str) -> String {
    source
        .lines()
        .map(|line| {
            if line.trim_start().starts_with("Version:") {
                format!("Version:{version}")
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_read_set_dir() {
    let entries = read_set_dir(crate::SET_DIR).unwrap();
    assert_eq!(
        entries
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>(),
        [
            "Example Artist - Example Song (Mapper) [4K Normal].osu",
            "Example Artist - Example Song (Mapper) [Easy].osu",
            "Example Artist - Example Song (Mapper) [Hard].osu",
        ]
    );
    assert_eq!(entries[2].1, crate::HARD);
}

#[test]
fn test_parse_set_dir() {
    let BeatmapSetOutput {
        set,
        warnings,
        set_warnings,
    } = parse_beatmap_set_dir(crate::SET_DIR, default_config()).unwrap();
    assert_eq!(
        set.difficulty_names().collect::<Vec<_>>(),
        ["4K Normal", "Easy", "Hard"]
    );
    assert!(set_warnings.is_empty());
    assert_eq!(warnings.len(), 3);
    assert!(
        warnings
            .values()
            .flatten()
            .all(|warning| warning.severity() == Severity::Low)
    );
    assert_eq!(set.metadata.title, "Example Song");
    assert_eq!(set.metadata.artist, "Example Artist");
    assert_eq!(set.metadata.creator, "Mapper");
    assert_eq!(set.metadata.beatmap_set_id, Some(65432));
    assert_eq!(set.get("Easy").unwrap().difficulty.overall_difficulty, 2.0);
}

#[test]
fn test_parse_beatmap_file() {
    let path = Path::new(crate::SET_DIR).join("Example Artist - Example Song (Mapper) [Easy].osu");
    let OsuOutput { beatmap, .. } = parse_beatmap_file(&path).unwrap();
    assert_eq!(beatmap, parse_beatmap(crate::EASY).beatmap);

    let missing = Path::new(crate::SET_DIR).join("missing.osu");
    let Err(err) = parse_beatmap_file(&missing) else {
        panic!("a missing file must not be parsed");
    };
    assert_eq!(err.path, missing);
    assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);

    let Err(SetSourceError::Source(err)) =
        parse_beatmap_set_dir(Path::new(crate::SET_DIR).join("missing"), default_config())
    else {
        panic!("a missing directory must not be parsed");
    };
    assert!(err.path.ends_with("missing"));
}

#[test]
fn test_duplicated_difficulty() {
    let newer = crate::HARD.replace("AudioFilename: audio.mp3", "AudioFilename: remix.mp3");
    assert_ne!(newer, crate::HARD);
    let entries = [("hard.osu", crate::HARD), ("hard (1).osu", newer.as_str())];

    assert_eq!(
        parse_beatmap_set(entries, default_config()),
        Err(DuplicateDifficultyError {
            name: "Hard".into()
        })
    );

    let older = parse_beatmap_set(entries, default_config().prompter(AlwaysUseOlder)).unwrap();
    assert_eq!(older.set.len(), 1);
    assert_eq!(
        older.set.get("Hard").unwrap().general.audio_filename,
        "audio.mp3"
    );
    assert_eq!(
        older.set_warnings,
        [SetWarning::DuplicateResolved {
            name: "Hard".into(),
            workaround: DuplicationWorkaround::UseOlder,
        }]
    );

    let newer = parse_beatmap_set(entries, default_config().prompter(AlwaysUseNewer)).unwrap();
    assert_eq!(
        newer.set.get("Hard").unwrap().general.audio_filename,
        "remix.mp3"
    );
    assert_eq!(newer.warnings.len(), 2);
}

#[test]
fn test_metadata_mismatch() {
    let other = with_version(&crate::EASY.replace("Mapper", "Guest"), "Guest's Easy");
    let output = parse_beatmap_set(
        [("hard.osu", crate::HARD), ("guest.osu", other.as_str())],
        default_config(),
    )
    .unwrap();
    assert_eq!(output.set.len(), 2);
    assert_eq!(
        output.set_warnings,
        [SetWarning::MetadataMismatch {
            difficulty: "Guest's Easy".into(),
            field: MetadataField::Creator,
            expected: "Mapper".into(),
            found: "Guest".into(),
        }]
    );
    assert_eq!(output.set.metadata.creator, "Mapper");
}

#[test]
fn test_merge_sets() {
    let mut target = parse_beatmap_set([("easy.osu", crate::EASY)], default_config())
        .unwrap()
        .set;
    let other = parse_beatmap_set(
        [("hard.osu", crate::HARD), ("mania.osu", crate::MANIA)],
        default_config(),
    )
    .unwrap()
    .set;
    let warnings = merge_beatmap_sets(&mut target, other).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(
        target.difficulty_names().collect::<Vec<_>>(),
        ["4K Normal", "Easy", "Hard"]
    );

    let before = target.clone();
    let conflicting = parse_beatmap_set(
        [
            ("insane.osu", with_version(crate::HARD, "Insane")),
            ("easy.osu", crate::EASY.to_owned()),
        ],
        default_config(),
    )
    .unwrap()
    .set;
    assert_eq!(
        merge_beatmap_sets(&mut target, conflicting),
        Err(DuplicateDifficultyError {
            name: "Easy".into()
        })
    );
    assert_eq!(target, before);
}

#[test]
fn test_empty_set() {
    let output = parse_beatmap_set(Vec::<(&str, &str)>::new(), default_config()).unwrap();
    assert!(output.set.is_empty());
    assert_eq!(output, BeatmapSetOutput::default());
}

#[cfg(feature = "rayon")]
#[test]
fn test_parallel_set_matches_sequential() {
    let entries = read_set_dir(crate::SET_DIR).unwrap();
    let sequential = parse_beatmap_set(entries.clone(), default_config()).unwrap();
    let parallel = parse_beatmap_set_par(entries, default_config()).unwrap();
    assert_eq!(parallel, sequential);

    let duplicated = vec![
        ("hard.osu", crate::HARD),
        ("easy.osu", crate::EASY),
        ("hard (1).osu", crate::HARD),
    ];
    assert_eq!(
        parse_beatmap_set_par(duplicated.clone(), default_config()),
        Err(DuplicateDifficultyError {
            name: "Hard".into()
        })
    );
    let newer = parse_beatmap_set_par(duplicated, default_config().prompter(AlwaysUseNewer))
        .unwrap();
    assert_eq!(
        newer.set.difficulty_names().collect::<Vec<_>>(),
        ["Easy", "Hard"]
    );
    assert_eq!(newer.warnings.len(), 3);
}
