use std::path::{Path, PathBuf};

use osu_rs::prelude::*;

fn beatmap_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).expect("test files must be readable") {
        let path = entry.expect("test files must be readable").path();
        if path.is_dir() {
            files.extend(beatmap_files(&path));
        } else if path.extension().is_some_and(|extension| extension == "osu") {
            files.push(path);
        }
    }
    files
}

#[test]
fn test_every_file() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/osu/files");
    let files = beatmap_files(&dir);
    assert_eq!(files.len(), 4);

    for path in files {
        let OsuOutput { beatmap, warnings } = parse_beatmap_file(&path).expect("must be read");
        let expect_clean = !path.ends_with("malformed.osu");
        let normal = warnings
            .iter()
            .filter(|warning| warning.severity() == Severity::Normal)
            .count();
        assert_eq!(
            normal == 0,
            expect_clean,
            "{}: {warnings:?}",
            path.display()
        );
        assert!(!beatmap.hit_objects.is_empty(), "{}", path.display());
        assert!(beatmap.check_playing().is_empty(), "{}", path.display());
        eprintln!("{}: {}", path.display(), beatmap.difficulty_name());
    }
}
