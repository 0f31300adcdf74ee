//! Tests for `osu_rs`.

mod beatmap_set;
mod diagnostics_test;
mod files;
mod hit_objects;
mod parse;
mod timing;

pub const SET_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/osu/files/set");

pub const HARD: &str = include_str!("files/set/Example Artist - Example Song (Mapper) [Hard].osu");
pub const EASY: &str = include_str!("files/set/Example Artist - Example Song (Mapper) [Easy].osu");
pub const MANIA: &str =
    include_str!("files/set/Example Artist - Example Song (Mapper) [4K Normal].osu");
pub const MALFORMED: &str = include_str!("files/malformed.osu");
