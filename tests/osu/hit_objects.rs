use osu_rs::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_file_hit_objects() {
    let OsuOutput { beatmap, .. } = parse_beatmap(crate::HARD);
    let hit_objects = &beatmap.hit_objects;
    assert_eq!(hit_objects.len(), 8);
    assert!(
        hit_objects
            .windows(2)
            .all(|pair| pair[0].offset() <= pair[1].offset())
    );
    assert_eq!(
        hit_objects
            .iter()
            .map(HitObject::kind_name)
            .collect::<Vec<_>>(),
        [
            "circle", "circle", "slider", "slider", "slider", "slider", "spinner", "circle"
        ]
    );
    assert_eq!(
        hit_objects
            .iter()
            .map(|hit_object| beatmap.end_offset(hit_object))
            .collect::<Vec<_>>(),
        [0, 500, 1400, 2781, 3156, 4375, 8000, 9000]
    );

    let first = hit_objects[0].common();
    assert!(first.new_combo);
    assert_eq!(first.position, Vector2::new(64, 192));
    assert_eq!(first.timing, TimingParent::Declared(0));
    assert_eq!(hit_objects[1].common().additions, Additions::WHISTLE);
}

#[test]
fn test_slider_control_points() {
    let OsuOutput { beatmap, .. } = parse_beatmap(crate::HARD);
    let slider = beatmap
        .hit_objects
        .iter()
        .filter_map(HitObject::as_slider)
        .find(|slider| slider.common.offset == 2000)
        .unwrap();
    assert!(slider.common.new_combo);
    assert_eq!(slider.kind, CurveKind::Bezier);
    assert_eq!(slider.slides, 2);
    assert_eq!(slider.length, Some(250.0));
    assert_eq!(
        slider.curve.points(),
        [
            Vector2::new(100, 100),
            Vector2::new(200, 100),
            Vector2::new(200, 100),
            Vector2::new(300, 200),
            Vector2::new(400, 100),
        ]
    );
    assert!(slider.edge_additions.is_empty());

    let circular = beatmap
        .hit_objects
        .iter()
        .filter_map(HitObject::as_slider)
        .find(|slider| slider.common.offset == 4000)
        .unwrap();
    assert_eq!(circular.kind, CurveKind::Catmull);
    assert_eq!(
        circular.edge_additions,
        [Additions::empty(), Additions::CLAP]
    );
    assert_eq!(
        circular.edge_sets,
        [
            (SampleSet::Normal, SampleSet::Auto),
            (SampleSet::Soft, SampleSet::Auto)
        ]
    );
    let path = circular.path();
    assert!(path.len() >= 2);
}

#[test]
fn test_spinner_placement() {
    let OsuOutput { beatmap, .. } = parse_beatmap(crate::HARD);
    let Some(HitObject::Spinner(spinner)) = beatmap.hit_objects.get(6) else {
        panic!("expected a spinner");
    };
    assert_eq!(spinner.end_offset, 8000);
    assert_eq!(spinner.common.timing, TimingParent::Declared(2));
    assert_eq!(spinner.common.placement.measure, 1);
    assert_eq!(spinner.common.placement.beat, 2.0);
    assert!(spinner.common.placement.is_snapped());
}

#[test]
fn test_mania_holds() {
    let OsuOutput { beatmap, .. } = parse_beatmap(crate::MANIA);
    assert_eq!(beatmap.general.mode, Mode::Mania);
    let hit_objects = &beatmap.hit_objects;
    assert_eq!(
        hit_objects
            .iter()
            .map(|hit_object| (hit_object.kind_name(), hit_object.offset()))
            .collect::<Vec<_>>(),
        [
            ("circle", 500),
            ("hold", 800),
            ("circle", 800),
            ("hold", 1100)
        ]
    );
    assert_eq!(
        hit_objects
            .iter()
            .map(|hit_object| beatmap.end_offset(hit_object))
            .collect::<Vec<_>>(),
        [500, 1400, 800, 1700]
    );

    let Some(HitObject::Hold(hold)) = hit_objects.last() else {
        panic!("expected a hold");
    };
    assert_eq!(hold.common.position.x, 448);
    assert_eq!(hold.common.additions, Additions::WHISTLE);
    assert_eq!(
        hold.common.sample,
        HitSample {
            normal_set: SampleSet::Normal,
            addition_set: SampleSet::Soft,
            index: 0,
            volume: 80,
            filename: Some("hit.wav".into()),
        }
    );
}

#[test]
fn test_objects_before_timing_points_are_rebound() {
    let OsuOutput { beatmap, .. } = parse_beatmap(
        "[HitObjects]\n256,192,1500,1,0\n[TimingPoints]\n1000,250,4,0,0,100,1,0\n",
    );
    let common = beatmap.hit_objects[0].common();
    assert_eq!(common.timing, TimingParent::Declared(0));
    assert_eq!(common.placement.measure, 0);
    assert_eq!(common.placement.beat, 2.0);
}

#[test]
fn test_zero_slider_multiplier() {
    let OsuOutput { beatmap, warnings } = parse_beatmap(
        "[General]\nAudioFilename: a.mp3\n[Difficulty]\nSliderMultiplier: 0\n[TimingPoints]\n0,500,4,0,0,100,1,0\n[HitObjects]\n0,0,1000,2,0,L|100:0,1,100\n",
    );
    assert!(warnings.is_empty());
    assert_eq!(beatmap.difficulty.slider_multiplier, 0.0);
    assert_eq!(beatmap.end_offset(&beatmap.hit_objects[0]), 1000);
}

#[test]
fn test_huge_perfect_circle() {
    let OsuOutput { beatmap, .. } =
        parse_beatmap("[HitObjects]\n0,0,1000,2,0,P|1000000000:1|2000000000:0,1\n");
    let slider = beatmap.hit_objects[0].as_slider().unwrap();
    assert_eq!(
        slider.path(),
        [
            Vector2::new(0.0, 0.0),
            Vector2::new(1_000_000_000.0, 1.0),
            Vector2::new(2_000_000_000.0, 0.0),
        ]
    );
    assert!(beatmap.end_offset(&beatmap.hit_objects[0]) > 1000);
}
