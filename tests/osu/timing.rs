use osu_rs::prelude::*;
use pretty_assertions::assert_eq;

/// Every inherited point is bound to the latest uninherited point at or before it.
fn assert_parents_are_nearest(points: &TimingPoints) {
    for inherited in points.inherited() {
        let offset = inherited.common.offset;
        let parent = points.parent_of(inherited);
        assert!(parent.common.offset <= offset);
        let nearest = points
            .uninherited()
            .filter(|root| root.common.offset <= offset)
            .map(|root| root.common.offset)
            .max();
        match inherited.parent() {
            TimingParent::Declared(_) => assert_eq!(Some(parent.common.offset), nearest),
            TimingParent::Implicit => assert_eq!(nearest, None),
        }
    }
}

#[test]
fn test_worked_example() {
    let OsuOutput { beatmap, .. } =
        parse_beatmap("[TimingPoints]\n0,500,4,0,0,50,1,0\n1000,-100,4,0,0,50,0,1\n");
    let points = beatmap.timing_points.iter().collect::<Vec<_>>();
    assert_eq!(points.len(), 2);
    let TimingPoint::Uninherited(root) = points[0] else {
        panic!("expected an uninherited point first");
    };
    let TimingPoint::Inherited(child) = points[1] else {
        panic!("expected an inherited point second");
    };
    assert_eq!(root.common.offset, 0);
    assert_eq!(child.common.offset, 1000);
    assert!(child.common.kiai);
    assert_eq!(child.parent(), TimingParent::Declared(0));
    assert_eq!(beatmap.timing_points.parent_of(child), root);
}

#[test]
fn test_file_timing() {
    let OsuOutput { beatmap, .. } = parse_beatmap(crate::HARD);
    let points = &beatmap.timing_points;
    assert_parents_are_nearest(points);

    let parents = points
        .inherited()
        .map(InheritedTimingPoint::parent)
        .collect::<Vec<_>>();
    assert_eq!(
        parents,
        [
            TimingParent::Declared(0),
            TimingParent::Declared(2),
            TimingParent::Declared(2),
        ]
    );
    let velocities = points
        .inherited()
        .map(InheritedTimingPoint::slider_velocity)
        .collect::<Vec<_>>();
    assert_eq!(velocities, [2.0, 0.5, 1.0]);

    assert_eq!(beatmap.beat_duration_at(-100), 500.0);
    assert_eq!(beatmap.beat_duration_at(3999), 500.0);
    assert_eq!(beatmap.beat_duration_at(4000), 400.0);
    assert_eq!(beatmap.slider_velocity_at(1999), 1.0);
    assert_eq!(beatmap.slider_velocity_at(2000), 2.0);
    assert_eq!(beatmap.slider_velocity_at(4500), 1.0);
    assert_eq!(beatmap.slider_velocity_at(7000), 0.5);

    let root = points.uninherited().nth(1).unwrap();
    assert_eq!(root.meter, 3);
    assert_eq!(root.bpm(), 150.0);
    assert!(root.common.kiai);
    assert_eq!(root.common.sample_index, 1);
    assert_eq!(root.common.volume, 80);

    let last = points.inherited().last().unwrap();
    assert!(last.common.omit_first_barline);
    assert_eq!(last.common.sample_set, SampleSet::Soft);
}

#[test]
fn test_points_out_of_order() {
    let OsuOutput { beatmap, .. } = parse_beatmap(
        "[TimingPoints]\n3000,-50\n1000,-200\n2000,300,4,0,0,100,1,0\n0,600,4,0,0,100,1,0\n",
    );
    let points = &beatmap.timing_points;
    assert_eq!(
        points.iter().map(TimingPoint::offset).collect::<Vec<_>>(),
        [0, 1000, 2000, 3000]
    );
    assert_parents_are_nearest(points);
    assert_eq!(
        points
            .inherited()
            .map(|point| points.parent_of(point).common.offset)
            .collect::<Vec<_>>(),
        [0, 2000]
    );
}

#[test]
fn test_implicit_root() {
    let OsuOutput { beatmap, .. } = parse_beatmap("[TimingPoints]\n500,-100\n");
    let points = &beatmap.timing_points;
    let child = points.inherited().next().unwrap();
    assert_eq!(child.parent(), TimingParent::Implicit);
    let implicit = points.parent_of(child);
    assert_eq!(implicit, points.implicit());
    assert_eq!(implicit.common.offset, 0);
    assert_eq!(implicit.beat_duration, 500.0);
    assert_eq!(implicit.common.volume, 100);
}

#[test]
fn test_same_offset_roots() {
    let OsuOutput { beatmap, .. } =
        parse_beatmap("[TimingPoints]\n0,500,4,0,0,100,1,0\n0,250,4,0,0,100,1,0\n0,-50\n");
    let points = &beatmap.timing_points;
    let child = points.inherited().next().unwrap();
    assert_eq!(points.parent_of(child).beat_duration, 250.0);
    assert_eq!(beatmap.beat_duration_at(0), 250.0);
}
