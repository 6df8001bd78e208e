use super::*;
use crate::model::DrawOpKind;

#[test]
fn two_floor_route_through_stair() {
    let geometry = two_floor_building();
    let drawing = draw(&geometry, &[pa(0, 0), po(1, 0), pa(1, 0)], "D1");

    assert_eq!(drawing.groups.len(), 2);
    assert_eq!(drawing.groups[0].floor, 0);
    assert_eq!(drawing.groups[0].route_length, 12.0);
    assert_eq!(drawing.groups[1].floor, 1);
    assert_eq!(drawing.groups[1].route_length, 8.0);

    assert_eq!(
        points(&drawing, 0),
        vec![Point::new(0.0, 0.0), Point::new(0.0, 12.0)]
    );
    assert_eq!(
        points(&drawing, 1),
        vec![Point::new(50.0, 50.0), Point::new(58.0, 50.0)]
    );
}

#[test]
fn smoothing_runs_per_group() {
    // L-shaped run on floor 0, then a stair, then a straight run on floor 1.
    let geometry = RouteGeometry {
        paths: vec![
            vec![
                seg((0.0, 0.0), "D1", (15.0, 0.0), "", 15.0),
                seg((15.0, 0.0), "", (30.0, 0.0), "", 15.0),
                seg((30.0, 0.0), "", (30.0, 30.0), "", 30.0),
            ],
            vec![
                seg((30.0, 30.0), "", (30.0, 40.0), "", 10.0),
                seg((30.0, 40.0), "", (30.0, 50.0), "D2", 10.0),
            ],
        ],
        portals: vec![stair(0, (30.0, 30.0), 1, (30.0, 30.0))],
    };
    let drawing = synthesize(
        &geometry,
        &solution(&[pa(0, 0), pa(0, 1), pa(0, 2), po(1, 0), pa(1, 0), pa(1, 1)]),
        RouteEnds {
            start: "D1",
            destination: "D2",
            start_point: None,
        },
        10.0,
    )
    .unwrap();

    let kinds: Vec<DrawOpKind> = drawing.groups[0].ops.iter().map(|op| op.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DrawOpKind::Move,
            DrawOpKind::Line,
            DrawOpKind::Curve,
            DrawOpKind::Line
        ]
    );
    assert_eq!(drawing.groups[0].route_length, 60.0);

    // Straight run collapses to a single line.
    assert_eq!(drawing.groups[1].ops.len(), 2);
    assert_eq!(drawing.groups[1].ops[1].length, 20.0);
    assert_eq!(drawing.groups[1].route_length, 20.0);
}

#[test]
fn repeated_synthesis_is_identical() {
    let geometry = two_floor_building();
    let steps = [pa(0, 0), po(1, 0), pa(1, 0)];
    let first = draw(&geometry, &steps, "D1");
    let second = draw(&geometry, &steps, "D1");
    assert_eq!(first, second);
}
