//! Tests that sample a single road and query it.

use assert_approx_eq::assert_approx_eq;
use vertex_path::{
    cgmath::InnerSpace, math::Point3d, sample_road, ConfigError, EndOfPath, RoadParams,
    Transform, TurnDirection, VertexPath,
};

fn road(turn: TurnDirection) -> RoadParams {
    RoadParams {
        straight_leg_length: 10.0,
        arc_length: 5.0,
        circle_radius: 20.0,
        turn,
    }
}

/// Test the worked example: a gentle left turn between two 10 m legs.
#[test]
fn gentle_left_turn() {
    let params = road(TurnDirection::Left);
    assert_approx_eq!(params.turn_angle().0, 0.25);

    let path = sample_road(&params).unwrap();
    assert_approx_eq!(path.length(), 25.0, 1e-9);
    assert!(!path.is_closed());

    let first = path.points()[0];
    assert_approx_eq!(first.x, 0.0);
    assert_approx_eq!(first.y, 0.0);
    assert_approx_eq!(first.z, -10.0);
    let tangent = path.tangents()[0];
    assert_approx_eq!(tangent.z, 1.0);
}

/// Test that a turn of more than 180 degrees is refused.
#[test]
fn tight_turn_is_rejected() {
    let params = RoadParams {
        straight_leg_length: 10.0,
        arc_length: 5.0,
        circle_radius: 1.0,
        turn: TurnDirection::Left,
    };
    assert!(matches!(
        sample_road(&params),
        Err(ConfigError::TurnTooSharp { .. })
    ));
}

/// Test that times and lengths run from the start to the end of the road.
#[test]
fn times_are_normalised() {
    for turn in [TurnDirection::Left, TurnDirection::Right] {
        let path = sample_road(&road(turn)).unwrap();
        let n = path.num_points();
        assert_eq!(path.times()[0], 0.0);
        assert_eq!(path.times()[n - 1], 1.0);
        assert_eq!(path.cumulative_lengths()[n - 1], path.length());
        for pair in path.cumulative_lengths().windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        for pair in path.times().windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }
}

/// Test that the cumulative lengths match the distances between vertices.
#[test]
fn cumulative_lengths_follow_geometry() {
    let path = sample_road(&road(TurnDirection::Left)).unwrap();
    let chord_length: f64 = path
        .points()
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).magnitude())
        .sum();
    // Chords cut the corner slightly
    assert!(chord_length <= path.length());
    assert_approx_eq!(chord_length, path.length(), 1e-3);
}

/// Test that a right turn is the mirror image of a left turn.
#[test]
fn right_turn_mirrors_left_turn() {
    let left = sample_road(&road(TurnDirection::Left)).unwrap();
    let right = sample_road(&road(TurnDirection::Right)).unwrap();
    assert_eq!(left.num_points(), right.num_points());
    assert_eq!(left.length(), right.length());

    let mirror = |p: Point3d| Point3d::new(-p.x, p.y, p.z);
    for i in 0..left.num_points() {
        assert_eq!(mirror(left.points()[i]), right.points()[i]);
        let (lt, rt) = (left.tangents()[i], right.tangents()[i]);
        assert_eq!((-lt.x, lt.y, lt.z), (rt.x, rt.y, rt.z));
        let (ln, rn) = (left.normals()[i], right.normals()[i]);
        assert_eq!((-ln.x, ln.y, ln.z), (rn.x, rn.y, rn.z));
    }
    assert_eq!(left.cumulative_lengths(), right.cumulative_lengths());
    assert!(right.points().last().unwrap().x < 0.0);
}

/// Test that the path ends are returned for times 0 and 1.
#[test]
fn end_points_match_vertices() {
    let path = VertexPath::road(&road(TurnDirection::Right)).unwrap();
    let transform = Transform::default();
    let query = path.query(&transform);
    let n = path.num_points();
    for end in [EndOfPath::Clamp, EndOfPath::PingPong] {
        let start = query.point_at_time(0.0, end);
        assert_eq!(start, query.point(0));
        let finish = query.point_at_time(1.0, end);
        let last = query.point(n - 1);
        assert_approx_eq!(finish.x, last.x, 1e-9);
        assert_approx_eq!(finish.z, last.z, 1e-9);
    }
}

/// Test that every vertex is its own closest point.
#[test]
fn closest_point_of_vertex() {
    let path = sample_road(&road(TurnDirection::Left)).unwrap();
    let transform = Transform::default();
    let query = path.query(&transform);
    for i in 0..path.num_points() {
        let vertex = query.point(i);
        let closest = query.closest(vertex);
        assert_approx_eq!(closest.time, path.times()[i], 1e-9);
        assert_approx_eq!((closest.position - vertex).magnitude(), 0.0, 1e-9);
        assert_approx_eq!(closest.distance, path.cumulative_lengths()[i], 1e-9);
    }
}

/// Test that distance-based queries agree with time-based ones.
#[test]
fn distance_and_time_agree() {
    let path = sample_road(&road(TurnDirection::Left)).unwrap();
    let transform = Transform::default();
    let query = path.query(&transform);
    for i in 0..=25 {
        let d = i as f64;
        let t = d / path.length();
        assert_eq!(
            query.point_at_distance(d, EndOfPath::Clamp),
            query.point_at_time(t, EndOfPath::Clamp)
        );
        assert_eq!(
            query.direction_at_distance(d, EndOfPath::Clamp),
            query.direction_at_time(t, EndOfPath::Clamp)
        );
        assert_eq!(
            query.normal_at_distance(d, EndOfPath::Clamp),
            query.normal_at_time(t, EndOfPath::Clamp)
        );
        assert_eq!(
            query.rotation_at_distance(d, EndOfPath::Clamp),
            query.rotation_at_time(t, EndOfPath::Clamp)
        );
    }
}

/// Test that travelling past the end of the road obeys the end of path behaviour.
#[test]
fn end_of_path_behaviours() {
    let path = sample_road(&road(TurnDirection::Left)).unwrap();
    let transform = Transform::default();
    let query = path.query(&transform);

    let beyond = query.point_at_time(1.2, EndOfPath::PingPong);
    let reflected = query.point_at_time(0.8, EndOfPath::Clamp);
    assert_approx_eq!((beyond - reflected).magnitude(), 0.0, 1e-9);

    let wrapped = query.point_at_time(1.3, EndOfPath::Wrap);
    let early = query.point_at_time(0.3, EndOfPath::Wrap);
    assert_approx_eq!((wrapped - early).magnitude(), 0.0, 1e-9);

    let clamped = query.point_at_time(7.0, EndOfPath::Clamp);
    assert_eq!(clamped, query.point_at_time(1.0, EndOfPath::Clamp));
}
