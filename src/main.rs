use std::time::Instant;

use vertex_path::{math::Point3d, EndOfPath, RoadParams, SharedPath, Transform, TurnDirection};

/// Parses `[leg] [arc] [radius] [left|right]` from the command line.
fn parse_args() -> Result<RoadParams, String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let number = |idx: usize, default: f64| match args.get(idx) {
        Some(arg) => arg
            .parse::<f64>()
            .map_err(|err| format!("invalid number {:?}: {}", arg, err)),
        None => Ok(default),
    };
    let turn = match args.get(3).map(String::as_str) {
        None | Some("left") => TurnDirection::Left,
        Some("right") => TurnDirection::Right,
        Some(other) => return Err(format!("unknown turn direction {:?}", other)),
    };
    Ok(RoadParams {
        straight_leg_length: number(0, 10.0)?,
        arc_length: number(1, 5.0)?,
        circle_radius: number(2, 20.0)?,
        turn,
    })
}

fn main() {
    let params = match parse_args() {
        Ok(params) => params,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("usage: vertex-path [leg] [arc] [radius] [left|right]");
            std::process::exit(2);
        }
    };

    const NUM_SAMPLES: u32 = 1000;
    let start = Instant::now();
    for _ in 0..NUM_SAMPLES {
        if let Err(err) = vertex_path::sample_road(&params) {
            eprintln!("cannot sample road: {}", err);
            std::process::exit(1);
        }
    }
    println!("Avg. sample: {:?}", start.elapsed() / NUM_SAMPLES);

    let shared = SharedPath::new(match vertex_path::sample_road(&params) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("cannot sample road: {}", err);
            std::process::exit(1);
        }
    });
    let path = shared.load();
    let transform = Transform::default();
    let query = path.query(&transform);
    println!(
        "Road: {} vertices, {:.3} m long",
        path.num_points(),
        path.length()
    );

    const NUM_QUERIES: u32 = 100_000;
    let start = Instant::now();
    let mut sum = 0.0;
    for i in 0..NUM_QUERIES {
        let t = 1.5 * i as f64 / NUM_QUERIES as f64;
        sum += query.point_at_time(t, EndOfPath::PingPong).x;
    }
    println!(
        "Avg. point query: {:?} (checksum {:.3})",
        start.elapsed() / NUM_QUERIES,
        sum
    );

    let bounds = path.bounds();
    let start = Instant::now();
    let mut sum = 0.0;
    for i in 0..NUM_QUERIES {
        let f = i as f64 / NUM_QUERIES as f64;
        let target = Point3d::new(
            bounds.axis(0).lerp(f),
            0.0,
            bounds.axis(2).lerp(1.0 - f),
        );
        sum += query.closest_distance(target);
    }
    println!(
        "Avg. closest point query: {:?} (checksum {:.3})",
        start.elapsed() / NUM_QUERIES,
        sum
    );
}
