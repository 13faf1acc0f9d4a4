//! Road centrelines made of a straight entry leg, a circular arc and a straight exit leg.

use crate::debug::debug_road;
use crate::error::{check_positive, ConfigError};
use crate::math::{PathSpace, Point3d, Vector3d};
use crate::path::VertexPath;
use cgmath::prelude::*;
use cgmath::Rad;
use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Vertices placed along the arc per degree of turn.
const VERTICES_PER_DEGREE: f64 = 1.0;

/// The most vertices a single road may be sampled into.
pub const MAX_ROAD_VERTICES: usize = 1 << 24;

/// Which way the road turns, seen from above when travelling along +Z.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TurnDirection {
    /// Turns towards +X.
    #[default]
    Left,
    /// Turns towards -X.
    Right,
}

impl TurnDirection {
    /// The unit vector pointing from the entry leg towards the centre of the turn.
    pub fn lateral(self) -> Vector3d {
        match self {
            TurnDirection::Left => Vector3d::unit_x(),
            TurnDirection::Right => -Vector3d::unit_x(),
        }
    }
}

/// The attributes of a road segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoadParams {
    /// The length of each straight leg in m.
    pub straight_leg_length: f64,
    /// The length of the arc in m.
    pub arc_length: f64,
    /// The radius of the arc in m.
    pub circle_radius: f64,
    /// Which way the arc turns.
    pub turn: TurnDirection,
}

impl RoadParams {
    /// The angle the road turns through.
    pub fn turn_angle(&self) -> Rad<f64> {
        Rad(self.arc_length / self.circle_radius)
    }

    /// The length of the road centreline in m.
    pub fn total_length(&self) -> f64 {
        2.0 * self.straight_leg_length + self.arc_length
    }

    /// Checks the parameters describe a road that can be sampled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout().map(|_| ())
    }

    /// Validates the parameters and works out how many vertices go where.
    fn layout(&self) -> Result<RoadLayout, ConfigError> {
        let leg = check_positive("straight_leg_length", self.straight_leg_length)?;
        let arc = check_positive("arc_length", self.arc_length)?;
        check_positive("circle_radius", self.circle_radius)?;
        let angle = self.turn_angle().0;
        if angle >= PI {
            return Err(ConfigError::TurnTooSharp { angle });
        }

        let mut density = (angle.to_degrees() * VERTICES_PER_DEGREE / arc).round();
        if density < 1.0 {
            warn!(
                "turn of {:.2} degrees over {} m is very gentle; using 1 vertex per metre",
                angle.to_degrees(),
                arc
            );
            density = 1.0;
        }

        // Counted in floating point first, as huge lengths would overflow a `usize`
        let verts_per_leg = (leg * density).round().max(2.0);
        let verts_on_arc = (arc * density).round().max(1.0);
        let count = 2.0 * verts_per_leg + verts_on_arc;
        if count > MAX_ROAD_VERTICES as f64 {
            return Err(ConfigError::TooManyVertices {
                count,
                max: MAX_ROAD_VERTICES,
            });
        }
        Ok(RoadLayout {
            density,
            verts_per_leg: verts_per_leg as usize,
            verts_on_arc: verts_on_arc as usize,
        })
    }
}

/// How the vertices of a road are shared out between its parts.
struct RoadLayout {
    /// Vertices per metre.
    density: f64,
    verts_per_leg: usize,
    verts_on_arc: usize,
}

/// Accumulates the per-vertex arrays of a road.
#[derive(Default)]
struct RoadVertices {
    points: Vec<Point3d>,
    tangents: Vec<Vector3d>,
    normals: Vec<Vector3d>,
    lengths: Vec<f64>,
}

impl RoadVertices {
    fn with_capacity(count: usize) -> Self {
        Self {
            points: Vec::with_capacity(count),
            tangents: Vec::with_capacity(count),
            normals: Vec::with_capacity(count),
            lengths: Vec::with_capacity(count),
        }
    }

    fn push(&mut self, point: Point3d, tangent: Vector3d, normal: Vector3d, length: f64) {
        self.points.push(point);
        self.tangents.push(tangent);
        self.normals.push(normal);
        self.lengths.push(length);
    }
}

/// Samples a road into a [VertexPath] in the XZ plane.
///
/// The entry leg runs along +Z and ends at the origin, where the arc begins.
/// Vertices are spaced at one per degree of turn on the arc, and the legs use
/// the same number of vertices per metre so there is no jump in density
/// where they meet. Normals point towards the centre of the turn.
pub fn sample_road(params: &RoadParams) -> Result<VertexPath, ConfigError> {
    let RoadLayout {
        density,
        verts_per_leg,
        verts_on_arc,
    } = params.layout()?;
    let RoadParams {
        straight_leg_length: leg,
        arc_length: arc,
        circle_radius: radius,
        turn,
    } = *params;
    let turn_angle = params.turn_angle().0;
    let count = 2 * verts_per_leg + verts_on_arc;
    debug!(
        "sampling road: {} vertices ({} per leg, {} on arc, {} per metre)",
        count, verts_per_leg, verts_on_arc, density
    );

    let forward = Vector3d::unit_z();
    let lateral = turn.lateral();
    let up = Vector3d::unit_y();
    let mut verts = RoadVertices::with_capacity(count);

    // The entry leg, up to (but not including) the start of the arc
    let start = Point3d::new(0.0, 0.0, -leg);
    let leg_step = leg / verts_per_leg as f64;
    for i in 0..verts_per_leg {
        let dist = i as f64 * leg_step;
        verts.push(start + forward * dist, forward, lateral, dist);
    }

    // The arc, swept from angle PI towards PI - turn_angle around the centre
    let centre = Point3d::from_vec(lateral * radius);
    let arc_frame = |angle: f64| {
        let radial = lateral * angle.cos() + forward * angle.sin();
        let tangent = lateral * angle.sin() - forward * angle.cos();
        (centre + radial * radius, tangent, -radial)
    };
    let rate = turn_angle / verts_on_arc as f64;
    let arc_step = arc / verts_on_arc as f64;
    for k in 0..verts_on_arc {
        let (point, tangent, normal) = arc_frame(PI - rate * k as f64);
        verts.push(point, tangent, normal, leg + k as f64 * arc_step);
    }

    // The exit leg, from the exact end of the arc to the end of the road
    let (exit_start, exit_dir, exit_normal) = arc_frame(PI - turn_angle);
    let exit_step = leg / (verts_per_leg - 1) as f64;
    for j in 0..verts_per_leg {
        let dist = j as f64 * exit_step;
        verts.push(exit_start + exit_dir * dist, exit_dir, exit_normal, leg + arc + dist);
    }

    let path = VertexPath::from_parts(
        PathSpace::PlaneXZ,
        false,
        up,
        verts.points,
        verts.tangents,
        verts.normals,
        verts.lengths,
    )?;
    debug_road(&path, centre, radius);
    Ok(path)
}

impl VertexPath {
    /// Samples a road into a path. See [sample_road].
    pub fn road(params: &RoadParams) -> Result<VertexPath, ConfigError> {
        sample_road(params)
    }
}
