use crate::math::Point3d;
use crate::path::VertexPath;
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

/// Records a sampled road: every vertex with its normal, and the circle its arc follows.
#[allow(unused)]
pub fn debug_road(path: &VertexPath, centre: Point3d, radius: f64) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        let vertices = path
            .points()
            .iter()
            .zip(path.normals())
            .map(|(p, n)| json!({ "p": [p.x, p.y, p.z], "n": [n.x, n.y, n.z] }))
            .collect::<Vec<_>>();
        frame.borrow_mut().push(json!({
            "type": "road",
            "length": path.length(),
            "centre": [centre.x, centre.y, centre.z],
            "radius": radius,
            "vertices": vertices,
        }))
    })
}

/// Takes the geometry recorded on this thread since the last call.
#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
