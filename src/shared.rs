//! Publishing paths to concurrent readers.

use crate::error::ConfigError;
use crate::path::VertexPath;
use crate::road::{sample_road, RoadParams};
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};

/// Holds the current version of a path.
///
/// Readers take a snapshot with [SharedPath::load] and keep querying it for as
/// long as they like. Re-sampling builds a whole new path off to the side and
/// then swaps it in, so a reader never sees a half-built path.
#[derive(Debug)]
pub struct SharedPath {
    current: RwLock<Arc<VertexPath>>,
}

impl SharedPath {
    pub fn new(path: VertexPath) -> Self {
        Self {
            current: RwLock::new(Arc::new(path)),
        }
    }

    /// Gets the current path.
    pub fn load(&self) -> Arc<VertexPath> {
        // A panicking writer can only have been swapping an `Arc`, so the value is still whole
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current path, returning the previous one.
    pub fn publish(&self, path: VertexPath) -> Arc<VertexPath> {
        let path = Arc::new(path);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, path)
    }

    /// Samples a road and publishes it.
    ///
    /// If the parameters are invalid the current path is left in place.
    pub fn resample_road(&self, params: &RoadParams) -> Result<(), ConfigError> {
        let path = sample_road(params)?;
        debug!("publishing road with {} vertices", path.num_points());
        self.publish(path);
        Ok(())
    }
}
