//! Errors reported while building a vertex path.

/// An invalid set of parameters was supplied to one of the path constructors.
///
/// No path is produced when this is returned; correct the input and sample again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be greater than zero (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },
    #[error("arc length divided by circle radius must be less than 180 degrees (got {:.1} degrees)", .angle.to_degrees())]
    TurnTooSharp { angle: f64 },
    #[error("road would need {count} vertices, more than the limit of {max}")]
    TooManyVertices { count: f64, max: usize },
    #[error("a path requires at least 2 vertices (got {count})")]
    TooFewVertices { count: usize },
    #[error("{name} has {actual} entries, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("cumulative length decreases at vertex {index}")]
    DecreasingLength { index: usize },
    #[error("path has zero total length")]
    ZeroLength,
    #[error("cumulative lengths must start at zero (got {first})")]
    NonZeroStart { first: f64 },
    #[error("tangent at vertex {index} has zero length")]
    ZeroTangent { index: usize },
}

/// Checks that a named parameter is finite and strictly positive.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        Err(ConfigError::NonFinite { name })
    } else if value <= 0.0 {
        Err(ConfigError::NonPositive { name, value })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn check_positive_rejects_bad_values() {
        assert_eq!(check_positive("radius", 2.0), Ok(2.0));
        assert_eq!(
            check_positive("radius", 0.0),
            Err(ConfigError::NonPositive { name: "radius", value: 0.0 })
        );
        assert_eq!(
            check_positive("radius", f64::NAN),
            Err(ConfigError::NonFinite { name: "radius" })
        );
    }

    #[test]
    fn messages_are_descriptive() {
        let err = ConfigError::TurnTooSharp { angle: std::f64::consts::PI };
        assert_eq!(
            err.to_string(),
            "arc length divided by circle radius must be less than 180 degrees (got 180.0 degrees)"
        );
    }
}
