//! Magnetic horizontal-center snapping.

/// Result of a center snap test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterSnap {
    /// Left offset to apply.
    pub left: f64,
    /// Whether the element was pulled onto the center line.
    pub snapped: bool,
}

impl CenterSnap {
    /// Create a result with no snapping.
    pub fn free(left: f64) -> Self {
        Self {
            left,
            snapped: false,
        }
    }
}

/// Snap an element's left offset so its horizontal center lines up with the
/// container's, when the two centers are closer than `threshold`.
///
/// All values are in container-local pixels. A free result returns `left`
/// unchanged; bounds clamping is the caller's concern.
pub fn snap_center_x(left: f64, width: f64, container_width: f64, threshold: f64) -> CenterSnap {
    let center = left + width / 2.0;
    let container_center = container_width / 2.0;

    if (center - container_center).abs() < threshold {
        CenterSnap {
            left: container_center - width / 2.0,
            snapped: true,
        }
    } else {
        CenterSnap::free(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_within_threshold() {
        // center 399 vs 400
        let result = snap_center_x(349.0, 100.0, 800.0, 20.0);
        assert!(result.snapped);
        assert_eq!(result.left, 350.0);
    }

    #[test]
    fn test_no_snap_outside_threshold() {
        // center 350 vs 400
        let result = snap_center_x(300.0, 100.0, 800.0, 20.0);
        assert!(!result.snapped);
        assert_eq!(result.left, 300.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // center exactly 20px off
        let result = snap_center_x(330.0, 100.0, 800.0, 20.0);
        assert!(!result.snapped);
        let result = snap_center_x(370.0 - 0.5, 100.0, 800.0, 20.0);
        assert!(result.snapped);
    }

    #[test]
    fn test_snap_from_right_side() {
        let result = snap_center_x(365.0, 100.0, 800.0, 20.0);
        assert!(result.snapped);
        assert_eq!(result.left, 350.0);
    }

    #[test]
    fn test_already_centered() {
        let result = snap_center_x(350.0, 100.0, 800.0, 20.0);
        assert!(result.snapped);
        assert_eq!(result.left, 350.0);
    }
}
