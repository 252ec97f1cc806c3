//! Miscellaneous utility functions, usually related to vectors.

use crate::V2;

use angle::Angle;

/// Returns the bounding box of a set of points as a (min, max) pair of vectors.  Returns `None` if
/// the iterator didn't yield any points.
pub fn bbox(points: impl IntoIterator<Item = V2>) -> Option<(V2, V2)> {
    let mut is_iter_empty = true;
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for v in points {
        is_iter_empty = false;
        min_x = min_x.min(v.x);
        min_y = min_y.min(v.y);
        max_x = max_x.max(v.x);
        max_y = max_y.max(v.y);
    }
    if is_iter_empty {
        // If the iterator yielded no elements, then the bbox is not defined
        None
    } else {
        Some((V2::new(min_x, min_y), V2::new(max_x, max_y)))
    }
}

/// Rotates a vector **clockwise** by an angle
pub fn rotate_vec(v: V2, angle: impl Angle<f32> + Copy) -> V2 {
    let sin = angle.sin();
    let cos = angle.cos();
    // Rotation **clockwise** corresponds to multiplication by the following matrix (which looks
    // like the classic anti-clockwise matrix because our y-axis goes down where the one in maths
    // goes up):
    // | cos(angle)  -sin(angle) |
    // | sin(angle)   cos(angle) |
    V2 {
        x: v.x * cos - v.y * sin,
        y: v.x * sin + v.y * cos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use angle::Deg;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quarter_turn_is_clockwise_on_screen() {
        // With y pointing down, 'right' turns clockwise into 'down'
        let v = rotate_vec(V2::new(1.0, 0.0), Deg(90.0f32));
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn bbox_of_points() {
        let pts = vec![V2::new(0.0, 2.0), V2::new(4.0, -2.0), V2::new(2.0, 3.0)];
        let (min, max) = bbox(pts).unwrap();
        assert_eq!((min.x, min.y, max.x, max.y), (0.0, -2.0, 4.0, 3.0));
        assert!(bbox(Vec::new()).is_none());
    }
}
