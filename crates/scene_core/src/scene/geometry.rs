//! Plane and sphere primitives
//!
//! Also holds the bounding-sphere construction used for meshes (from vertex
//! positions) and whole models (merging the per-mesh spheres).

use crate::foundation::math::{max_axis_scale, Mat4, Point3, Vec3};

/// Plane defined by a point on it and a unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point on the plane
    pub position: Vec3,
    /// Unit normal
    pub normal: Vec3,
}

impl Plane {
    /// Create a new plane; the normal is normalized
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal: normal.normalize(),
        }
    }

    /// Signed distance from the plane to `point`; positive in front of the normal
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.normal.dot(&(point - self.position))
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            normal: Vec3::z(),
        }
    }
}

/// Bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center position
    pub center: Vec3,
    /// Radius (non-negative)
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere around a set of vertex positions.
    ///
    /// The center is the midpoint of the points' axis-aligned bounds; the
    /// radius is the largest distance from that center to any point.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = points.first()?;
        let (min, max) = points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));

        let center = (min + max) * 0.5;
        let radius_squared = points
            .iter()
            .map(|p| (p - center).magnitude_squared())
            .fold(0.0_f32, f32::max);

        Some(Self::new(center, radius_squared.sqrt()))
    }

    /// Sphere enclosing several spheres, as used for multi-mesh models.
    ///
    /// A single sphere is returned unchanged. Otherwise the axis-aligned
    /// bounds of every `center ± radius` are taken; the center is their
    /// midpoint and the radius reaches the farther of the two corners.
    pub fn merge(spheres: &[Sphere]) -> Option<Self> {
        match spheres {
            [] => None,
            [single] => Some(*single),
            [first, rest @ ..] => {
                let extent = |s: &Sphere| Vec3::repeat(s.radius);
                let init = (first.center - extent(first), first.center + extent(first));
                let (min, max) = rest.iter().fold(init, |(min, max), s| {
                    (min.inf(&(s.center - extent(s))), max.sup(&(s.center + extent(s))))
                });

                let center = (min + max) * 0.5;
                let radius = (center - min).magnitude().max((max - center).magnitude());
                Some(Self::new(center, radius))
            }
        }
    }

    /// This sphere carried through an affine `matrix`.
    ///
    /// The center is transformed as a point; the radius grows by the largest
    /// axis scale, which over-approximates non-uniformly scaled spheres.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let center = matrix.transform_point(&Point3::from(self.center)).coords;
        Self::new(center, self.radius * max_axis_scale(matrix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{compose_trs, Quat};
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_signed_distance() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, 5.0));

        assert_relative_eq!(plane.normal, Vec3::z());
        assert_relative_eq!(plane.distance_to_point(&Vec3::new(3.0, 1.0, 5.0)), 3.0);
        assert_relative_eq!(plane.distance_to_point(&Vec3::new(0.0, 0.0, -1.0)), -3.0);
    }

    #[test]
    fn test_sphere_from_points() {
        let points = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(1.0, -2.0, 1.0),
        ];
        let sphere = Sphere::from_points(&points).unwrap();

        assert_relative_eq!(sphere.center, Vec3::new(1.0, 0.0, 0.5), epsilon = 1e-6);
        // Farthest points are (1,±2,·) and the x extremes at distance sqrt(4.25)
        assert_relative_eq!(sphere.radius, 4.25_f32.sqrt(), epsilon = 1e-6);
        assert!(points.iter().all(|p| (p - sphere.center).magnitude() <= sphere.radius + 1e-6));
    }

    #[test]
    fn test_sphere_from_no_points() {
        assert!(Sphere::from_points(&[]).is_none());
    }

    #[test]
    fn test_merge_single_sphere_is_unchanged() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.5);
        assert_eq!(Sphere::merge(&[sphere]), Some(sphere));
        assert_eq!(Sphere::merge(&[]), None);
    }

    #[test]
    fn test_merge_uses_bounds_midpoint_and_corner_distance() {
        let a = Sphere::new(Vec3::new(-2.0, 0.0, 0.0), 1.0);
        let b = Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        let merged = Sphere::merge(&[a, b]).unwrap();

        // Bounds (-3,-1,-1)..(3,1,1): corner distance sqrt(9 + 1 + 1)
        assert_relative_eq!(merged.center, Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(merged.radius, 11.0_f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_transformed_sphere() {
        let matrix = compose_trs(&Vec3::new(0.0, 0.0, 10.0), &Quat::identity(), &Vec3::new(1.0, 3.0, 2.0));
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0).transformed(&matrix);

        assert_relative_eq!(sphere.center, Vec3::new(1.0, 0.0, 10.0), epsilon = 1e-6);
        assert_relative_eq!(sphere.radius, 3.0, epsilon = 1e-6);
    }
}
