//! Camera view frustum
//!
//! Six planes rebuilt from a camera's projection parameters and world pose.
//! Every plane normal faces the inside of the volume, so a point is visible
//! when its signed distance to all six planes is non-negative.

use super::geometry::{Plane, Sphere};
use crate::ecs::components::CameraComponent;
use crate::foundation::math::{axis, Quat, Vec3};

/// Frustum for visibility culling
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frustum {
    /// Near clipping plane
    pub near: Plane,
    /// Far clipping plane
    pub far: Plane,
    /// Left side plane
    pub left: Plane,
    /// Right side plane
    pub right: Plane,
    /// Top side plane
    pub top: Plane,
    /// Bottom side plane
    pub bottom: Plane,
}

impl Frustum {
    /// Build a frustum for a camera at `position` looking along `rotation * +Z`
    pub fn from_camera(camera: &CameraComponent, aspect: f32, position: Vec3, rotation: &Quat) -> Self {
        let mut frustum = Self::default();
        frustum.calculate(camera, aspect, position, rotation);
        frustum
    }

    /// Rebuild all six planes.
    ///
    /// Camera parameters are not validated: `far <= near` or a zero aspect
    /// ratio give degenerate planes.
    pub fn calculate(&mut self, camera: &CameraComponent, aspect: f32, position: Vec3, rotation: &Quat) {
        let front = rotation * axis::forward();
        let right = rotation * axis::right();
        let up = rotation * axis::up();

        let half_height = camera.far * (camera.fov * 0.5).tan();
        let half_width = half_height * aspect;
        let far_center = front * camera.far;

        self.near = Plane::new(position + front * camera.near, front);
        self.far = Plane::new(position + far_center, -front);

        // Side planes pass through the viewer; the view direction is inside
        let side = |normal: Vec3| {
            let plane = Plane::new(position, normal);
            if plane.normal.dot(&front) < 0.0 {
                Plane::new(position, -plane.normal)
            } else {
                plane
            }
        };

        self.right = side((far_center - right * half_width).cross(&up));
        self.left = side(up.cross(&(far_center + right * half_width)));
        self.top = side(right.cross(&(up * half_height + far_center)));
        self.bottom = side((far_center - up * half_height).cross(&right));

        log::trace!(
            "Frustum rebuilt at {:?} (fov {:.1}°, near {}, far {}, aspect {})",
            position,
            camera.fov_degrees(),
            camera.near,
            camera.far,
            aspect
        );
    }

    /// Planes in near, far, left, right, top, bottom order
    pub fn planes(&self) -> [&Plane; 6] {
        [&self.near, &self.far, &self.left, &self.right, &self.top, &self.bottom]
    }

    /// Whether any part of `sphere` may be inside the frustum.
    ///
    /// Rejects the sphere only when it lies entirely behind one of the planes.
    pub fn is_sphere_in_frustum(&self, sphere: &Sphere) -> bool {
        self.planes()
            .iter()
            .all(|plane| plane.distance_to_point(&sphere.center) >= -sphere.radius)
    }

    /// Sphere test for a local-space bounding sphere under `rotation` and `scale`.
    ///
    /// The radius is multiplied by the largest scale component, so
    /// non-uniformly scaled objects are over-approximated and never wrongly
    /// culled. The center is rotated but not translated.
    pub fn is_bounding_sphere_in_frustum(&self, rotation: &Quat, scale: &Vec3, sphere: &Sphere) -> bool {
        let bounds = Sphere::new(rotation * sphere.center, sphere.radius * scale.max());
        self.is_sphere_in_frustum(&bounds)
    }
}
