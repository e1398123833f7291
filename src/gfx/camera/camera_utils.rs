use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Where the camera is and how it looks at the scene.
///
/// `rotation_x`/`rotation_y` are Euler angles in radians applied X then Y.
/// `zoom` divides the orthographic view extents, so larger values magnify.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vector3<f32>,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub zoom: f32,
}

impl CameraPose {
    pub fn new(position: Vector3<f32>, rotation_x: f32, rotation_y: f32, zoom: f32) -> Self {
        Self {
            position,
            rotation_x,
            rotation_y,
            zoom,
        }
    }

    /// World-to-camera transform: the inverse of translate * rotX * rotY.
    pub fn build_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(Rad(-self.rotation_y))
            * Matrix4::from_angle_x(Rad(-self.rotation_x))
            * Matrix4::from_translation(-self.position)
    }

    /// Orthographic view-projection for a viewport of `aspect` (width / height).
    ///
    /// `view_size` is the visible world height at zoom 1.
    pub fn build_view_projection_matrix(
        &self,
        aspect: f32,
        view_size: f32,
        znear: f32,
        zfar: f32,
    ) -> Matrix4<f32> {
        let half_h = view_size / 2.0 / self.zoom;
        let half_w = half_h * aspect;
        let proj = OPENGL_TO_WGPU_MATRIX
            * cgmath::ortho(-half_w, half_w, -half_h, half_h, znear, zfar);
        proj * self.build_view_matrix()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 0.0), 0.0, 0.0, 1.0)
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Packs a pose for upload to a GPU uniform buffer.
    pub fn from_pose(pose: &CameraPose, aspect: f32, view_size: f32, znear: f32, zfar: f32) -> Self {
        let p = pose.position;
        Self {
            view_position: [p.x, p.y, p.z, 1.0],
            view_proj: convert_matrix4_to_array(
                pose.build_view_projection_matrix(aspect, view_size, znear, zfar),
            ),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_camera_position_projects_to_centre() {
        let pose = CameraPose::new(Vector3::new(10.0, -20.0, 100.0), 0.0, 0.0, 1.0);
        let m = pose.build_view_projection_matrix(1.0, 200.0, 0.1, 1000.0);

        let clip = m * Vector4::new(10.0, -20.0, 50.0, 1.0);
        assert!(approx(clip.x, 0.0));
        assert!(approx(clip.y, 0.0));
        assert!(clip.z >= 0.0 && clip.z <= 1.0);
        assert!(approx(clip.w, 1.0));
    }

    #[test]
    fn test_depth_range_maps_near_and_far_to_unit_interval() {
        let pose = CameraPose::new(Vector3::new(0.0, 0.0, 0.0), 0.0, 0.0, 1.0);
        let m = pose.build_view_projection_matrix(1.0, 200.0, 1.0, 101.0);

        // Camera looks down -Z
        let near = m * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let mid = m * Vector4::new(0.0, 0.0, -51.0, 1.0);
        let far = m * Vector4::new(0.0, 0.0, -101.0, 1.0);

        assert!(approx(near.z, 0.0));
        assert!(approx(mid.z, 0.5));
        assert!(approx(far.z, 1.0));
        for clip in [near, mid, far] {
            assert!(approx(clip.w, 1.0));
        }
    }

    #[test]
    fn test_zoom_magnifies() {
        let mut pose = CameraPose::new(Vector3::new(0.0, 0.0, 100.0), 0.0, 0.0, 1.0);
        let point = Vector4::new(50.0, 0.0, 0.0, 1.0);

        let x1 = (pose.build_view_projection_matrix(1.0, 200.0, 0.1, 1000.0) * point).x;
        pose.zoom = 2.0;
        let x2 = (pose.build_view_projection_matrix(1.0, 200.0, 0.1, 1000.0) * point).x;

        assert!(approx(x1, 0.5));
        assert!(approx(x2, 1.0));
        assert!(approx((pose.build_view_projection_matrix(1.0, 200.0, 0.1, 1000.0) * point).w, 1.0));
    }

    #[test]
    fn test_rotation_x_tilts_view_towards_plane() {
        // Camera below the plane tilted up by 90 degrees looks along +Y
        let pose = CameraPose::new(
            Vector3::new(0.0, -100.0, 0.0),
            std::f32::consts::FRAC_PI_2,
            0.0,
            1.0,
        );
        let view = pose.build_view_matrix();

        let ahead = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(approx(ahead.x, 0.0));
        assert!(approx(ahead.y, 0.0));
        assert!(approx(ahead.z, -100.0));
    }

    #[test]
    fn test_uniform_layout() {
        let uniform = CameraUniform::from_pose(&CameraPose::default(), 1.5, 4000.0, 0.1, 15000.0);
        assert_eq!(uniform.as_bytes().len(), 80);
        assert_eq!(uniform.view_position, [0.0, 0.0, 0.0, 1.0]);
    }
}
