use glam::{Mat4, Quat, Vec3};
use planetglide_core::{CameraPose, InstanceTransform};

/// Borrowed view of everything a renderer needs for one frame.
///
/// `clouds` and `particles` are laid out for direct upload with
/// `bytemuck::cast_slice`; hidden slots carry a zero-scale model matrix.
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub plane_position: Vec3,
    pub plane_orientation: Quat,
    pub camera: CameraPose,
    pub clouds: &'a [InstanceTransform],
    pub particles: &'a [InstanceTransform],
}

impl RenderSnapshot<'_> {
    pub fn plane_model(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.plane_orientation, self.plane_position)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn cloud_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.clouds)
    }

    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.particles)
    }
}
