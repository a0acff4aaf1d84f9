//! Locomotion on the planet surface and the chase camera that follows it.
//!
//! The plane's canonical frame has right `+X`, up `+Y` and forward `+Z`.
//! Each tick the plane turns in its tangent plane, moves forward, is
//! re-projected onto the sphere, and then has its frame re-aligned so local
//! up matches the new radial direction.

use glam::{Mat4, Quat, Vec3};
use tracing::trace;

use crate::collider::Sphere;
use crate::config::{CameraConfig, NavigatorConfig};
use crate::math::{degrees_to_radians, shortest_arc_rotation, unit_or_up};

/// Right, up and forward axes of the plane in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

/// Camera pose representing position and orientation.
///
/// The camera looks down its local `-Z` axis with `+Y` up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Camera orientation in world space.
    pub orientation: Quat,
}

impl CameraPose {
    /// Direction the camera is looking.
    pub fn look_direction(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Camera up vector.
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.look_direction(), self.up())
    }
}

/// Abstract steering input, already decoupled from any input device.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlIntent {
    /// `0` or `1`.
    pub thrust: f32,
    /// `-1` turns left, `+1` turns right.
    pub turn: f32,
}

/// Moves the plane over the sphere and keeps it upright.
#[derive(Debug, Clone)]
pub struct Navigator {
    radius: f32,
    speed: f32,
    turn_rate: f32,
    camera_config: CameraConfig,
    camera_pitch: Quat,
    position: Vec3,
    orientation: Quat,
    intent: ControlIntent,
    camera: CameraPose,
}

impl Navigator {
    /// Place the plane on a sphere of `radius` above `config.start_direction`,
    /// standing upright with an arbitrary but deterministic heading.
    pub fn new(radius: f32, config: &NavigatorConfig, camera: &CameraConfig) -> Self {
        let up = unit_or_up(config.start_direction);
        let mut navigator = Self {
            radius,
            speed: config.speed,
            turn_rate: degrees_to_radians(config.turn_rate_degrees),
            camera_config: camera.clone(),
            camera_pitch: Quat::from_rotation_x(degrees_to_radians(camera.pitch_degrees)),
            position: up * radius,
            orientation: shortest_arc_rotation(Vec3::Y, up),
            intent: ControlIntent::default(),
            camera: CameraPose {
                position: Vec3::ZERO,
                orientation: Quat::IDENTITY,
            },
        };
        navigator.camera = navigator.compute_camera(navigator.local_frame());
        navigator
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn intent(&self) -> ControlIntent {
        self.intent
    }

    /// Camera pose as of the last tick.
    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    /// Unit-radius collider centered on the plane.
    pub fn collider(&self) -> Sphere {
        Sphere::unit(self.position)
    }

    pub fn set_thrust(&mut self, thrust: f32) {
        self.intent.thrust = thrust.clamp(0.0, 1.0);
    }

    pub fn set_turn(&mut self, turn: f32) {
        self.intent.turn = turn.clamp(-1.0, 1.0);
    }

    pub fn set_intent(&mut self, intent: ControlIntent) {
        self.set_thrust(intent.thrust);
        self.set_turn(intent.turn);
    }

    /// Move the plane from outside the simulation. The next tick projects it
    /// back onto the sphere and re-aligns its frame.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Current local axes. Up is the radial direction, not the orientation's
    /// `+Y`, so it stays correct after an external [`Navigator::set_position`].
    pub fn local_frame(&self) -> LocalFrame {
        let right = (self.orientation * Vec3::X).normalize();
        let up = unit_or_up(self.position);
        let forward = match up.cross(right).try_normalize() {
            Some(f) => -f,
            // right collapsed onto up; fall back to the heading itself
            None => (self.orientation * Vec3::Z)
                .reject_from_normalized(up)
                .normalize_or_zero(),
        };
        LocalFrame { right, up, forward }
    }

    /// Advance one tick.
    ///
    /// Runs unconditionally: with no intent the position is re-projected and
    /// the frame re-aligned anyway, so external perturbation never lingers.
    pub fn update(&mut self, dt: f32) {
        let frame = self.local_frame();

        let moved = self.position + frame.forward * self.intent.thrust * dt * self.speed;
        let new_up = unit_or_up(moved);
        self.position = new_up * self.radius;

        // Re-align from the plane's own up, which lags the radial after an
        // external move, not from the radial itself.
        let plane_up = unit_or_up(self.orientation * Vec3::Y);
        let turn = Quat::from_axis_angle(plane_up, self.intent.turn * self.turn_rate * dt);
        let surface = shortest_arc_rotation(plane_up, new_up);
        self.orientation = (surface * turn * self.orientation).normalize();

        self.camera = self.compute_camera(self.local_frame());

        trace!(
            "navigator tick: position {:?}, thrust {}, turn {}",
            self.position, self.intent.thrust, self.intent.turn
        );
    }

    /// Chase camera behind and above the plane, pitched to look down at it.
    fn compute_camera(&self, frame: LocalFrame) -> CameraPose {
        let position = self.position - frame.forward * self.camera_config.view_distance
            + frame.up * self.camera_config.view_height;

        // Turn the camera's -Z onto the plane's forward, then pitch about the
        // camera's own right axis.
        let facing = Quat::from_rotation_y(std::f32::consts::PI);
        let orientation = (self.orientation * facing * self.camera_pitch).normalize();

        CameraPose {
            position,
            orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const RADIUS: f32 = 10.0;

    fn navigator() -> Navigator {
        Navigator::new(RADIUS, &NavigatorConfig::default(), &CameraConfig::default())
    }

    fn assert_on_surface(n: &Navigator) {
        let r = n.position().length();
        assert!((r - RADIUS).abs() < 1e-3, "radius drifted to {r}");
        assert!((n.orientation().length() - 1.0).abs() < 1e-4);
    }

    fn assert_upright(n: &Navigator) {
        let radial = n.position().normalize();
        let up = n.orientation() * Vec3::Y;
        assert!((up - radial).length() < 1e-3, "up {up:?} vs radial {radial:?}");
    }

    #[test]
    fn test_starts_on_surface_upright() {
        let n = navigator();
        assert!((n.position() - Vec3::new(0.0, RADIUS, 0.0)).length() < 1e-5);
        assert!(n.orientation().abs_diff_eq(Quat::IDENTITY, 1e-6));
        let frame = n.local_frame();
        assert!((frame.forward - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_custom_start_direction() {
        let config = NavigatorConfig {
            start_direction: Vec3::new(0.0, 0.0, -3.0),
            ..NavigatorConfig::default()
        };
        let n = Navigator::new(RADIUS, &config, &CameraConfig::default());
        assert!((n.position() - Vec3::new(0.0, 0.0, -RADIUS)).length() < 1e-4);
        assert_upright(&n);
    }

    #[test]
    fn test_thrust_moves_forward_along_surface() {
        let mut n = navigator();
        n.set_thrust(1.0);
        n.update(DT);
        assert!(n.position().z > 0.0);
        assert!(n.position().x.abs() < 1e-5);
        assert_on_surface(&n);

        // A quarter of the way round the planet.
        let quarter = std::f32::consts::FRAC_PI_2 * RADIUS;
        let ticks = (quarter / (6.0 * DT)).round() as usize;
        for _ in 1..ticks {
            n.update(DT);
        }
        let dir = n.position().normalize();
        assert!(dir.z > 0.99, "ended at {dir:?}");
        assert_upright(&n);
    }

    #[test]
    fn test_idle_ticks_change_nothing() {
        let mut n = navigator();
        let before = (n.position(), n.orientation());
        for _ in 0..120 {
            n.update(DT);
        }
        assert!((n.position() - before.0).length() < 1e-5);
        assert!(n.orientation().abs_diff_eq(before.1, 1e-5));
    }

    #[test]
    fn test_turn_right_rotates_heading_toward_right() {
        let mut n = navigator();
        let start = n.local_frame();
        n.set_turn(1.0);
        for _ in 0..45 {
            n.update(DT);
        }
        // 120 deg/s for 0.75s
        let forward = n.local_frame().forward;
        assert!((forward - start.right).length() < 1e-3, "forward {forward:?}");
        assert!((n.position() - Vec3::new(0.0, RADIUS, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_turn_left_rotates_heading_toward_left() {
        let mut n = navigator();
        n.set_turn(-1.0);
        n.update(DT);
        assert!(n.local_frame().forward.x < 0.0);
    }

    #[test]
    fn test_surface_adherence_under_mixed_intents() {
        let mut n = navigator();
        let pattern = [
            ControlIntent { thrust: 1.0, turn: 0.0 },
            ControlIntent { thrust: 1.0, turn: 1.0 },
            ControlIntent { thrust: 0.0, turn: -1.0 },
            ControlIntent { thrust: 0.0, turn: 0.0 },
            ControlIntent { thrust: 1.0, turn: -1.0 },
        ];
        for step in 0..3000 {
            n.set_intent(pattern[(step / 37) % pattern.len()]);
            n.update(DT);
            assert_on_surface(&n);
        }
        assert_upright(&n);
    }

    #[test]
    fn test_external_perturbation_is_corrected() {
        let mut n = navigator();
        n.set_position(Vec3::new(3.0, 14.0, 0.0));
        n.update(DT);
        assert_on_surface(&n);
        assert_upright(&n);
    }

    #[test]
    fn test_external_perturbation_corrected_while_idle() {
        let mut n = navigator();
        n.set_position(Vec3::new(3.0, 14.0, 0.0));
        for _ in 0..60 {
            n.update(DT);
            assert_on_surface(&n);
            assert_upright(&n);
        }
        assert_eq!(n.intent(), ControlIntent::default());
    }

    #[test]
    fn test_perturbed_plane_flies_upright() {
        let mut n = navigator();
        n.set_position(Vec3::new(0.0, 9.0, 4.0));
        n.set_intent(ControlIntent { thrust: 1.0, turn: 1.0 });
        for _ in 0..120 {
            n.update(DT);
            assert_on_surface(&n);
            assert_upright(&n);
        }
    }

    #[test]
    fn test_degenerate_position_is_clamped() {
        let mut n = navigator();
        n.set_position(Vec3::ZERO);
        n.set_thrust(1.0);
        n.update(DT);
        assert!(n.position().is_finite());
        assert!(n.orientation().is_finite());
        assert_on_surface(&n);
    }

    #[test]
    fn test_intent_is_clamped() {
        let mut n = navigator();
        n.set_intent(ControlIntent { thrust: 4.0, turn: -9.0 });
        assert_eq!(n.intent(), ControlIntent { thrust: 1.0, turn: -1.0 });
    }

    #[test]
    fn test_zero_dt_freezes_everything() {
        let mut n = navigator();
        n.set_intent(ControlIntent { thrust: 1.0, turn: 1.0 });
        let before = (n.position(), n.orientation());
        n.update(0.0);
        assert!((n.position() - before.0).length() < 1e-6);
        assert!(n.orientation().abs_diff_eq(before.1, 1e-6));
    }

    #[test]
    fn test_camera_trails_and_looks_at_plane() {
        let mut n = navigator();
        n.set_intent(ControlIntent { thrust: 1.0, turn: 0.5 });
        for _ in 0..200 {
            n.update(DT);
        }
        let frame = n.local_frame();
        let camera = n.camera();

        let offset = camera.position - n.position();
        assert!(offset.dot(frame.forward) < 0.0, "camera not behind");
        assert!(offset.dot(frame.up) > 0.0, "camera not above");

        let to_plane = (n.position() - camera.position).normalize();
        assert!(camera.look_direction().dot(to_plane) > 0.999);
        assert!((camera.orientation.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_view_matrix_maps_plane_in_front() {
        let n = navigator();
        let view = n.camera().view_matrix();
        let p = view.transform_point3(n.position());
        // Right-handed view space: in front means negative z.
        assert!(p.z < 0.0);
        assert!(p.x.abs() < 1e-3 && p.y.abs() < 1e-3);
    }
}
