use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Perspective camera for 3D rendering.
/// Right-handed, Y-up, depth mapped to [0, 1] (WebGPU clip space).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Width / height of the viewport.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Camera position (w = 1), used for point-size attenuation.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_deg,
            aspect,
            near,
            far,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a viewport resize. Degenerate sizes are ignored.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Ray from the eye through a point in normalized device coordinates
    /// (`x`, `y` in [-1, 1], +y up).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let half_h = (self.fov_deg.to_radians() * 0.5).tan();
        let eye_dir = Vec3::new(ndc.x * half_h * self.aspect, ndc.y * half_h, -1.0);
        let direction = self
            .view_matrix()
            .inverse()
            .transform_vector3(eye_dir)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        Ray {
            origin: self.position,
            direction,
        }
    }

    /// Project a world point to NDC. `None` when it is behind the eye.
    pub fn project(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.view_proj() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 1000.0)
    }
}

/// Orbit camera rig: keeps the camera on a sphere around `target`,
/// optionally spinning it around the vertical axis every tick.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub distance: f32,
    /// Angle around Y, measured from +Z toward +X.
    pub azimuth: f32,
    /// Angle above the XZ plane.
    pub elevation: f32,
    pub auto_rotate: bool,
    /// 1.0 = one full turn per 60 seconds at 60 ticks per second.
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitControls {
    /// Highest elevation reached, just short of the pole.
    const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;

    /// Take over `camera`'s current placement.
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length();
        let (azimuth, elevation) = if distance > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / distance).clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };
        Self {
            target: camera.target,
            distance,
            azimuth,
            elevation,
            auto_rotate: false,
            auto_rotate_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }

    pub fn with_auto_rotate(mut self, speed: f32) -> Self {
        self.auto_rotate = true;
        self.auto_rotate_speed = speed;
        self
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Azimuth change per tick while auto-rotating.
    pub fn auto_rotate_step(&self) -> f32 {
        std::f32::consts::TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }

    /// Change the orbit radius by a factor (> 1 zooms out).
    pub fn zoom(&mut self, factor: f32) {
        self.distance *= factor;
    }

    /// One tick: advance auto-rotation, apply limits, and place the camera.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        if self.auto_rotate {
            self.azimuth -= self.auto_rotate_step();
        }
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.elevation = self.elevation.clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);

        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let offset = Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * self.distance;
        camera.target = self.target;
        camera.position = self.target + offset;
    }
}
