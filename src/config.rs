//! Static startup configuration
//!
//! Everything here is read once before the first frame. Defaults describe a
//! scaled eight-planet solar system; a TOML file can override any section.
//!
//! ```toml
//! [clock]
//! max_frame_delta = 0.05
//!
//! [camera]
//! zoom_floor = 0.2
//!
//! [[bodies]]
//! name = "earth"
//! semi_major = 100.0
//! semi_minor = 99.0
//! color = 0x0000ff
//! size = 11.2
//! default_speed = 1.0
//! axial_tilt = 23.44
//! spins_per_orbit = 12.0
//! ```

use std::{collections::HashSet, fs, path::Path};

use cgmath::Vector3;
use serde::Deserialize;

use crate::{
    error::{OrreryError, Result},
    gfx::camera::{
        camera_controller::{
            DEFAULT_PAN_SPEED, DEFAULT_ROTATE_SENSITIVITY, DEFAULT_ZOOM_FLOOR, DEFAULT_ZOOM_STEP,
        },
        CameraInputController, CameraPose, KeyBindings, Trigger, RESERVED_KEYS,
    },
    simulation::{clock::DEFAULT_MAX_FRAME_DELTA, path::EllipticalPath},
};

/// Radius of the sun mesh; planet sizes are fractions of it.
pub const SUN_RADIUS: f32 = 35.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub semi_major: f32,
    pub semi_minor: f32,
    /// 0xRRGGBB
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_speed")]
    pub default_speed: f32,
    /// Degrees.
    #[serde(default)]
    pub axial_tilt: f32,
    #[serde(default)]
    pub spins_per_orbit: f32,
}

fn default_color() -> u32 {
    0xffffff
}

fn default_size() -> f32 {
    0.3 * SUN_RADIUS
}

fn default_speed() -> f32 {
    1.0
}

impl BodyConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        semi_major: f32,
        semi_minor: f32,
        color: u32,
        size: f32,
        default_speed: f32,
        axial_tilt: f32,
        spins_per_orbit: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            semi_major,
            semi_minor,
            color,
            size,
            default_speed,
            axial_tilt,
            spins_per_orbit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub zoom: f32,
    /// Visible world height at zoom 1.
    pub view_size: f32,
    pub znear: f32,
    pub zfar: f32,
    pub pan_speed: f32,
    pub zoom_step: f32,
    pub zoom_floor: f32,
    pub rotate_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let position = [0.0, -2500.0, 1200.0];
        Self {
            position,
            // Tilted so the camera looks at the sun from its start position
            rotation_x: (-position[1]).atan2(position[2]),
            rotation_y: 0.0,
            zoom: 1.0,
            view_size: 4000.0,
            znear: 0.1,
            zfar: 15000.0,
            pan_speed: DEFAULT_PAN_SPEED,
            zoom_step: DEFAULT_ZOOM_STEP,
            zoom_floor: DEFAULT_ZOOM_FLOOR,
            rotate_sensitivity: DEFAULT_ROTATE_SENSITIVITY,
        }
    }
}

impl CameraConfig {
    pub fn initial_pose(&self) -> CameraPose {
        CameraPose::new(
            Vector3::from(self.position),
            self.rotation_x,
            self.rotation_y,
            self.zoom,
        )
    }

    pub fn build_controller(&self, bindings: KeyBindings) -> CameraInputController {
        let mut controller =
            CameraInputController::new(self.initial_pose(), bindings).with_zoom_floor(self.zoom_floor);
        controller.pan_speed = self.pan_speed;
        controller.zoom_step = self.zoom_step;
        controller.rotate_sensitivity = self.rotate_sensitivity;
        controller
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub max_frame_delta: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub bodies: Vec<BodyConfig>,
    pub camera: CameraConfig,
    pub clock: ClockConfig,
    pub bindings: KeyBindings,
}

impl Default for SystemConfig {
    fn default() -> Self {
        // Spin counts are scaled down so rotation stays visible at these speeds
        let bodies = vec![
            BodyConfig::new("mercury", 39.0, 38.0, 0xff0000, 0.122 * SUN_RADIUS, 1.6, 0.03, 1.5),
            BodyConfig::new("venus", 72.0, 71.0, 0xffffff, 0.304 * SUN_RADIUS, 1.2, 177.4, -0.9),
            BodyConfig::new("earth", 100.0, 99.0, 0x0000ff, 0.32 * SUN_RADIUS, 1.0, 23.44, 12.0),
            BodyConfig::new("mars", 152.0, 150.0, 0xff0000, 0.17 * SUN_RADIUS, 0.8, 25.19, 12.0),
            BodyConfig::new("jupiter", 520.0, 515.0, 0xffd700, 3.51 * SUN_RADIUS, 0.4, 3.13, 24.0),
            BodyConfig::new("saturn", 958.0, 950.0, 0x00008b, 2.92 * SUN_RADIUS, 0.3, 26.73, 24.0),
            BodyConfig::new("uranus", 1918.0, 1900.0, 0x00ffff, 1.27 * SUN_RADIUS, 0.2, 97.77, 16.0),
            BodyConfig::new("neptune", 3007.0, 2990.0, 0x00008b, 1.24 * SUN_RADIUS, 0.1, 28.32, 16.0),
        ];

        Self {
            bodies,
            camera: CameraConfig::default(),
            clock: ClockConfig::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl SystemConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SystemConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::info!(
            "Loaded {} bodies from {}",
            config.bodies.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bodies.is_empty() {
            return Err(OrreryError::EmptySystem);
        }

        let mut names = HashSet::new();
        for body in &self.bodies {
            if !names.insert(body.name.as_str()) {
                return Err(OrreryError::DuplicateBody(body.name.clone()));
            }
            EllipticalPath::named(&body.name, body.semi_major, body.semi_minor)?;
        }

        let cap = self.clock.max_frame_delta;
        if !(cap.is_finite() && cap > 0.0) {
            return Err(OrreryError::InvalidClockCap(cap));
        }

        let floor = self.camera.zoom_floor;
        if !(floor.is_finite() && floor > 0.0) {
            return Err(OrreryError::InvalidZoomFloor(floor));
        }

        for (_, trigger) in self.bindings.pairs() {
            if matches!(trigger, Trigger::Key(key) if RESERVED_KEYS.contains(key)) {
                return Err(OrreryError::ReservedKey(trigger.to_string()));
            }
        }

        Ok(())
    }
}
