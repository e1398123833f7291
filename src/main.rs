use anyhow::Context;
use orrery::prelude::*;

/// Frame sink that writes simulation output to the log. A GPU renderer plugs
/// in at the same seam.
struct LogSink {
    names: Vec<String>,
}

impl FrameSink for LogSink {
    fn set_body_transform(&mut self, id: BodyId, transform: &BodyTransform) {
        let name = self.names.get(id.0).map(String::as_str).unwrap_or("?");
        log::trace!(
            "{} at ({:.1}, {:.1}) spin {:.2}",
            name,
            transform.position.x,
            transform.position.y,
            transform.self_rotation
        );
    }

    fn set_orbit_outline(&mut self, id: BodyId, points: &[Vector2<f32>]) {
        let name = self.names.get(id.0).map(String::as_str).unwrap_or("?");
        log::debug!("{} orbit outline with {} points", name, points.len());
    }

    fn set_camera_pose(&mut self, pose: &CameraPose) {
        log::trace!(
            "camera at ({:.1}, {:.1}) rot ({:.3}, {:.3}) zoom {:.2}",
            pose.position.x,
            pose.position.y,
            pose.rotation_x,
            pose.rotation_y,
            pose.zoom
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SystemConfig::load(&path)
            .with_context(|| format!("failed to load system config from {}", path))?,
        None => SystemConfig::default(),
    };

    let sink = LogSink {
        names: config.bodies.iter().map(|b| b.name.clone()).collect(),
    };

    let app = OrreryApp::new(&config, Box::new(sink)).context("failed to start orrery")?;
    app.run()?;
    Ok(())
}
