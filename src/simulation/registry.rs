//! Ordered, owned collection of the simulated bodies

use std::collections::HashSet;

use super::{body::OrbitingBody, path::EllipticalPath};
use crate::{
    config::BodyConfig,
    error::{OrreryError, Result},
};

/// Stable index of a body within its [`BodyRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// A body together with the static configuration it was built from.
#[derive(Debug, Clone)]
pub struct BodyEntry {
    pub config: BodyConfig,
    pub body: OrbitingBody,
}

impl BodyEntry {
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Static axial tilt in radians.
    pub fn axial_tilt(&self) -> f32 {
        self.config.axial_tilt.to_radians()
    }
}

/// Owns every [`OrbitingBody`] in configuration order.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    entries: Vec<BodyEntry>,
}

impl BodyRegistry {
    /// Builds one body per config entry, failing on bad radii or duplicate names.
    pub fn from_configs(configs: &[BodyConfig]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(configs.len());

        for config in configs {
            if !seen.insert(config.name.as_str()) {
                return Err(OrreryError::DuplicateBody(config.name.clone()));
            }

            let path = EllipticalPath::named(&config.name, config.semi_major, config.semi_minor)?;
            let body = OrbitingBody::new(path, config.default_speed, config.spins_per_orbit);
            entries.push(BodyEntry {
                config: config.clone(),
                body,
            });
        }

        log::info!("Built {} orbiting bodies", entries.len());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a body name to its id. Intended for startup wiring only.
    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.entries
            .iter()
            .position(|entry| entry.name() == name)
            .map(BodyId)
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyEntry> {
        self.entries.get(id.0)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut BodyEntry> {
        self.entries.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (BodyId(i), e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut BodyEntry)> {
        self.entries
            .iter_mut()
            .enumerate()
            .map(|(i, e)| (BodyId(i), e))
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = &mut OrbitingBody> {
        self.entries.iter_mut().map(|e| &mut e.body)
    }
}
