//! Configuration models and loaders for body catalogs.

use std::fs::File;
use std::path::{Path, PathBuf};

use kerbol_core::constants::G;
use kerbol_core::units::deg_to_rad;
use kerbol_orbits::{BodyDescriptor, Catalog, CatalogError, Orbit};
use serde::Deserialize;
use thiserror::Error;

/// Celestial body as described in a catalog file. Lengths in metres, times in seconds.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    /// Name of the body this one orbits. Falls back to the stock system table.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub mass: f64,
    /// Gravitational parameter; defaults to `mass · G`.
    #[serde(default)]
    pub mu: Option<f64>,
    pub radius: f64,
    #[serde(default)]
    pub rotation_period: f64,
    #[serde(default)]
    pub sphere_of_influence: f64,
    #[serde(default)]
    pub max_atmosphere_height: f64,
    #[serde(default)]
    pub atmosphere_contains_oxygen: bool,
    #[serde(default)]
    pub parking_orbit_height: Option<f64>,
    #[serde(default)]
    pub launch_delta_v: Option<f64>,
    #[serde(default)]
    pub orbit: Option<OrbitConfig>,
}

/// Orbital elements; angles other than the mean anomaly are in degrees.
#[derive(Debug, Deserialize, Clone)]
pub struct OrbitConfig {
    pub semi_major_axis: f64,
    #[serde(default)]
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub argument_of_periapsis_deg: f64,
    #[serde(default)]
    pub longitude_of_ascending_node_deg: f64,
    /// Radians.
    #[serde(default)]
    pub mean_anomaly_at_epoch: f64,
    #[serde(default)]
    pub epoch: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

impl OrbitConfig {
    pub fn to_orbit(&self) -> Orbit {
        Orbit {
            semi_major_axis: self.semi_major_axis,
            eccentricity: self.eccentricity,
            inclination: deg_to_rad(self.inclination_deg),
            argument_of_periapsis: deg_to_rad(self.argument_of_periapsis_deg),
            longitude_of_ascending_node: deg_to_rad(self.longitude_of_ascending_node_deg),
            mean_anomaly_at_epoch: self.mean_anomaly_at_epoch,
            epoch: self.epoch,
            primary: None,
            gravitational_parameter: None,
        }
    }
}

impl BodyConfig {
    pub fn to_descriptor(&self) -> BodyDescriptor {
        let mu = self.mu.unwrap_or(self.mass * G);
        let mut descriptor = BodyDescriptor::new(self.name.clone(), mu, self.radius);
        if self.mass > 0.0 {
            descriptor = descriptor.with_mass(self.mass);
        }
        descriptor = descriptor
            .with_rotation_period(self.rotation_period)
            .with_sphere_of_influence(self.sphere_of_influence)
            .with_atmosphere(self.max_atmosphere_height, self.atmosphere_contains_oxygen);
        if let Some(height) = self.parking_orbit_height {
            descriptor = descriptor.with_parking_orbit_height(height);
        }
        if let Some(delta_v) = self.launch_delta_v {
            descriptor = descriptor.with_launch_delta_v(delta_v);
        }
        if let Some(orbit) = &self.orbit {
            descriptor = descriptor.with_orbit(orbit.to_orbit());
        }
        descriptor
    }
}

/// Load body configurations from a YAML list, a TOML file, or a directory of TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

/// Load body configurations and resolve them into a catalog.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, ConfigError> {
    resolve_catalog(&load_bodies(path)?)
}

/// Link configured bodies to their parents and validate the resulting tree.
///
/// An explicit `parent` must name a body of the catalog. Without one, the stock
/// system's parent is used when that body is present; otherwise the body is a root.
pub fn resolve_catalog(bodies: &[BodyConfig]) -> Result<Catalog, ConfigError> {
    let mut builder = Catalog::builder();
    let ids: Vec<_> = bodies
        .iter()
        .map(|body| builder.add_body(body.to_descriptor()))
        .collect();
    for (body, id) in bodies.iter().zip(ids) {
        let parent_id = match &body.parent {
            Some(parent) => Some(builder.id_of(parent).ok_or_else(|| {
                CatalogError::UnknownParent {
                    body: body.name.clone(),
                    parent: parent.clone(),
                }
            })?),
            None => default_parent(&body.name).and_then(|parent| builder.id_of(parent)),
        };
        if let Some(parent_id) = parent_id {
            builder.attach(id, parent_id);
        }
    }
    Ok(builder.build()?)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

/// Parent of a stock Kerbol system body, matched case-insensitively.
pub fn default_parent(name: &str) -> Option<&'static str> {
    let upper = name.to_ascii_uppercase();
    match upper.as_str() {
        "MOHO" | "EVE" | "KERBIN" | "DUNA" | "DRES" | "JOOL" | "EELOO" => Some("Sun"),
        "GILLY" => Some("Eve"),
        "MUN" | "MINMUS" => Some("Kerbin"),
        "IKE" => Some("Duna"),
        "LAYTHE" | "VALL" | "TYLO" | "BOP" | "POL" => Some("Jool"),
        _ => None,
    }
}
