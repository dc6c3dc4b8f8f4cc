use serde::Deserialize;

/// Tunables for a `Session`. `Default` reproduces the stock engine constants;
/// any subset can be overridden from JSON thanks to `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub defaults: ObjectDefaults,
    pub input: InputConfig,
    pub pulse: PulseConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            defaults: ObjectDefaults::default(),
            input: InputConfig::default(),
            pulse: PulseConfig::default(),
        }
    }
}

/// Field values given to every object produced by `object.create`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObjectDefaults {
    pub color: String,
    pub opacity: f64,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    pub collidable: bool,
}

impl Default for ObjectDefaults {
    fn default() -> Self {
        Self {
            color: "black".into(),
            opacity: 1.0,
            size: 50.0,
            x: 50.0,
            y: 50.0,
            collidable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Pixels moved per nudge of the selected object.
    pub speed: f64,
}

impl Default for InputConfig {
    fn default() -> Self { Self { speed: 5.0 } }
}

/// `opacity = opacity_base + opacity_amp * sin(t)`,
/// `size = size_base + size_amp * sin(2t)`, with `t` advanced by `step`
/// once per frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub step: f64,
    pub opacity_base: f64,
    pub opacity_amp: f64,
    pub size_base: f64,
    pub size_amp: f64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            step: 0.05,
            opacity_base: 0.5,
            opacity_amp: 0.5,
            size_base: 40.0,
            size_amp: 10.0,
        }
    }
}
