//! Settings file loading and validation.
//!
//! Every field has a default, so a missing or empty file reproduces the
//! reference page. A loaded file is always validated before it is returned,
//! and validation reports every violation at once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::committee::{CommitteeRecord, Committees, DatasetError, WatermarkPosition};
use crate::constants::*;
use crate::particles::ParticleOptions;
use crate::theme::HexColor;
use crate::viewport::{Breakpoints, LayoutVariant};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Field '{field}' has invalid value {value}: {reason}")]
    InvalidField { field: String, value: String, reason: String },

    #[error("Validation failed in {file}:\n{issues}")]
    Validation { file: String, issues: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSettings {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: FPS,
            title: "GSL Tournament".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSettings {
    pub variant: LayoutVariant,
    pub breakpoints: Breakpoints,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Length of an exported video, in seconds.
    pub duration: f32,
    /// Seconds between automatic carousel advances in an export.
    pub autoplay: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self { duration: 12.0, autoplay: SPLASH_DURATION }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatermarkSettings {
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommitteeSettings {
    pub name: String,
    pub description: String,
    pub link: String,
    pub color: HexColor,
    #[serde(default)]
    pub watermark: WatermarkSettings,
}

impl CommitteeSettings {
    fn to_record(&self) -> Result<CommitteeRecord, DatasetError> {
        let w = &self.watermark;
        Ok(CommitteeRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            link: self.link.clone(),
            color: self.color.0,
            watermark: WatermarkPosition::new(w.top, w.right, w.bottom, w.left)?,
        })
    }
}

impl From<&CommitteeRecord> for CommitteeSettings {
    fn from(record: &CommitteeRecord) -> Self {
        let watermark = record.watermark;
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            link: record.link.clone(),
            color: record.color.into(),
            watermark: WatermarkSettings {
                top: watermark.top(),
                right: watermark.right(),
                bottom: watermark.bottom(),
                left: watermark.left(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub window: WindowSettings,
    pub layout: LayoutSettings,
    pub assets_dir: PathBuf,
    pub particles: ParticleOptions,
    pub export: ExportSettings,
    #[serde(rename = "committee")]
    pub committees: Vec<CommitteeSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            layout: LayoutSettings::default(),
            assets_dir: PathBuf::from("assets"),
            particles: ParticleOptions::default(),
            export: ExportSettings::default(),
            committees: Committees::default().iter().map(CommitteeSettings::from).collect(),
        }
    }
}

impl Settings {
    /// Builds the immutable committee list. Only fails on unvalidated settings.
    pub fn committees(&self) -> Result<Committees, DatasetError> {
        let records = self
            .committees
            .iter()
            .map(CommitteeSettings::to_record)
            .collect::<Result<Vec<_>, _>>()?;
        Committees::new(records)
    }
}

pub fn load_from_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        file: path.display().to_string(),
        source: e,
    })?;

    load_from_str(&content, &path.display().to_string())
}

pub fn load_from_str(content: &str, source_name: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::Parse {
        file: source_name.to_string(),
        source: e,
    })?;

    validate(&settings).map_err(|errors| ConfigError::Validation {
        file: source_name.to_string(),
        issues: errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"),
    })?;

    log::info!("loaded settings from {source_name}");
    Ok(settings)
}

/// Collects every violation before returning.
pub fn validate(settings: &Settings) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut invalid = |field: &str, value: &dyn std::fmt::Debug, reason: &str| {
        errors.push(ConfigError::InvalidField {
            field: field.to_string(),
            value: format!("{value:?}"),
            reason: reason.to_string(),
        });
    };

    let window = &settings.window;
    if window.width <= 0 {
        invalid("window.width", &window.width, "must be positive");
    }
    if window.height <= 0 {
        invalid("window.height", &window.height, "must be positive");
    }
    if window.fps == 0 {
        invalid("window.fps", &window.fps, "must be positive");
    }

    let breakpoints = &settings.layout.breakpoints;
    if breakpoints.very_small <= 0 || breakpoints.very_small >= breakpoints.mobile {
        invalid(
            "layout.breakpoints",
            &(breakpoints.very_small, breakpoints.mobile),
            "must satisfy 0 < very_small < mobile",
        );
    }

    let particles = &settings.particles;
    if particles.count > MAX_PARTICLE_COUNT {
        invalid("particles.count", &particles.count, &format!("must not exceed {MAX_PARTICLE_COUNT}"));
    }
    if !is_positive(particles.density_area) {
        invalid("particles.density_area", &particles.density_area, "must be positive");
    }
    if !(particles.speed.is_finite() && particles.speed >= 0.0) {
        invalid("particles.speed", &particles.speed, "must not be negative");
    }
    let (lo, hi) = particles.opacity;
    if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
        invalid("particles.opacity", &particles.opacity, "must be an ordered range within 0..=1");
    }
    let (lo, hi) = particles.radius;
    if !(is_positive(lo) && is_positive(hi) && lo <= hi) {
        invalid("particles.radius", &particles.radius, "must be an ordered range of positive radii");
    }
    if !is_positive(particles.repulse_distance) {
        invalid("particles.repulse_distance", &particles.repulse_distance, "must be positive");
    }
    if !is_positive(particles.repulse_duration) {
        invalid("particles.repulse_duration", &particles.repulse_duration, "must be positive");
    }

    let export = &settings.export;
    if !(is_positive(export.duration) && export.duration <= MAX_EXPORT_DURATION) {
        invalid(
            "export.duration",
            &export.duration,
            &format!("must be positive and at most {MAX_EXPORT_DURATION}s"),
        );
    }
    if !is_positive(export.autoplay) {
        invalid("export.autoplay", &export.autoplay, "must be positive");
    }

    if settings.committees.is_empty() {
        invalid("committee", &0, "at least one committee is required");
    }
    let mut names = HashSet::new();
    for (i, committee) in settings.committees.iter().enumerate() {
        let field = |name: &str| format!("committee[{i}].{name}");
        if committee.name.trim().is_empty() {
            invalid(&field("name"), &committee.name, "must not be empty");
        } else if !names.insert(committee.name.as_str()) {
            invalid(&field("name"), &committee.name, "must be unique");
        }
        if committee.link.trim().is_empty() {
            invalid(&field("link"), &committee.link, "must not be empty");
        }
        // Text reaches raylib as C strings
        let texts = [
            ("name", &committee.name),
            ("description", &committee.description),
            ("link", &committee.link),
        ];
        for (name, text) in texts {
            if text.contains('\0') {
                invalid(&field(name), text, "must not contain NUL characters");
            }
        }
        let w = &committee.watermark;
        if let Err(e) = WatermarkPosition::new(w.top, w.right, w.bottom, w.left) {
            invalid(&field("watermark"), w, &e.to_string());
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// False for zero, negatives, NaN and infinities.
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CUSTOM_TOML: &str = r##"
assets_dir = "static"

[window]
width = 390
height = 844

[layout]
variant = "flanking"

[particles]
count = 80
background = "#000000"

[[committee]]
name = "UNSC"
description = "Security Council"
link = "https://example.org/unsc"
color = "#0d47a1"
watermark = { top = -80.0, left = -80.0 }

[[committee]]
name = "WHO"
description = "World Health Organization"
link = "https://example.org/who"
color = "#1565c0"
"##;

    #[test]
    fn empty_file_yields_reference_settings() {
        let settings = load_from_str("", "empty.toml").expect("defaults are valid");
        assert_eq!(settings, Settings::default());
        let committees = settings.committees().expect("default committees");
        assert_eq!(committees, Committees::default());
    }

    #[test]
    fn custom_file_overrides_defaults() {
        let settings = load_from_str(CUSTOM_TOML, "custom.toml").expect("valid config");
        assert_eq!(settings.window.width, 390);
        assert_eq!(settings.window.fps, FPS);
        assert_eq!(settings.layout.variant, LayoutVariant::Flanking);
        assert_eq!(settings.assets_dir, PathBuf::from("static"));
        assert_eq!(settings.particles.count, 80);
        assert_eq!(settings.particles.speed, ParticleOptions::default().speed);

        let committees = settings.committees().expect("committees");
        assert_eq!(committees.len(), 2);
        assert_eq!(committees[0].watermark, WatermarkPosition::top_left(-80.0, -80.0));
        assert_eq!(committees[1].watermark, WatermarkPosition::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = load_from_str("[window\nwidth = ", "bad.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn malformed_color_is_a_parse_error() {
        let err = load_from_str("[particles]\ncolor = \"white\"\n", "color.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = load_from_str("[window]\ndepth = 3\n", "unknown.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn validation_collects_every_violation() {
        let mut settings = Settings::default();
        settings.window.fps = 0;
        settings.particles.opacity = (0.6, 0.2);
        settings.layout.breakpoints = Breakpoints { very_small: 700, mobile: 600 };
        settings.committees[1].name = settings.committees[0].name.clone();
        settings.committees[2].link = String::new();
        settings.committees[3].watermark =
            WatermarkSettings { top: Some(0.0), right: Some(0.0), bottom: Some(0.0), left: None };

        let errors = validate(&settings).unwrap_err();
        let fields: Vec<String> = errors
            .iter()
            .map(|e| match e {
                ConfigError::InvalidField { field, .. } => field.clone(),
                other => panic!("unexpected error {other}"),
            })
            .collect();
        assert_eq!(
            fields,
            [
                "window.fps",
                "layout.breakpoints",
                "particles.opacity",
                "committee[1].name",
                "committee[2].link",
                "committee[3].watermark",
            ]
        );
    }

    #[test]
    fn validation_rejects_non_finite_values() {
        let settings = load_from_str("[particles]\nspeed = nan\n", "nan.toml");
        assert!(matches!(settings, Err(ConfigError::Validation { .. })));

        let mut settings = Settings::default();
        settings.particles.radius = (f32::NAN, f32::NAN);
        settings.particles.density_area = f32::INFINITY;
        settings.particles.repulse_distance = f32::NAN;
        settings.particles.repulse_duration = f32::NEG_INFINITY;
        settings.particles.count = MAX_PARTICLE_COUNT + 1;
        settings.export.duration = f32::INFINITY;
        settings.export.autoplay = f32::NAN;

        let errors = validate(&settings).unwrap_err();
        let fields: Vec<String> = errors
            .iter()
            .filter_map(|e| match e {
                ConfigError::InvalidField { field, .. } => Some(field.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            fields,
            [
                "particles.count",
                "particles.density_area",
                "particles.radius",
                "particles.repulse_distance",
                "particles.repulse_duration",
                "export.duration",
                "export.autoplay",
            ]
        );
    }

    #[test]
    fn nul_characters_in_committee_text_are_rejected() {
        let mut settings = Settings::default();
        settings.committees[0].description = "Human\0Rights".to_string();
        settings.committees[1].link = "https://example.org/\0".to_string();

        let errors = validate(&settings).unwrap_err();
        let fields: Vec<String> = errors
            .iter()
            .filter_map(|e| match e {
                ConfigError::InvalidField { field, .. } => Some(field.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(fields, ["committee[0].description", "committee[1].link"]);
    }

    #[test]
    fn export_duration_is_capped() {
        let mut settings = Settings::default();
        settings.export.duration = MAX_EXPORT_DURATION;
        assert!(validate(&settings).is_ok());
        settings.export.duration = MAX_EXPORT_DURATION + 1.0;
        assert!(validate(&settings).is_err());
    }

    #[test]
    fn empty_committee_list_is_invalid() {
        let mut settings = Settings::default();
        settings.committees.clear();
        assert!(validate(&settings).is_err());
        assert_eq!(settings.committees(), Err(DatasetError::Empty));
    }

    #[test]
    fn load_from_file_reads_and_validates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("showcase.toml");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(CUSTOM_TOML.as_bytes()).expect("write");
        drop(file);

        let settings = load_from_file(&path).expect("valid file");
        assert_eq!(settings.committees.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
