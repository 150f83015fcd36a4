#![warn(missing_docs)]

//! Toolpaths and G-code from chains of selected edges.
//!
//! Edges are picked in cutting order. The chain is traced end to end
//! ([`trace_chain`]), planned into a [`Toolpath`] with the approach,
//! plunge, feed moves and retract ([`plan_toolpath`]), and written out by a
//! post-processor.
//!
//! # Example
//!
//! ```
//! use partkit_cam::{emit_gcode, post::MacroPost, CamSettings, ChainElement};
//! use partkit_math::Point3;
//! use partkit_shape::Edge;
//!
//! let p = Point3::new;
//! let elements = vec![
//!     ChainElement::Edge(Edge::line(p(0., 0., 20.), p(10., 0., 20.))),
//!     ChainElement::Edge(Edge::line(p(10., 0., 20.), p(10., 2., 20.))),
//! ];
//!
//! let gcode = emit_gcode(&elements, &CamSettings::default(), &MacroPost).unwrap();
//! assert!(gcode.contains("G01 X6.000 Y3.000 F200\n"));
//! assert!(gcode.ends_with("M30 (Program End)\n%\n"));
//! ```

mod chain;
mod error;
mod operation;
pub mod post;
mod toolpath;

pub use chain::{trace_chain, ChainElement, TracedChain};
pub use error::CamError;
pub use operation::{emit_gcode, plan_toolpath};
pub use toolpath::{ArcDir, Axes, Toolpath, ToolpathSegment};

use partkit_math::Tolerance;
use serde::{Deserialize, Serialize};

/// Reduced feed near the far end of straight moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowCorners {
    /// Distance before a corner at which the slow feed starts (mm).
    pub slow_len: f64,
    /// Feed rate for the approach to a corner (mm/min).
    pub slow_rate: f64,
}

impl Default for SlowCorners {
    fn default() -> Self {
        Self {
            slow_len: 4.0,
            slow_rate: 100.0,
        }
    }
}

/// Where the plunge goes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DepthMode {
    /// Plunge to the Z of the chain's start vertex.
    #[default]
    FromGeometry,
    /// Plunge to a fixed Z.
    Fixed {
        /// Cutting depth (mm, machine coordinates).
        #[serde(default = "default_z_cut")]
        z_cut: f64,
    },
}

fn default_z_cut() -> f64 {
    -3.0
}

/// Feed behaviour for one kind of cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachiningProfile {
    /// Profile name.
    pub name: String,
    /// Feed rate for regular cutting moves (mm/min).
    pub feed_rate: f64,
    /// Slow corner approach, if enabled.
    #[serde(default)]
    pub slow_corners: Option<SlowCorners>,
    /// Plunge depth.
    #[serde(default)]
    pub depth: DepthMode,
}

impl Default for MachiningProfile {
    fn default() -> Self {
        Self::pocket()
    }
}

impl MachiningProfile {
    /// Build a profile, rejecting unusable rates and lengths.
    pub fn new(
        name: impl Into<String>,
        feed_rate: f64,
        slow_corners: Option<SlowCorners>,
        depth: DepthMode,
    ) -> Result<Self, CamError> {
        let profile = Self {
            name: name.into(),
            feed_rate,
            slow_corners,
            depth,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Pocket clearing: slow down before every corner.
    pub fn pocket() -> Self {
        Self {
            name: "pocket".into(),
            feed_rate: 200.0,
            slow_corners: Some(SlowCorners::default()),
            depth: DepthMode::FromGeometry,
        }
    }

    /// Contour cutting: constant feed.
    pub fn contour() -> Self {
        Self {
            name: "contour".into(),
            feed_rate: 200.0,
            slow_corners: None,
            depth: DepthMode::FromGeometry,
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "pocket" => Some(Self::pocket()),
            "contour" => Some(Self::contour()),
            _ => None,
        }
    }

    /// Check rates and lengths.
    pub fn validate(&self) -> Result<(), CamError> {
        positive("feed_rate", self.feed_rate)?;
        if let Some(slow) = &self.slow_corners {
            positive("slow_len", slow.slow_len)?;
            positive("slow_rate", slow.slow_rate)?;
        }
        if let DepthMode::Fixed { z_cut } = self.depth {
            finite("z_cut", z_cut)?;
        }
        Ok(())
    }
}

/// Settings for turning a chain into G-code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CamSettings {
    /// Feed profile.
    pub profile: MachiningProfile,
    /// Z height for rapid moves and the final retract (machine coordinates).
    pub z_rapid: f64,
    /// Top of the stock (machine coordinates); rapids stay above it.
    pub z_surface: f64,
    /// Feed rate for the plunge (mm/min).
    pub plunge_rate: f64,
    /// Subtracted from every geometry coordinate; this point is the origin.
    pub origin_offset: [f64; 3],
    /// Tolerance for deciding that two edges share an endpoint.
    pub join_tolerance: Tolerance,
}

impl Default for CamSettings {
    fn default() -> Self {
        Self {
            profile: MachiningProfile::pocket(),
            z_rapid: 1.0,
            z_surface: 0.0,
            plunge_rate: 100.0,
            origin_offset: [0.0, -3.0, 20.0],
            join_tolerance: Tolerance::NEAR,
        }
    }
}

impl CamSettings {
    /// Settings with the given profile and default everything else.
    pub fn with_profile(profile: MachiningProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// Settings for sketch geometry: no origin offset, constant feed, and a
    /// fixed cutting depth of -3.
    pub fn sketch() -> Self {
        Self::sketch_with(MachiningProfile::contour())
    }

    /// Sketch settings keeping the feeds of `profile`. Sketches carry no
    /// usable Z, so the depth is always the fixed default.
    pub fn sketch_with(profile: MachiningProfile) -> Self {
        Self {
            profile: MachiningProfile {
                depth: DepthMode::Fixed { z_cut: default_z_cut() },
                ..profile
            },
            origin_offset: [0.0; 3],
            ..Self::default()
        }
    }

    /// Parse settings from TOML and validate them. Missing keys take their
    /// default values.
    pub fn from_toml_str(text: &str) -> Result<Self, CamError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every rate, length and height is usable.
    pub fn validate(&self) -> Result<(), CamError> {
        self.profile.validate()?;
        positive("plunge_rate", self.plunge_rate)?;
        finite("z_rapid", self.z_rapid)?;
        finite("z_surface", self.z_surface)?;
        for (axis, value) in ["origin_offset.x", "origin_offset.y", "origin_offset.z"]
            .into_iter()
            .zip(self.origin_offset)
        {
            finite(axis, value)?;
        }
        if self.z_rapid <= self.z_surface {
            return Err(CamError::InvalidSettings {
                field: "z_rapid",
                value: self.z_rapid,
                reason: "must be above z_surface",
            });
        }
        positive("join_tolerance.linear", self.join_tolerance.linear)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), CamError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CamError::InvalidSettings {
            field,
            value,
            reason: "must be a positive number",
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), CamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CamError::InvalidSettings {
            field,
            value,
            reason: "must be finite",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cam_settings_default() {
        let settings = CamSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.profile.name, "pocket");
        assert_eq!(settings.origin_offset, [0.0, -3.0, 20.0]);
        assert_eq!(
            settings.profile.slow_corners,
            Some(SlowCorners {
                slow_len: 4.0,
                slow_rate: 100.0
            })
        );
    }

    #[test]
    fn test_presets() {
        assert!(MachiningProfile::preset("contour").unwrap().slow_corners.is_none());
        assert!(MachiningProfile::preset("pocket").unwrap().slow_corners.is_some());
        assert!(MachiningProfile::preset("drill").is_none());
    }

    #[test]
    fn test_sketch_keeps_profile_feeds() {
        let settings = CamSettings::sketch_with(MachiningProfile::pocket());
        assert_eq!(settings.profile.name, "pocket");
        assert!(settings.profile.slow_corners.is_some());
        assert_eq!(settings.profile.depth, DepthMode::Fixed { z_cut: -3.0 });
        assert_eq!(settings.origin_offset, [0.0; 3]);
        assert!(CamSettings::sketch().profile.slow_corners.is_none());
    }

    #[test]
    fn test_profile_rejects_bad_rates() {
        let err = MachiningProfile::new("bad", 0.0, None, DepthMode::FromGeometry).unwrap_err();
        assert!(matches!(err, CamError::InvalidSettings { field: "feed_rate", .. }));

        let slow = SlowCorners {
            slow_len: f64::NAN,
            slow_rate: 100.0,
        };
        let err = MachiningProfile::new("bad", 200.0, Some(slow), DepthMode::FromGeometry)
            .unwrap_err();
        assert!(matches!(err, CamError::InvalidSettings { field: "slow_len", .. }));
    }

    #[test]
    fn test_settings_from_toml() {
        let text = r#"
            z_rapid = 5.0
            plunge_rate = 50.0
            origin_offset = [0.0, 0.0, 0.0]

            [profile]
            name = "deep contour"
            feed_rate = 300.0
            depth = { mode = "fixed", z_cut = -1.5 }
        "#;
        let settings = CamSettings::from_toml_str(text).unwrap();
        assert_eq!(settings.z_rapid, 5.0);
        assert_eq!(settings.z_surface, 0.0);
        assert_eq!(settings.profile.feed_rate, 300.0);
        assert!(settings.profile.slow_corners.is_none());
        assert_eq!(settings.profile.depth, DepthMode::Fixed { z_cut: -1.5 });
        assert_eq!(settings.join_tolerance, Tolerance::NEAR);
    }

    #[test]
    fn test_settings_from_toml_validates() {
        let err = CamSettings::from_toml_str("plunge_rate = -1.0").unwrap_err();
        assert!(matches!(err, CamError::InvalidSettings { field: "plunge_rate", .. }));

        let err = CamSettings::from_toml_str("z_rapid = -1.0").unwrap_err();
        assert!(matches!(err, CamError::InvalidSettings { field: "z_rapid", .. }));

        assert!(matches!(
            CamSettings::from_toml_str("z_rapid = \"high\""),
            Err(CamError::Config(_))
        ));
    }

    #[test]
    fn test_cam_settings_serialization() {
        let settings = CamSettings::sketch();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: CamSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
