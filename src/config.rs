//! Page configuration. Every field has a default reproducing the reference
//! page; a JSON overlay passed to `start_portfolio_with_config` may override
//! any subset of it.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub typewriter: TypewriterConfig,
    pub particles: ParticleConfig,
    pub chart: ChartConfig,
    pub animator: AnimatorConfig,
    pub modal: ModalConfig,
    pub cards: CardConfig,
}

impl PortfolioConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Options handed to the typing-animation library verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypewriterConfig {
    pub selector: String,
    pub strings: Vec<String>,
    pub type_speed: u32,
    pub back_speed: u32,
    pub back_delay: u32,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub show_cursor: bool,
    pub cursor_char: String,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            selector: "#typed-text".into(),
            strings: [
                "Building Specialist",
                "Lazy Dev",
                "Humanoid Root Part",
                "this is not a game",
                "def not sleeping",
                "less was here",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            type_speed: 50,
            back_speed: 30,
            back_delay: 2000,
            looped: true,
            show_cursor: true,
            cursor_char: "_".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleConfig {
    pub container_id: String,
    pub count: usize,
    pub palette: Vec<String>,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Radians per frame of the shared opacity pulse.
    pub pulse_rate: f64,
    pub pulse_amplitude: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            container_id: "particles".into(),
            count: 50,
            palette: vec!["#F8E602".into(), "#00F0FF".into(), "#772289".into()],
            max_speed: 0.5,
            min_size: 1.0,
            max_size: 3.0,
            min_opacity: 0.3,
            max_opacity: 0.8,
            pulse_rate: 0.02,
            pulse_amplitude: 0.01,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    pub name: String,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub element_id: String,
    pub axes: Vec<RadarAxis>,
    pub values: Vec<f64>,
    pub series_name: String,
    pub data_name: String,
    pub accent: String,
    pub grid: String,
    pub font_family: String,
    pub animation_ms: u32,
    pub easing: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let axes = [
            ("Unity", 105.0),
            ("Blender", 110.0),
            ("Studio", 100.0),
            ("C#", 200.0),
            ("Luau", 260.0),
            ("Animation", 140.0),
            ("Godot", 190.0),
        ]
        .iter()
        .map(|&(name, max)| RadarAxis { name: name.into(), max })
        .collect();
        Self {
            element_id: "skills-chart".into(),
            axes,
            values: vec![95.0, 88.0, 92.0, 85.0, 78.0, 82.0, 75.0, 80.0],
            series_name: "Skills".into(),
            data_name: "Technical Skills".into(),
            accent: "#F8E602".into(),
            grid: "#00F0FF".into(),
            font_family: "Orbitron".into(),
            animation_ms: 2000,
            easing: "cubicOut".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimatorConfig {
    pub fade_selector: String,
    pub fade_threshold: f64,
    pub fade_root_margin: String,
    pub fade_class: String,
    pub skill_selector: String,
    pub skill_threshold: f64,
    pub skill_delay_ms: u32,
    pub skill_duration_ms: u32,
    pub lazy_image_selector: String,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            fade_selector: ".project-card, .skill-item".into(),
            fade_threshold: 0.1,
            fade_root_margin: "0px 0px -50px 0px".into(),
            fade_class: "animate-fade-in".into(),
            skill_selector: ".skill-bar".into(),
            skill_threshold: 0.5,
            skill_delay_ms: 200,
            skill_duration_ms: 1500,
            lazy_image_selector: "img[data-src]".into(),
        }
    }
}

/// What to do with feature entries that are empty or whitespace only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankFeatures {
    #[default]
    Preserve,
    Filter,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalConfig {
    pub open_delay_ms: u32,
    pub close_duration_ms: u32,
    /// Close any live modal before opening another one.
    pub exclusive: bool,
    pub blank_features: BlankFeatures,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            open_delay_ms: 10,
            close_duration_ms: 300,
            exclusive: true,
            blank_features: BlankFeatures::Preserve,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardConfig {
    pub selector: String,
    pub glitch_ms: u32,
    /// Also run the character scramble on hovered titles. Off on the
    /// reference page.
    pub scramble_titles: bool,
    pub scramble_iterations: usize,
    pub scramble_interval_ms: u32,
    pub hover_shadow: String,
    pub hover_transform: String,
    pub rest_shadow: String,
    pub rest_transform: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            selector: ".project-card".into(),
            glitch_ms: 300,
            scramble_titles: false,
            scramble_iterations: 10,
            scramble_interval_ms: 50,
            hover_shadow: "0 0 30px rgba(248, 230, 2, 0.4)".into(),
            hover_transform: "translateY(-10px) scale(1.02)".into(),
            rest_shadow: "0 0 20px rgba(248, 230, 2, 0.2)".into(),
            rest_transform: "translateY(0) scale(1)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overlay_yields_defaults() {
        let cfg = PortfolioConfig::from_json("{}").unwrap();
        assert_eq!(cfg, PortfolioConfig::default());
        assert_eq!(cfg.particles.count, 50);
        assert_eq!(cfg.modal.close_duration_ms, 300);
        assert!(!cfg.cards.scramble_titles);
    }

    #[test]
    fn partial_overlay_keeps_unrelated_defaults() {
        let cfg = PortfolioConfig::from_json(
            r#"{ "modal": { "exclusive": false, "blankFeatures": "filter" },
                 "particles": { "count": 12 } }"#,
        )
        .unwrap();
        assert!(!cfg.modal.exclusive);
        assert_eq!(cfg.modal.blank_features, BlankFeatures::Filter);
        assert_eq!(cfg.modal.close_duration_ms, 300);
        assert_eq!(cfg.particles.count, 12);
        assert_eq!(cfg.particles.palette.len(), 3);
        assert_eq!(cfg.typewriter, TypewriterConfig::default());
    }

    #[test]
    fn malformed_overlay_is_rejected() {
        assert!(PortfolioConfig::from_json(r#"{ "particles": { "count": "many" } }"#).is_err());
    }
}
