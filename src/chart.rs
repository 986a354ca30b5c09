//! Skills radar chart, rendered by ECharts.

use serde_json::{Value, json};
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::config::ChartConfig;
use crate::dom;
use crate::error::{PortfolioError, Result};

/// `#RRGGBB` to `rgba(r, g, b, a)`.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Option<String> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(format!("rgba({}, {}, {}, {alpha})", channel(0)?, channel(2)?, channel(4)?))
}

/// Series values, one per axis. Surplus values have no axis to sit on and
/// are dropped.
pub fn radar_values(config: &ChartConfig) -> Vec<f64> {
    config.values.iter().copied().take(config.axes.len()).collect()
}

/// The ECharts option object for the radar.
pub fn radar_option(config: &ChartConfig) -> Value {
    let grid = |a| hex_to_rgba(&config.grid, a).unwrap_or_else(|| config.grid.clone());
    let area = hex_to_rgba(&config.accent, 0.2).unwrap_or_else(|| config.accent.clone());
    let indicator: Vec<Value> = config
        .axes
        .iter()
        .map(|a| json!({ "name": a.name, "max": a.max }))
        .collect();
    json!({
        "backgroundColor": "transparent",
        "radar": {
            "indicator": indicator,
            "shape": "polygon",
            "splitNumber": 4,
            "axisName": {
                "color": config.accent,
                "fontSize": 12,
                "fontFamily": config.font_family,
            },
            "splitLine": { "lineStyle": { "color": grid(0.3) } },
            "splitArea": { "show": false },
            "axisLine": { "lineStyle": { "color": grid(0.5) } },
        },
        "series": [{
            "name": config.series_name,
            "type": "radar",
            "data": [{
                "value": radar_values(config),
                "name": config.data_name,
                "areaStyle": { "color": area },
                "lineStyle": { "color": config.accent, "width": 2 },
                "itemStyle": {
                    "color": config.accent,
                    "borderColor": config.grid,
                    "borderWidth": 2,
                },
            }],
            "animationDuration": config.animation_ms,
            "animationEasing": config.easing,
        }],
    })
}

pub struct RadarChart {
    _chart: JsValue,
}

impl RadarChart {
    /// Initialise the chart on `#<element_id>` and keep it sized to the window.
    pub fn install(doc: &Document, config: &ChartConfig) -> Result<Self> {
        let el = doc
            .get_element_by_id(&config.element_id)
            .ok_or_else(|| PortfolioError::MissingElement(format!("#{}", config.element_id)))?;
        let echarts = dom::global("echarts").ok_or(PortfolioError::MissingLibrary("echarts"))?;
        let el: JsValue = el.into();
        let chart = dom::call_method(&echarts, "init", &[&el])?;
        let option = dom::to_js(&radar_option(config))?;
        dom::call_method(&chart, "setOption", &[&option])?;

        let resized = chart.clone();
        let win = dom::window()?;
        dom::listen(&win, "resize", move |_| {
            let _ = dom::call_method(&resized, "resize", &[]);
        })?;
        Ok(Self { _chart: chart })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_convert_to_rgba() {
        assert_eq!(hex_to_rgba("#00F0FF", 0.3).as_deref(), Some("rgba(0, 240, 255, 0.3)"));
        assert_eq!(hex_to_rgba("#F8E602", 0.2).as_deref(), Some("rgba(248, 230, 2, 0.2)"));
        assert_eq!(hex_to_rgba("F8E602", 0.2), None);
        assert_eq!(hex_to_rgba("#FFF", 1.0), None);
        assert_eq!(hex_to_rgba("#GGGGGG", 1.0), None);
    }

    #[test]
    fn values_are_trimmed_to_axes() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.values.len(), 8);
        assert_eq!(radar_values(&cfg), vec![95.0, 88.0, 92.0, 85.0, 78.0, 82.0, 75.0]);
    }

    #[test]
    fn option_carries_axes_and_styles() {
        let option = radar_option(&ChartConfig::default());
        let indicator = option["radar"]["indicator"].as_array().unwrap();
        assert_eq!(indicator.len(), 7);
        assert_eq!(indicator[4]["name"], "Luau");
        assert_eq!(indicator[4]["max"], 260.0);
        assert_eq!(option["radar"]["splitLine"]["lineStyle"]["color"], "rgba(0, 240, 255, 0.3)");
        assert_eq!(option["radar"]["axisLine"]["lineStyle"]["color"], "rgba(0, 240, 255, 0.5)");
        let data = &option["series"][0]["data"][0];
        assert_eq!(data["areaStyle"]["color"], "rgba(248, 230, 2, 0.2)");
        assert_eq!(data["itemStyle"]["borderColor"], "#00F0FF");
        assert_eq!(option["series"][0]["animationDuration"], 2000);
        assert_eq!(option["series"][0]["animationEasing"], "cubicOut");
    }
}
