use serde::Serialize;

use crate::settings::{ChartOptionSettings, ChartType, LegendPosition};
use crate::spec::SpecOptions;

/// Explicit default-configuration value passed into option resolution.
/// Mirrors the host's stock settings; no global lookup is consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDefaults {
    pub x_tick_count: u32,
    pub y_tick_count: u32,
    pub legend_position: LegendPosition,
    pub show_line: bool,
    pub time_format: Option<String>,
    pub dot_size: f64,
    pub inner_padding: u32,
}

impl Default for OptionDefaults {
    fn default() -> Self {
        OptionDefaults {
            x_tick_count: 3,
            y_tick_count: 3,
            legend_position: LegendPosition::UpLeft,
            show_line: false,
            time_format: None,
            dot_size: 1.0,
            inner_padding: 50,
        }
    }
}

/// Merge user overrides with the defaults for the active chart type. Each
/// chart type exposes an explicit allow-list of options; everything else
/// stays unset so it never reaches the renderer. An explicit zero is a user
/// choice and is preserved; only unset fields fall back.
pub fn resolve_options(
    chart_type: ChartType,
    user: &ChartOptionSettings,
    defaults: &OptionDefaults,
    category_is_date: bool,
) -> SpecOptions {
    match chart_type {
        ChartType::Bar => SpecOptions {
            y_tick_count: Some(user.y_tick_count.unwrap_or(defaults.y_tick_count)),
            ..Default::default()
        },
        ChartType::Pie => SpecOptions {
            legend_position: Some(user.legend_position.unwrap_or(defaults.legend_position)),
            inner_radius: Some(inner_radius(user.inner_padding, defaults.inner_padding)),
            ..Default::default()
        },
        ChartType::Line => SpecOptions {
            y_tick_count: Some(user.y_tick_count.unwrap_or(defaults.y_tick_count)),
            legend_position: Some(user.legend_position.unwrap_or(defaults.legend_position)),
            ..Default::default()
        },
        ChartType::Xy => SpecOptions {
            x_tick_count: Some(user.x_tick_count.unwrap_or(defaults.x_tick_count)),
            y_tick_count: Some(user.y_tick_count.unwrap_or(defaults.y_tick_count)),
            legend_position: Some(user.legend_position.unwrap_or(defaults.legend_position)),
            show_line: Some(user.show_line.unwrap_or(defaults.show_line)),
            dot_size: Some(user.dot_size.unwrap_or(defaults.dot_size)),
            // Time formats only make sense against a date-typed category.
            time_format: if category_is_date {
                user.time_format
                    .clone()
                    .or_else(|| defaults.time_format.clone())
            } else {
                None
            },
            ..Default::default()
        },
    }
}

/// The stored 0-100 inner padding becomes a 0.0-1.0 radius fraction. The
/// zero-vs-unset rule applies before the conversion.
fn inner_radius(user: Option<u32>, default: u32) -> f64 {
    f64::from(user.unwrap_or(default)) / 100.0
}

/// Inclusive numeric bounds advertised to the editing surface. Out-of-range
/// values are the host's input-validation concern; resolution never rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRanges {
    pub x_tick_count: NumberRange,
    pub y_tick_count: NumberRange,
    pub inner_padding: NumberRange,
}

/// Valid ranges for the integer option fields.
pub fn valid_ranges() -> OptionRanges {
    OptionRanges {
        x_tick_count: NumberRange { min: 1, max: 10 },
        y_tick_count: NumberRange { min: 1, max: 10 },
        inner_padding: NumberRange { min: 0, max: 100 },
    }
}
