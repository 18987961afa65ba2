use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of chart types the transform can target. Selected by the host
/// settings and immutable for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    Bar,
    Pie,
    Line,
    #[serde(rename = "XY")]
    Xy,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartType::Bar => "Bar",
            ChartType::Pie => "Pie",
            ChartType::Line => "Line",
            ChartType::Xy => "XY",
        };
        write!(f, "{}", name)
    }
}

impl ChartType {
    /// Bar, Line and XY carry meaningful x/y axis labels; Pie does not.
    pub fn is_cartesian(&self) -> bool {
        !matches!(self, ChartType::Pie)
    }
}

/// Legend placement, encoded on the wire as the renderer's position code
/// (1 = up-left, 2 = up-right, 3 = down-left, 4 = down-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LegendPosition {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl From<LegendPosition> for u8 {
    fn from(position: LegendPosition) -> Self {
        match position {
            LegendPosition::UpLeft => 1,
            LegendPosition::UpRight => 2,
            LegendPosition::DownLeft => 3,
            LegendPosition::DownRight => 4,
        }
    }
}

impl TryFrom<u8> for LegendPosition {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(LegendPosition::UpLeft),
            2 => Ok(LegendPosition::UpRight),
            3 => Ok(LegendPosition::DownLeft),
            4 => Ok(LegendPosition::DownRight),
            other => Err(format!("invalid legend position code: {}", other)),
        }
    }
}

/// Core chart parameters: chart type selection plus title/axis text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreParameters {
    pub chart_type: ChartType,
    pub show_title: bool,
    pub title_text: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

/// User overrides for the per-chart-type options. Absent fields are unset and
/// fall back to the defaults at resolution time; an explicit zero is kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptionSettings {
    pub x_tick_count: Option<u32>,
    pub y_tick_count: Option<u32>,
    pub legend_position: Option<LegendPosition>,
    pub show_line: Option<bool>,
    pub time_format: Option<String>,
    pub dot_size: Option<f64>,
    /// Pie inner radius, stored as a 0-100 integer.
    pub inner_padding: Option<u32>,
}

/// The resolved settings object supplied by the host for one transform.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualSettings {
    pub core_parameters: CoreParameters,
    pub chart_options: ChartOptionSettings,
}
