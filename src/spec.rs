use serde::Serialize;

use crate::settings::LegendPosition;

/// Fully-resolved options record for the active chart type. Which fields are
/// populated is governed by the per-type allow-list in `options`; absent
/// fields never reach the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_tick_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_tick_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_position: Option<LegendPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_size: Option<f64>,
    /// 0.0-1.0 fraction, converted from the stored 0-100 inner padding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
}

/// One `{x, y}` pair of an XY dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

/// Dataset payload: either scalar values index-aligned to the label list
/// (nulls preserved for Bar/Pie, filtered out for Line) or XY pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DatasetValues {
    Scalars(Vec<Option<f64>>),
    Points(Vec<XyPoint>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: DatasetValues,
}

/// The `data` payload of the finished spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub datasets: Vec<Dataset>,
}

/// The transform's output artifact, handed to the external renderer as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<SpecOptions>,
    pub data: ChartData,
}

impl ChartSpec {
    /// Bare-minimum spec returned while validation has not passed.
    pub fn placeholder() -> Self {
        ChartSpec::default()
    }
}

/// Outcome of the validation tests for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestResult {
    pub result: bool,
    pub messages: Vec<String>,
}

/// The aggregate result of one transform invocation: the finished (or
/// placeholder) spec plus the pass/fail flag and accumulated messages. This
/// is the only object the renderer or the error display consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub spec: ChartSpec,
    pub test_result: TestResult,
}

impl ViewModel {
    pub fn success(spec: ChartSpec) -> Self {
        ViewModel {
            spec,
            test_result: TestResult {
                result: true,
                messages: Vec::new(),
            },
        }
    }

    pub fn rejected(message: String) -> Self {
        ViewModel {
            spec: ChartSpec::placeholder(),
            test_result: TestResult {
                result: false,
                messages: vec![message],
            },
        }
    }
}
