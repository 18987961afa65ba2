use crate::settings::{
    ChartOptionSettings, ChartType, CoreParameters, VisualSettings,
};

/// A chart selection with its inline option overrides, e.g.
/// `line(y_ticks: 5, legend: 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDirective {
    pub chart_type: ChartType,
    pub options: ChartOptionSettings,
}

/// A column reference inside `map(...)`, optionally wrapped: `date(col)`
/// marks a date-typed field, `group(col)` a numeric grouping field that is
/// not a true measure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRef {
    pub column: String,
    pub date: bool,
    pub grouping: bool,
}

impl FieldRef {
    pub fn plain(column: &str) -> Self {
        FieldRef {
            column: column.to_string(),
            ..Default::default()
        }
    }
}

/// Role assignments for the input columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleMap {
    pub category: Option<FieldRef>,
    pub measures: Vec<FieldRef>,
    pub series: Option<FieldRef>,
}

/// Title and axis label overrides from `labs(...)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Labels {
    pub title: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

/// One `|`-separated component of the directive string.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Chart(ChartDirective),
    Map(RoleMap),
    Labs(Labels),
}

/// A fully-parsed directive pipeline: exactly one chart command plus the
/// optional role map and labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectivePipeline {
    pub chart: ChartDirective,
    pub map: Option<RoleMap>,
    pub labels: Labels,
}

impl DirectivePipeline {
    /// Fold the parsed directives into the settings object the pipeline
    /// consumes. Supplying a title implies showing it.
    pub fn settings(&self) -> VisualSettings {
        VisualSettings {
            core_parameters: CoreParameters {
                chart_type: self.chart.chart_type,
                show_title: self.labels.title.is_some(),
                title_text: self.labels.title.clone(),
                x_label: self.labels.x.clone(),
                y_label: self.labels.y.clone(),
            },
            chart_options: self.chart.options.clone(),
        }
    }
}
