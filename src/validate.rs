use thiserror::Error;

use crate::data::ColumnMeta;
use crate::messages::MessageKey;
use crate::roles::ResolvedRoles;
use crate::settings::ChartType;

/// How an XY chart's axes and groupings were inferred from the roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XyMapping {
    /// Continuous category plus one or more true measures, no series.
    CatMeasures,
    /// Continuous category, exactly one true measure, one series.
    CatMeasureSeries,
    /// Continuous category plus a single numeric non-measure grouping field.
    /// Structurally valid, but dataset assembly for it is unmapped.
    CatMeasureCat,
}

/// Structural failure of one transform invocation. Never crosses the
/// pipeline boundary as an error value; the caller folds it into the view
/// model via the message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("the data view is missing a categorical or matrix section")]
    MissingSource,
    #[error("fields are not valid for a {0} chart")]
    ShapeMismatch(ChartType),
    #[error("the XY field combination has no dataset mapping")]
    UnmappedVariant,
}

impl ShapeError {
    /// Message key handed to the localization collaborator.
    pub fn message_key(&self) -> MessageKey {
        match self {
            ShapeError::MissingSource => MessageKey::MissingSource,
            ShapeError::ShapeMismatch(ChartType::Bar) => MessageKey::BarShapeMismatch,
            ShapeError::ShapeMismatch(ChartType::Pie) => MessageKey::PieShapeMismatch,
            ShapeError::ShapeMismatch(ChartType::Line) => MessageKey::LineShapeMismatch,
            ShapeError::ShapeMismatch(ChartType::Xy) => MessageKey::XyShapeMismatch,
            ShapeError::UnmappedVariant => MessageKey::XyUnmappedVariant,
        }
    }
}

/// Read-only view over the resolved roles used by the shape predicates.
#[derive(Debug, Clone, Copy)]
pub struct ShapeContext<'a> {
    pub columns: &'a [ColumnMeta],
    pub roles: &'a ResolvedRoles,
}

impl<'a> ShapeContext<'a> {
    pub fn new(columns: &'a [ColumnMeta], roles: &'a ResolvedRoles) -> Self {
        ShapeContext { columns, roles }
    }

    pub fn category(&self) -> Option<&'a ColumnMeta> {
        self.roles.category.and_then(|i| self.columns.get(i))
    }

    pub fn series_present(&self) -> bool {
        self.roles.series.is_some()
    }

    pub fn measure_count(&self) -> usize {
        self.roles.measure_count()
    }

    pub fn measure_columns(&self) -> impl Iterator<Item = &'a ColumnMeta> + '_ {
        self.roles
            .measures
            .iter()
            .filter_map(|&i| self.columns.get(i))
    }
}

/// Bar: one category, one measure, no series.
pub fn validate_bar(ctx: &ShapeContext) -> Result<Option<XyMapping>, ShapeError> {
    if ctx.category().is_some() && ctx.measure_count() == 1 && !ctx.series_present() {
        Ok(None)
    } else {
        Err(ShapeError::ShapeMismatch(ChartType::Bar))
    }
}

/// Pie: same shape contract as Bar.
pub fn validate_pie(ctx: &ShapeContext) -> Result<Option<XyMapping>, ShapeError> {
    if ctx.category().is_some() && ctx.measure_count() == 1 && !ctx.series_present() {
        Ok(None)
    } else {
        Err(ShapeError::ShapeMismatch(ChartType::Pie))
    }
}

/// Line accepts three shapes: category + single measure, category + series +
/// single measure, or category + multiple measures without a series.
pub fn validate_line(ctx: &ShapeContext) -> Result<Option<XyMapping>, ShapeError> {
    let ok = ctx.category().is_some()
        && if ctx.series_present() {
            ctx.measure_count() == 1
        } else {
            ctx.measure_count() >= 1
        };
    if ok {
        Ok(None)
    } else {
        Err(ShapeError::ShapeMismatch(ChartType::Line))
    }
}

/// XY needs a numeric or date category; the sub-mapping variants are tried in
/// priority order and the first match wins.
pub fn validate_xy(ctx: &ShapeContext) -> Result<Option<XyMapping>, ShapeError> {
    let category = ctx
        .category()
        .ok_or(ShapeError::ShapeMismatch(ChartType::Xy))?;
    if !category.is_continuous() {
        return Err(ShapeError::ShapeMismatch(ChartType::Xy));
    }

    let series = ctx.series_present();
    let count = ctx.measure_count();
    let all_true_measures = count >= 1 && ctx.measure_columns().all(|col| col.is_measure);

    if !series && all_true_measures {
        return Ok(Some(XyMapping::CatMeasures));
    }
    if series && count == 1 && ctx.measure_columns().all(|col| col.is_measure) {
        return Ok(Some(XyMapping::CatMeasureSeries));
    }
    if !series && count == 1 {
        let field = ctx
            .measure_columns()
            .next()
            .ok_or(ShapeError::ShapeMismatch(ChartType::Xy))?;
        if !field.is_measure && field.numeric {
            return Ok(Some(XyMapping::CatMeasureCat));
        }
    }

    Err(ShapeError::ShapeMismatch(ChartType::Xy))
}
