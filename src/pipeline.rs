use tracing::debug;

use crate::assemble::{
    assemble_category_measure, assemble_line, assemble_xy, AssembleContext,
};
use crate::data::DataDescription;
use crate::messages::MessageCatalog;
use crate::options::{resolve_options, OptionDefaults};
use crate::roles::ResolvedRoles;
use crate::settings::{ChartType, VisualSettings};
use crate::spec::{ChartData, ChartSpec, ViewModel};
use crate::validate::{
    validate_bar, validate_line, validate_pie, validate_xy, ShapeContext, ShapeError, XyMapping,
};

/// One entry of the chart-type dispatch table: the shape validator and the
/// dataset assembler for a single variant, selected together so each
/// variant's rules stay colocated and the match stays exhaustive.
struct ChartHandler {
    validate: fn(&ShapeContext) -> Result<Option<XyMapping>, ShapeError>,
    assemble: fn(&AssembleContext) -> Result<ChartData, ShapeError>,
}

fn handler(chart_type: ChartType) -> ChartHandler {
    match chart_type {
        ChartType::Bar => ChartHandler {
            validate: validate_bar,
            assemble: assemble_category_measure,
        },
        ChartType::Pie => ChartHandler {
            validate: validate_pie,
            assemble: assemble_category_measure,
        },
        ChartType::Line => ChartHandler {
            validate: validate_line,
            assemble: assemble_line,
        },
        ChartType::Xy => ChartHandler {
            validate: validate_xy,
            assemble: assemble_xy,
        },
    }
}

/// Run the whole transform for one update cycle: resolve roles, validate the
/// data shape for the requested chart type, resolve options, assemble the
/// datasets and merge everything into the finished spec. Every failure path
/// is a normal return value; the view model is the only thing that leaves.
pub fn build_view_model(
    description: &DataDescription,
    settings: &VisualSettings,
    defaults: &OptionDefaults,
    catalog: &dyn MessageCatalog,
) -> ViewModel {
    let chart_type = settings.core_parameters.chart_type;
    debug!(%chart_type, "building chart spec");

    // Test 1: the data view has the bare-minimum sections.
    if !description.has_minimum_sections() {
        debug!("data view is missing required sections");
        return rejection(catalog, ShapeError::MissingSource);
    }

    // Test 2: the role mapping matches the requirements for the chart type.
    let roles = ResolvedRoles::resolve(&description.columns);
    let shape = ShapeContext::new(&description.columns, &roles);
    let selected = handler(chart_type);
    let mapping = match (selected.validate)(&shape) {
        Ok(mapping) => mapping,
        Err(error) => {
            debug!(%error, "shape validation failed");
            return rejection(catalog, error);
        }
    };
    debug!(?mapping, "shape validation passed");

    // A structurally-valid XY variant with no dataset mapping is surfaced
    // as an explicit rejection rather than an empty chart.
    if mapping == Some(XyMapping::CatMeasureCat) {
        return rejection(catalog, ShapeError::UnmappedVariant);
    }

    let category_is_date = shape.category().map_or(false, |col| col.date_time);
    let options = resolve_options(
        chart_type,
        &settings.chart_options,
        defaults,
        category_is_date,
    );

    let assemble_ctx = AssembleContext {
        description,
        roles: &roles,
        mapping,
    };
    let data = match (selected.assemble)(&assemble_ctx) {
        Ok(data) => data,
        Err(error) => {
            debug!(%error, "dataset assembly failed");
            return rejection(catalog, error);
        }
    };
    debug!(datasets = data.datasets.len(), "datasets assembled");

    let core = &settings.core_parameters;
    let has_title = core.show_title
        && core
            .title_text
            .as_deref()
            .map_or(false, |text| !text.is_empty());

    let (x_label, y_label) = if chart_type.is_cartesian() {
        let x = core
            .x_label
            .clone()
            .filter(|label| !label.is_empty())
            .or_else(|| shape.category().map(|col| col.display_name.clone()))
            .unwrap_or_default();
        let y = core
            .y_label
            .clone()
            .filter(|label| !label.is_empty())
            .or_else(|| {
                roles
                    .measures
                    .first()
                    .and_then(|&i| description.columns.get(i))
                    .map(|col| col.display_name.clone())
            })
            .unwrap_or_default();
        (Some(x), Some(y))
    } else {
        (None, None)
    };

    ViewModel::success(ChartSpec {
        title: if has_title { core.title_text.clone() } else { None },
        x_label,
        y_label,
        options: Some(options),
        data,
    })
}

fn rejection(catalog: &dyn MessageCatalog, error: ShapeError) -> ViewModel {
    ViewModel::rejected(catalog.message(error.message_key()))
}
