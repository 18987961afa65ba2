use crate::data::{CellValue, DataDescription, TabularSource};
use crate::roles::ResolvedRoles;
use crate::spec::{ChartData, Dataset, DatasetValues, XyPoint};
use crate::validate::{ShapeError, XyMapping};

/// Inputs for one dataset-assembly pass: the validated roles plus the XY
/// mapping variant when the chart type is XY.
#[derive(Debug, Clone, Copy)]
pub struct AssembleContext<'a> {
    pub description: &'a DataDescription,
    pub roles: &'a ResolvedRoles,
    pub mapping: Option<XyMapping>,
}

/// Source data normalized to one category vector plus one value column per
/// series instance (matrix with a column tree) or per measure (everything
/// else). All downstream assembly walks this shape.
#[derive(Debug, Clone)]
struct SeriesTable {
    categories: Vec<CellValue>,
    columns: Vec<TableColumn>,
}

#[derive(Debug, Clone)]
struct TableColumn {
    label: String,
    values: Vec<CellValue>,
}

/// Flatten either source shape into a `SeriesTable`.
fn series_table(ctx: &AssembleContext) -> Result<SeriesTable, ShapeError> {
    match &ctx.description.source {
        TabularSource::Categorical(source) => {
            let categories = source.category.values.clone();
            let mut columns = Vec::with_capacity(ctx.roles.measures.len());
            for &measure_index in &ctx.roles.measures {
                let value_column = source
                    .values
                    .iter()
                    .find(|v| v.column == measure_index)
                    .ok_or(ShapeError::MissingSource)?;
                let meta = ctx
                    .description
                    .columns
                    .get(measure_index)
                    .ok_or(ShapeError::MissingSource)?;
                columns.push(TableColumn {
                    label: meta.display_name.clone(),
                    values: value_column.values.clone(),
                });
            }
            Ok(SeriesTable { categories, columns })
        }
        TabularSource::Matrix(source) => {
            let rows = source.rows.leaves();
            let categories: Vec<CellValue> = rows
                .iter()
                .map(|row| row.value.clone().unwrap_or(CellValue::Null))
                .collect();

            let labels: Vec<String> = match &source.columns {
                // Column tree present: one column per series leaf, labelled
                // by the series value.
                Some(column_tree) => column_tree
                    .leaves()
                    .iter()
                    .map(|leaf| {
                        leaf.value
                            .as_ref()
                            .map(CellValue::to_label)
                            .unwrap_or_default()
                    })
                    .collect(),
                // No column tree: one column per measure, in measure order.
                None => ctx
                    .roles
                    .measures
                    .iter()
                    .filter_map(|&i| ctx.description.columns.get(i))
                    .map(|meta| meta.display_name.clone())
                    .collect(),
            };

            // Row `i`'s value vector is aligned by index to the column list;
            // a short vector reads as null rather than misaligning.
            let columns = labels
                .into_iter()
                .enumerate()
                .map(|(j, label)| TableColumn {
                    label,
                    values: rows
                        .iter()
                        .map(|row| row.values.get(j).cloned().unwrap_or(CellValue::Null))
                        .collect(),
                })
                .collect();

            Ok(SeriesTable { categories, columns })
        }
    }
}

/// Bar and Pie: labels and the single measure's values stay strictly
/// index-aligned, so nulls and non-numbers are preserved as null.
pub fn assemble_category_measure(ctx: &AssembleContext) -> Result<ChartData, ShapeError> {
    let table = series_table(ctx)?;
    let first = table.columns.first().ok_or(ShapeError::MissingSource)?;
    Ok(ChartData {
        labels: Some(table.categories.iter().map(CellValue::to_label).collect()),
        datasets: vec![Dataset {
            label: None,
            data: DatasetValues::Scalars(first.values.iter().map(CellValue::as_number).collect()),
        }],
    })
}

/// Line: one dataset per series value or per measure. Null filtering happens
/// per dataset, so dataset lengths may diverge from the label count.
pub fn assemble_line(ctx: &AssembleContext) -> Result<ChartData, ShapeError> {
    let table = series_table(ctx)?;
    let datasets = table
        .columns
        .iter()
        .map(|column| Dataset {
            label: Some(column.label.clone()),
            data: DatasetValues::Scalars(
                column
                    .values
                    .iter()
                    .filter_map(CellValue::as_number)
                    .map(Some)
                    .collect(),
            ),
        })
        .collect();
    Ok(ChartData {
        labels: Some(table.categories.iter().map(CellValue::to_label).collect()),
        datasets,
    })
}

/// XY: one dataset of `{x, y}` pairs per series value (`CatMeasureSeries`)
/// or per measure (`CatMeasures`). Pairs that do not yield a numeric point
/// are dropped. `CatMeasureCat` has no mapping and is refused upstream.
pub fn assemble_xy(ctx: &AssembleContext) -> Result<ChartData, ShapeError> {
    match ctx.mapping {
        Some(XyMapping::CatMeasures) | Some(XyMapping::CatMeasureSeries) => {}
        _ => return Err(ShapeError::UnmappedVariant),
    }

    let table = series_table(ctx)?;
    let datasets = table
        .columns
        .iter()
        .map(|column| Dataset {
            label: Some(column.label.clone()),
            data: DatasetValues::Points(
                table
                    .categories
                    .iter()
                    .zip(&column.values)
                    .filter_map(|(category, value)| {
                        Some(XyPoint {
                            x: category.as_number()?,
                            y: value.as_number()?,
                        })
                    })
                    .collect(),
            ),
        })
        .collect();
    Ok(ChartData {
        labels: None,
        datasets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        CategoricalSource, ColumnMeta, MatrixNode, MatrixSource, Role, ValueColumn,
    };

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn num(n: f64) -> CellValue {
        CellValue::Number(n)
    }

    fn category_column(name: &str) -> ColumnMeta {
        ColumnMeta {
            display_name: name.to_string(),
            roles: vec![Role::Category],
            numeric: false,
            date_time: false,
            is_measure: false,
        }
    }

    fn measure_column(name: &str) -> ColumnMeta {
        ColumnMeta {
            display_name: name.to_string(),
            roles: vec![Role::Measure],
            numeric: true,
            date_time: false,
            is_measure: true,
        }
    }

    fn series_column(name: &str) -> ColumnMeta {
        ColumnMeta {
            display_name: name.to_string(),
            roles: vec![Role::Series],
            numeric: false,
            date_time: false,
            is_measure: false,
        }
    }

    fn categorical(columns: Vec<ColumnMeta>, source: CategoricalSource) -> DataDescription {
        DataDescription {
            columns,
            source: TabularSource::Categorical(source),
        }
    }

    fn scalars(dataset: &Dataset) -> &Vec<Option<f64>> {
        match &dataset.data {
            DatasetValues::Scalars(values) => values,
            DatasetValues::Points(_) => panic!("expected scalar dataset"),
        }
    }

    fn points(dataset: &Dataset) -> &Vec<XyPoint> {
        match &dataset.data {
            DatasetValues::Points(values) => values,
            DatasetValues::Scalars(_) => panic!("expected point dataset"),
        }
    }

    #[test]
    fn test_bar_preserves_nulls_and_alignment() {
        let description = categorical(
            vec![category_column("Region"), measure_column("Sales")],
            CategoricalSource {
                category: ValueColumn {
                    column: 0,
                    values: vec![text("A"), text("B"), text("C")],
                },
                values: vec![ValueColumn {
                    column: 1,
                    values: vec![num(10.0), num(20.0), CellValue::Null],
                }],
            },
        );
        let roles = ResolvedRoles::resolve(&description.columns);
        let ctx = AssembleContext {
            description: &description,
            roles: &roles,
            mapping: None,
        };
        let data = assemble_category_measure(&ctx).unwrap();
        let labels = data.labels.unwrap();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert_eq!(data.datasets.len(), 1);
        let values = scalars(&data.datasets[0]);
        assert_eq!(values, &vec![Some(10.0), Some(20.0), None]);
        assert_eq!(labels.len(), values.len());
    }

    #[test]
    fn test_line_multi_measure_datasets() {
        let description = categorical(
            vec![
                category_column("Month"),
                measure_column("Low"),
                measure_column("High"),
                measure_column("Mean"),
            ],
            CategoricalSource {
                category: ValueColumn {
                    column: 0,
                    values: vec![text("Jan"), text("Feb")],
                },
                values: vec![
                    ValueColumn {
                        column: 1,
                        values: vec![num(1.0), num(2.0)],
                    },
                    ValueColumn {
                        column: 2,
                        values: vec![num(11.0), num(12.0)],
                    },
                    ValueColumn {
                        column: 3,
                        values: vec![num(6.0), num(7.0)],
                    },
                ],
            },
        );
        let roles = ResolvedRoles::resolve(&description.columns);
        let ctx = AssembleContext {
            description: &description,
            roles: &roles,
            mapping: None,
        };
        let data = assemble_line(&ctx).unwrap();
        assert_eq!(data.datasets.len(), 3);
        assert_eq!(data.datasets[0].label.as_deref(), Some("Low"));
        assert_eq!(data.datasets[1].label.as_deref(), Some("High"));
        assert_eq!(data.datasets[2].label.as_deref(), Some("Mean"));
    }

    fn west_east_matrix() -> DataDescription {
        DataDescription {
            columns: vec![
                category_column("Month"),
                measure_column("Sales"),
                series_column("Region"),
            ],
            source: TabularSource::Matrix(MatrixSource {
                rows: MatrixNode::root(vec![
                    MatrixNode::leaf(text("Jan"), vec![num(5.0), num(8.0)]),
                    MatrixNode::leaf(text("Feb"), vec![CellValue::Null, num(9.0)]),
                    MatrixNode::leaf(text("Mar"), vec![num(7.0), num(10.0)]),
                ]),
                columns: Some(MatrixNode::root(vec![
                    MatrixNode::leaf(text("West"), Vec::new()),
                    MatrixNode::leaf(text("East"), Vec::new()),
                ])),
            }),
        }
    }

    #[test]
    fn test_line_series_null_filtering_is_per_dataset() {
        let description = west_east_matrix();
        let roles = ResolvedRoles::resolve(&description.columns);
        let ctx = AssembleContext {
            description: &description,
            roles: &roles,
            mapping: None,
        };
        let data = assemble_line(&ctx).unwrap();
        // Labels keep every category even though West drops a point.
        assert_eq!(data.labels.as_ref().unwrap().len(), 3);
        assert_eq!(data.datasets.len(), 2);
        let west = &data.datasets[0];
        let east = &data.datasets[1];
        assert_eq!(west.label.as_deref(), Some("West"));
        assert_eq!(scalars(west), &vec![Some(5.0), Some(7.0)]);
        assert_eq!(east.label.as_deref(), Some("East"));
        assert_eq!(scalars(east), &vec![Some(8.0), Some(9.0), Some(10.0)]);
    }

    #[test]
    fn test_null_filtering_is_idempotent() {
        let description = west_east_matrix();
        let roles = ResolvedRoles::resolve(&description.columns);
        let ctx = AssembleContext {
            description: &description,
            roles: &roles,
            mapping: None,
        };
        let once = assemble_line(&ctx).unwrap();
        for dataset in &once.datasets {
            let values = scalars(dataset);
            let refiltered: Vec<Option<f64>> =
                values.iter().filter(|v| v.is_some()).cloned().collect();
            assert_eq!(values, &refiltered);
        }
    }

    #[test]
    fn test_xy_cat_measures_pairs() {
        let description = categorical(
            vec![
                ColumnMeta {
                    numeric: true,
                    ..category_column("Year")
                },
                measure_column("Sales"),
                measure_column("Profit"),
            ],
            CategoricalSource {
                category: ValueColumn {
                    column: 0,
                    values: vec![num(2023.0), num(2024.0), num(2025.0)],
                },
                values: vec![
                    ValueColumn {
                        column: 1,
                        values: vec![num(10.0), CellValue::Null, num(30.0)],
                    },
                    ValueColumn {
                        column: 2,
                        values: vec![num(1.0), num(2.0), num(3.0)],
                    },
                ],
            },
        );
        let roles = ResolvedRoles::resolve(&description.columns);
        let ctx = AssembleContext {
            description: &description,
            roles: &roles,
            mapping: Some(XyMapping::CatMeasures),
        };
        let data = assemble_xy(&ctx).unwrap();
        assert!(data.labels.is_none());
        assert_eq!(data.datasets.len(), 2);
        // The null y in Sales drops that pair only.
        let sales = points(&data.datasets[0]);
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0], XyPoint { x: 2023.0, y: 10.0 });
        assert_eq!(sales[1], XyPoint { x: 2025.0, y: 30.0 });
        let profit = points(&data.datasets[1]);
        assert_eq!(profit.len(), 3);
    }

    #[test]
    fn test_xy_series_datasets_share_category_axis() {
        let description = DataDescription {
            columns: vec![
                ColumnMeta {
                    numeric: true,
                    ..category_column("Year")
                },
                measure_column("Sales"),
                series_column("Region"),
            ],
            source: TabularSource::Matrix(MatrixSource {
                rows: MatrixNode::root(vec![
                    MatrixNode::leaf(num(2024.0), vec![num(5.0), num(8.0)]),
                    MatrixNode::leaf(num(2025.0), vec![num(6.0), num(9.0)]),
                ]),
                columns: Some(MatrixNode::root(vec![
                    MatrixNode::leaf(text("West"), Vec::new()),
                    MatrixNode::leaf(text("East"), Vec::new()),
                ])),
            }),
        };
        let roles = ResolvedRoles::resolve(&description.columns);
        let ctx = AssembleContext {
            description: &description,
            roles: &roles,
            mapping: Some(XyMapping::CatMeasureSeries),
        };
        let data = assemble_xy(&ctx).unwrap();
        assert_eq!(data.datasets.len(), 2);
        let west: Vec<f64> = points(&data.datasets[0]).iter().map(|p| p.x).collect();
        let east: Vec<f64> = points(&data.datasets[1]).iter().map(|p| p.x).collect();
        assert_eq!(west, east);
    }

    #[test]
    fn test_xy_unmapped_variant_is_refused() {
        let description = west_east_matrix();
        let roles = ResolvedRoles::resolve(&description.columns);
        let ctx = AssembleContext {
            description: &description,
            roles: &roles,
            mapping: Some(XyMapping::CatMeasureCat),
        };
        assert_eq!(assemble_xy(&ctx), Err(ShapeError::UnmappedVariant));
    }

    #[test]
    fn test_nested_matrix_rows_flatten_to_leaves() {
        let description = DataDescription {
            columns: vec![category_column("Quarter"), measure_column("Sales")],
            source: TabularSource::Matrix(MatrixSource {
                rows: MatrixNode::root(vec![MatrixNode {
                    value: Some(text("2024")),
                    values: Vec::new(),
                    children: vec![
                        MatrixNode::leaf(text("Q1"), vec![num(1.0)]),
                        MatrixNode::leaf(text("Q2"), vec![num(2.0)]),
                    ],
                }]),
                columns: None,
            }),
        };
        let roles = ResolvedRoles::resolve(&description.columns);
        let ctx = AssembleContext {
            description: &description,
            roles: &roles,
            mapping: None,
        };
        let data = assemble_category_measure(&ctx).unwrap();
        assert_eq!(data.labels.unwrap(), vec!["Q1", "Q2"]);
        assert_eq!(scalars(&data.datasets[0]), &vec![Some(1.0), Some(2.0)]);
    }
}
