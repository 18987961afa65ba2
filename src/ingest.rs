use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::io::Read;

use crate::data::{
    CategoricalSource, CellValue, ColumnMeta, DataDescription, MatrixNode, MatrixSource, Role,
    TabularSource, ValueColumn,
};
use crate::parser::ast::RoleMap;

/// Build a data description from CSV input and a role map. Without a series
/// the result is a flat categorical payload; with a series the long-format
/// rows are pivoted into a matrix with one column per distinct series value.
pub fn description_from_csv<R: Read>(reader: R, roles: &RoleMap) -> Result<DataDescription> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()
        .context("failed to read CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("failed to read CSV record")?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    if rows.is_empty() {
        bail!("CSV input needs at least one data row");
    }

    let category = roles
        .category
        .as_ref()
        .ok_or_else(|| anyhow!("map() must assign a category column"))?;
    if roles.measures.is_empty() {
        bail!("map() must assign at least one measure column");
    }

    let cat_idx = find_column(&headers, &category.column)?;
    let measure_idxs = roles
        .measures
        .iter()
        .map(|field| find_column(&headers, &field.column))
        .collect::<Result<Vec<_>>>()?;
    let series_idx = roles
        .series
        .as_ref()
        .map(|field| find_column(&headers, &field.column))
        .transpose()?;

    // Metadata list: category first, then measures, then the series.
    let mut columns = vec![ColumnMeta {
        display_name: headers[cat_idx].clone(),
        roles: vec![Role::Category],
        numeric: !category.date && infer_numeric(&rows, cat_idx),
        date_time: category.date,
        is_measure: false,
    }];
    for (field, &idx) in roles.measures.iter().zip(&measure_idxs) {
        columns.push(ColumnMeta {
            display_name: headers[idx].clone(),
            roles: vec![Role::Measure],
            numeric: infer_numeric(&rows, idx),
            date_time: false,
            is_measure: !field.grouping,
        });
    }
    if let Some(idx) = series_idx {
        columns.push(ColumnMeta {
            display_name: headers[idx].clone(),
            roles: vec![Role::Series],
            numeric: false,
            date_time: false,
            is_measure: false,
        });
    }

    let category_cell = |raw: &str| {
        if category.date {
            parse_date_cell(raw)
        } else {
            parse_cell(raw)
        }
    };

    let source = match series_idx {
        None => {
            let category_values = rows.iter().map(|row| category_cell(&row[cat_idx])).collect();
            let values = measure_idxs
                .iter()
                .enumerate()
                .map(|(m, &idx)| ValueColumn {
                    column: m + 1,
                    values: rows.iter().map(|row| parse_cell(&row[idx])).collect(),
                })
                .collect();
            TabularSource::Categorical(CategoricalSource {
                category: ValueColumn {
                    column: 0,
                    values: category_values,
                },
                values,
            })
        }
        Some(series_column) => {
            // Pivot the long-format rows: categories down, series across.
            // The first mapped measure supplies the cell values.
            let measure_column = measure_idxs[0];
            let categories = distinct_in_order(&rows, cat_idx);
            let series_values = distinct_in_order(&rows, series_column);

            let mut cells: HashMap<(String, String), CellValue> = HashMap::new();
            for row in &rows {
                cells
                    .entry((row[cat_idx].clone(), row[series_column].clone()))
                    .or_insert_with(|| parse_cell(&row[measure_column]));
            }

            let row_nodes = categories
                .iter()
                .map(|cat| {
                    MatrixNode::leaf(
                        category_cell(cat),
                        series_values
                            .iter()
                            .map(|series| {
                                cells
                                    .get(&(cat.clone(), series.clone()))
                                    .cloned()
                                    .unwrap_or(CellValue::Null)
                            })
                            .collect(),
                    )
                })
                .collect();
            let column_nodes = series_values
                .iter()
                .map(|series| MatrixNode::leaf(CellValue::Text(series.clone()), Vec::new()))
                .collect();

            TabularSource::Matrix(MatrixSource {
                rows: MatrixNode::root(row_nodes),
                columns: Some(MatrixNode::root(column_nodes)),
            })
        }
    };

    Ok(DataDescription { columns, source })
}

/// Parse a full data description (metadata plus categorical or matrix
/// payload) from JSON input.
pub fn description_from_json<R: Read>(reader: R) -> Result<DataDescription> {
    serde_json::from_reader(reader).context("failed to parse JSON data description")
}

fn find_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("column '{}' not found in CSV headers", name))
}

/// A column counts as numeric when every non-empty cell parses as a number.
fn infer_numeric(rows: &[Vec<String>], idx: usize) -> bool {
    let mut any = false;
    for row in rows {
        let cell = row[idx].trim();
        if cell.is_empty() {
            continue;
        }
        if cell.parse::<f64>().is_err() {
            return false;
        }
        any = true;
    }
    any
}

fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    match trimmed.parse::<f64>() {
        Ok(n) => CellValue::Number(n),
        Err(_) => CellValue::Text(trimmed.to_string()),
    }
}

/// Date cells become epoch-millisecond numbers so they can feed a continuous
/// axis; anything unparseable keeps its text form.
fn parse_date_cell(raw: &str) -> CellValue {
    match parse_date(raw) {
        Some(ms) => CellValue::Number(ms),
        None => parse_cell(raw),
    }
}

fn parse_date(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis() as f64);
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            let dt = date.and_hms_opt(0, 0, 0)?;
            return Some(dt.and_utc().timestamp_millis() as f64);
        }
    }
    None
}

fn distinct_in_order(rows: &[Vec<String>], idx: usize) -> Vec<String> {
    let mut seen = Vec::new();
    for row in rows {
        let value = row[idx].clone();
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
