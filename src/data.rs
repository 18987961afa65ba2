use serde::{Deserialize, Serialize};

/// A single cell of the tabular source. Values arrive as whatever the host
/// supplied; numeric coercion happens at assembly time, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Strict numeric coercion: anything not representable as a finite number
    /// is treated as null by the callers that filter.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Coerce to a display label, the way the category axis renders values.
    pub fn to_label(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Bool(b) => b.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// Semantic role a column can be tagged with, independent of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Category,
    Measure,
    Series,
}

/// Column metadata as supplied by the host data source. Read-only for the
/// duration of one transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMeta {
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Declared numeric type tag.
    #[serde(default)]
    pub numeric: bool,
    /// Declared date/time type tag.
    #[serde(default)]
    pub date_time: bool,
    /// True for actual aggregated measures, false for grouping fields that
    /// merely sit in a measure well.
    #[serde(default)]
    pub is_measure: bool,
}

impl ColumnMeta {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Numeric or date-typed, i.e. usable as a continuous axis.
    pub fn is_continuous(&self) -> bool {
        self.numeric || self.date_time
    }
}

/// One value array paired with its originating metadata column (by index).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueColumn {
    pub column: usize,
    pub values: Vec<CellValue>,
}

/// Flat categorical payload: one category array plus one value array per
/// measure column, all index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSource {
    pub category: ValueColumn,
    pub values: Vec<ValueColumn>,
}

/// A node of a hierarchical row or column tree. Leaf rows carry a category
/// value plus a value vector aligned by index to either the measure list or
/// the column-tree leaves (when series are present).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixNode {
    #[serde(default)]
    pub value: Option<CellValue>,
    #[serde(default)]
    pub values: Vec<CellValue>,
    #[serde(default)]
    pub children: Vec<MatrixNode>,
}

impl MatrixNode {
    pub fn root(children: Vec<MatrixNode>) -> Self {
        MatrixNode {
            value: None,
            values: Vec::new(),
            children,
        }
    }

    pub fn leaf(value: CellValue, values: Vec<CellValue>) -> Self {
        MatrixNode {
            value: Some(value),
            values,
            children: Vec::new(),
        }
    }

    /// Collect the leaves of the tree in depth-first order. The trees the
    /// host hands over are usually one level deep, but nested groupings are
    /// walked all the way down.
    pub fn leaves(&self) -> Vec<&MatrixNode> {
        let mut out = Vec::new();
        collect_leaves(&self.children, &mut out);
        out
    }
}

fn collect_leaves<'a>(children: &'a [MatrixNode], out: &mut Vec<&'a MatrixNode>) {
    for child in children {
        if child.children.is_empty() {
            out.push(child);
        } else {
            collect_leaves(&child.children, out);
        }
    }
}

/// Hierarchical matrix payload: a row tree and, when series are present, a
/// column tree whose leaves are the series values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSource {
    pub rows: MatrixNode,
    #[serde(default)]
    pub columns: Option<MatrixNode>,
}

/// The two tabular shapes a payload can take, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabularSource {
    Categorical(CategoricalSource),
    Matrix(MatrixSource),
}

/// Everything the host supplies for one transform invocation: the column
/// metadata list plus one tabular payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDescription {
    pub columns: Vec<ColumnMeta>,
    pub source: TabularSource,
}

impl DataDescription {
    /// Bare-minimum structural check: metadata present and the payload has a
    /// non-empty data section.
    pub fn has_minimum_sections(&self) -> bool {
        if self.columns.is_empty() {
            return false;
        }
        match &self.source {
            TabularSource::Categorical(c) => {
                !c.category.values.is_empty() && !c.values.is_empty()
            }
            TabularSource::Matrix(m) => !m.rows.children.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number_coercion() {
        assert_eq!(CellValue::Number(10.5).as_number(), Some(10.5));
        assert_eq!(CellValue::Text("42".to_string()).as_number(), Some(42.0));
        assert_eq!(CellValue::Text(" 3.5 ".to_string()).as_number(), Some(3.5));
        assert_eq!(CellValue::Text("abc".to_string()).as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Null.as_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_to_label() {
        assert_eq!(CellValue::Number(10.0).to_label(), "10");
        assert_eq!(CellValue::Number(10.5).to_label(), "10.5");
        assert_eq!(CellValue::Text("West".to_string()).to_label(), "West");
        assert_eq!(CellValue::Null.to_label(), "");
    }

    #[test]
    fn test_cell_value_json_round_trip() {
        let values: Vec<CellValue> =
            serde_json::from_str(r#"[10, "West", null, true, 2.5]"#).unwrap();
        assert_eq!(values[0], CellValue::Number(10.0));
        assert_eq!(values[1], CellValue::Text("West".to_string()));
        assert_eq!(values[2], CellValue::Null);
        assert_eq!(values[3], CellValue::Bool(true));
        assert_eq!(serde_json::to_string(&values[2]).unwrap(), "null");
    }

    #[test]
    fn test_nested_leaves() {
        let tree = MatrixNode::root(vec![
            MatrixNode {
                value: Some(CellValue::Text("2024".to_string())),
                values: Vec::new(),
                children: vec![
                    MatrixNode::leaf(CellValue::Text("Q1".to_string()), vec![CellValue::Number(1.0)]),
                    MatrixNode::leaf(CellValue::Text("Q2".to_string()), vec![CellValue::Number(2.0)]),
                ],
            },
            MatrixNode::leaf(CellValue::Text("2025".to_string()), vec![CellValue::Number(3.0)]),
        ]);
        let leaves = tree.leaves();
        assert_eq!(leaves.len(), 3);
        assert_eq!(leaves[0].value, Some(CellValue::Text("Q1".to_string())));
        assert_eq!(leaves[2].value, Some(CellValue::Text("2025".to_string())));
    }

    #[test]
    fn test_minimum_sections() {
        let desc = DataDescription {
            columns: vec![],
            source: TabularSource::Categorical(CategoricalSource {
                category: ValueColumn { column: 0, values: vec![CellValue::Number(1.0)] },
                values: vec![ValueColumn { column: 1, values: vec![CellValue::Number(1.0)] }],
            }),
        };
        assert!(!desc.has_minimum_sections());
    }
}
