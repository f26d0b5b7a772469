use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single hyperparameter value.
///
/// Untagged so grids read naturally from JSON or TOML: `[0.1, 1.0]`,
/// `[true, false]`, `["uniform", "distance"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Numeric view; integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// One concrete configuration: hyperparameter name to value.
///
/// Ordered so that logs and persisted reports are stable.
pub type Hyperparameters = BTreeMap<String, ParamValue>;

/// Candidate values per hyperparameter for an exhaustive search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamGrid {
    axes: BTreeMap<String, Vec<ParamValue>>,
}

impl ParamGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of one axis.
    #[must_use]
    pub fn with<V: Into<ParamValue>>(
        mut self,
        name: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.insert(name, values);
        self
    }

    pub fn insert<V: Into<ParamValue>>(&mut self, name: &str, values: impl IntoIterator<Item = V>) {
        self.axes
            .insert(name.to_string(), values.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Number of configurations `combinations` yields.
    pub fn len(&self) -> usize {
        self.axes.values().map(Vec::len).product()
    }

    /// Cartesian product of all axes, last axis varying fastest.
    ///
    /// An empty grid yields exactly one empty configuration; an axis with no
    /// values yields none.
    pub fn combinations(&self) -> Vec<Hyperparameters> {
        let mut combos = vec![Hyperparameters::new()];
        for (name, values) in &self.axes {
            let mut next = Vec::with_capacity(combos.len() * values.len());
            for combo in &combos {
                for value in values {
                    let mut extended = combo.clone();
                    extended.insert(name.clone(), value.clone());
                    next.push(extended);
                }
            }
            combos = next;
        }
        combos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_a_single_default_configuration() {
        let grid = ParamGrid::new();
        let combos = grid.combinations();
        assert_eq!(combos.len(), 1);
        assert!(combos[0].is_empty());
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn combinations_cover_the_cartesian_product() {
        let grid = ParamGrid::new()
            .with("penalty", [0.1, 1.0, 10.0])
            .with("fit_intercept", [true, false]);

        let combos = grid.combinations();
        assert_eq!(combos.len(), 6);
        assert_eq!(grid.len(), 6);
        assert_eq!(combos[0]["fit_intercept"], ParamValue::Bool(true));
        assert_eq!(combos[0]["penalty"], ParamValue::Float(0.1));
        assert_eq!(combos[1]["penalty"], ParamValue::Float(1.0));
    }

    #[test]
    fn axis_without_values_yields_nothing() {
        let grid = ParamGrid::new().with::<f64>("penalty", []);
        assert!(grid.combinations().is_empty());
    }

    #[test]
    fn grid_deserializes_from_plain_json() {
        let grid: ParamGrid = serde_json::from_str(
            r#"{"n_neighbors": [3, 5], "weights": ["uniform", "distance"], "penalty": [0.5]}"#,
        )
        .unwrap();

        assert_eq!(grid.len(), 4);
        let combo = &grid.combinations()[0];
        assert_eq!(combo["n_neighbors"].as_i64(), Some(3));
        assert_eq!(combo["weights"].as_str(), Some("uniform"));
        assert_eq!(combo["penalty"].as_f64(), Some(0.5));
    }

    proptest::proptest! {
        #[test]
        fn every_configuration_is_distinct_and_complete(sizes in proptest::collection::vec(1usize..4, 0..4)) {
            let mut grid = ParamGrid::new();
            for (axis, size) in sizes.iter().enumerate() {
                let values: Vec<i64> = (0..*size).map(|v| v as i64).collect();
                grid.insert(&format!("p{axis}"), values);
            }

            let combos = grid.combinations();
            proptest::prop_assert_eq!(combos.len(), sizes.iter().product::<usize>());
            for combo in &combos {
                proptest::prop_assert_eq!(combo.len(), sizes.len());
            }
            for (i, combo) in combos.iter().enumerate() {
                proptest::prop_assert!(combos[i + 1..].iter().all(|other| other != combo));
            }
        }
    }
}
