use crate::error::{GraphError, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use trace_code_model::{CodeUnitIndex, ResolutionError};

/// Kind of directed structural relation between two code units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// A calls a method declared by B
    Calls,

    /// A accesses a field whose type is B
    References,

    /// A declares a field or local variable of type B (or containing B)
    TypeUsage,
}

/// N×N relation counts addressed by code unit ordinals.
///
/// The diagonal is never written: self relations are dropped on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationMatrix {
    kind: RelationKind,
    values: Array2<f64>,
}

impl RelationMatrix {
    pub fn zeros(kind: RelationKind, size: usize) -> Self {
        Self {
            kind,
            values: Array2::zeros((size, size)),
        }
    }

    /// Wrap existing values, e.g. a matrix restored from a cache.
    ///
    /// Fails when the array is not square.
    pub fn from_values(kind: RelationKind, values: Array2<f64>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows != cols {
            return Err(GraphError::NotSquare { rows, cols });
        }
        Ok(Self { kind, values })
    }

    /// Add one relation from `from` to `to`.
    ///
    /// Returns `Ok(false)` for a self relation, which is never recorded.
    pub fn increment(&mut self, from: usize, to: usize) -> Result<bool> {
        let size = self.size();
        if from >= size || to >= size {
            return Err(GraphError::OrdinalOutOfRange { from, to, size });
        }
        if from == to {
            return Ok(false);
        }
        self.values[[from, to]] += 1.0;
        Ok(true)
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.values.nrows()
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values.get((from, to)).copied().unwrap_or(0.0)
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    /// Total incoming relations per unit
    pub fn column_sums(&self) -> Array1<f64> {
        self.values.sum_axis(Axis(0))
    }

    /// Sum of every recorded relation
    pub fn total(&self) -> f64 {
        self.values.sum()
    }
}

/// A resolution failure that was skipped while walking a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionDiagnostic {
    /// Unit whose body contained the expression
    pub unit: String,

    /// Relation the expression would have contributed to
    pub relation: RelationKind,

    pub error: ResolutionError,
}

/// The three structural relation matrices of one snapshot
#[derive(Debug, Clone)]
pub struct StructuralGraph {
    pub index: CodeUnitIndex,
    pub calls: RelationMatrix,
    pub references: RelationMatrix,

    /// Computed for completeness; the classifier does not score it.
    pub type_usage: RelationMatrix,

    /// Skipped expressions, in unit order
    pub diagnostics: Vec<ResolutionDiagnostic>,
}

impl StructuralGraph {
    pub fn empty(index: CodeUnitIndex) -> Self {
        let size = index.len();
        Self {
            index,
            calls: RelationMatrix::zeros(RelationKind::Calls, size),
            references: RelationMatrix::zeros(RelationKind::References, size),
            type_usage: RelationMatrix::zeros(RelationKind::TypeUsage, size),
            diagnostics: Vec::new(),
        }
    }

    pub fn matrix(&self, kind: RelationKind) -> &RelationMatrix {
        match kind {
            RelationKind::Calls => &self.calls,
            RelationKind::References => &self.references,
            RelationKind::TypeUsage => &self.type_usage,
        }
    }

    pub fn matrix_mut(&mut self, kind: RelationKind) -> &mut RelationMatrix {
        match kind {
            RelationKind::Calls => &mut self.calls,
            RelationKind::References => &mut self.references,
            RelationKind::TypeUsage => &mut self.type_usage,
        }
    }

    /// Number of code units (matrix dimension)
    pub fn unit_count(&self) -> usize {
        self.index.len()
    }

    /// Relation count between two named units
    pub fn relation(&self, kind: RelationKind, from: &str, to: &str) -> Option<f64> {
        let from = self.index.ordinal(from)?;
        let to = self.index.ordinal(to)?;
        Some(self.matrix(kind).get(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_skips_diagonal() {
        let mut matrix = RelationMatrix::zeros(RelationKind::Calls, 3);
        assert!(matrix.increment(0, 1).unwrap());
        assert!(matrix.increment(0, 1).unwrap());
        assert!(!matrix.increment(2, 2).unwrap());
        assert_eq!(matrix.get(0, 1), 2.0);
        assert_eq!(matrix.get(2, 2), 0.0);
        assert_eq!(matrix.total(), 2.0);
    }

    #[test]
    fn increment_rejects_out_of_range_ordinals() {
        let mut matrix = RelationMatrix::zeros(RelationKind::References, 2);
        let err = matrix.increment(0, 2).unwrap_err();
        assert!(matches!(
            err,
            GraphError::OrdinalOutOfRange { from: 0, to: 2, size: 2 }
        ));
    }

    #[test]
    fn column_sums_measure_incoming_relations() {
        let mut matrix = RelationMatrix::zeros(RelationKind::Calls, 3);
        matrix.increment(0, 2).unwrap();
        matrix.increment(1, 2).unwrap();
        matrix.increment(2, 0).unwrap();
        assert_eq!(matrix.column_sums().to_vec(), vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn from_values_requires_square_arrays() {
        assert!(RelationMatrix::from_values(RelationKind::Calls, Array2::zeros((2, 3))).is_err());
        let ok = RelationMatrix::from_values(RelationKind::Calls, Array2::zeros((2, 2))).unwrap();
        assert_eq!(ok.size(), 2);
    }

    #[test]
    fn relation_lookup_by_name() {
        let index = CodeUnitIndex::from_names(["a.A", "a.B"]);
        let mut graph = StructuralGraph::empty(index);
        graph.matrix_mut(RelationKind::Calls).increment(0, 1).unwrap();
        assert_eq!(graph.relation(RelationKind::Calls, "a.A", "a.B"), Some(1.0));
        assert_eq!(graph.relation(RelationKind::Calls, "a.B", "a.A"), Some(0.0));
        assert_eq!(graph.relation(RelationKind::Calls, "a.A", "x.Y"), None);
    }
}
