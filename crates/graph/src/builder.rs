use crate::error::{GraphError, Result};
use crate::types::*;
use rayon::prelude::*;
use trace_code_model::{CodeUnitIndex, Resolution, ResolvedType, UnitDeclaration};

/// Relations found in one unit, before they are merged into the matrices
#[derive(Debug, Default)]
struct UnitRelations {
    ordinal: usize,
    edges: Vec<(RelationKind, usize)>,
    diagnostics: Vec<ResolutionDiagnostic>,
}

/// Build the structural relation matrices from resolved declarations
pub struct GraphBuilder<'a> {
    index: &'a CodeUnitIndex,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(index: &'a CodeUnitIndex) -> Self {
        Self { index }
    }

    /// Walk every unit and count Calls, References and TypeUsage relations.
    ///
    /// Units are walked in parallel; their edges are merged in unit order so
    /// the result does not depend on scheduling.
    pub fn build(&self, units: &[UnitDeclaration]) -> Result<StructuralGraph> {
        // Phase 1: collect per-unit relations independently
        let collected: Vec<UnitRelations> = units
            .par_iter()
            .map(|unit| self.collect_unit(unit))
            .collect::<Result<_>>()?;

        // Phase 2: merge into the matrices
        let mut graph = StructuralGraph::empty(self.index.clone());
        for unit in collected {
            for (kind, target) in unit.edges {
                graph.matrix_mut(kind).increment(unit.ordinal, target)?;
            }
            graph.diagnostics.extend(unit.diagnostics);
        }

        log::info!(
            "Built structural graph: {} units, {} calls, {} references, {} type usages, {} unresolved",
            graph.unit_count(),
            graph.calls.total(),
            graph.references.total(),
            graph.type_usage.total(),
            graph.diagnostics.len()
        );

        Ok(graph)
    }

    fn collect_unit(&self, unit: &UnitDeclaration) -> Result<UnitRelations> {
        let ordinal = self
            .index
            .ordinal(&unit.name)
            .ok_or_else(|| GraphError::UnknownUnit(unit.name.clone()))?;

        let mut relations = UnitRelations {
            ordinal,
            ..Default::default()
        };

        // Calls: declaring type of every resolved callee
        for call in &unit.calls {
            match call {
                Ok(target) => {
                    let name = target.qualified_name();
                    relations.record(self.index, RelationKind::Calls, &name);
                }
                Err(error) => relations.skip(unit, RelationKind::Calls, error),
            }
        }

        // TypeUsage: declared types of fields and local variables
        for declaration in unit.fields.iter().chain(&unit.locals) {
            relations.record_type(self.index, unit, RelationKind::TypeUsage, declaration);
        }

        // References: types of accessed fields
        for access in &unit.field_accesses {
            relations.record_type(self.index, unit, RelationKind::References, access);
        }

        Ok(relations)
    }
}

impl UnitRelations {
    /// Record an edge to `name` if it is an analyzed unit other than this one
    fn record(&mut self, index: &CodeUnitIndex, kind: RelationKind, name: &str) {
        if let Some(target) = index.ordinal(name) {
            if target != self.ordinal {
                self.edges.push((kind, target));
            }
        }
    }

    fn record_type(
        &mut self,
        index: &CodeUnitIndex,
        unit: &UnitDeclaration,
        kind: RelationKind,
        resolved: &Resolution<ResolvedType>,
    ) {
        match resolved {
            Ok(ty) => {
                for name in ty.referenced_names() {
                    self.record(index, kind, name);
                }
            }
            Err(error) => self.skip(unit, kind, error),
        }
    }

    fn skip(
        &mut self,
        unit: &UnitDeclaration,
        relation: RelationKind,
        error: &trace_code_model::ResolutionError,
    ) {
        log::debug!("{} >> {}", unit.name, error);
        self.diagnostics.push(ResolutionDiagnostic {
            unit: unit.name.clone(),
            relation,
            error: error.clone(),
        });
    }
}
