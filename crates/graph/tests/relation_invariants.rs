use proptest::prelude::*;
use trace_code_model::{CallTarget, ResolvedType, SourceModel, UnitDeclaration};
use trace_graph::{GraphBuilder, RelationKind};

const UNITS: usize = 6;

fn unit_name(i: usize) -> String {
    format!("demo.Unit{i}")
}

fn snapshot(edges: &[(usize, usize, u8)]) -> SourceModel {
    let mut units: Vec<UnitDeclaration> = (0..UNITS).map(|i| UnitDeclaration::new(unit_name(i))).collect();
    for &(from, to, shape) in edges {
        let target = unit_name(to);
        let unit = &mut units[from];
        match shape % 3 {
            0 => unit.calls.push(Ok(CallTarget::new("demo", format!("Unit{to}")))),
            1 => unit.field_accesses.push(Ok(ResolvedType::array_of(ResolvedType::reference(target)))),
            _ => unit.locals.push(Ok(ResolvedType::generic(
                "java.util.List",
                vec![ResolvedType::reference(target)],
            ))),
        }
    }
    SourceModel::from_units(units)
}

proptest! {
    #[test]
    fn diagonal_stays_zero_and_totals_match(
        edges in prop::collection::vec((0..UNITS, 0..UNITS, any::<u8>()), 0..60)
    ) {
        let model = snapshot(&edges);
        let graph = GraphBuilder::new(model.index()).build(model.units()).unwrap();

        for kind in [RelationKind::Calls, RelationKind::References, RelationKind::TypeUsage] {
            let matrix = graph.matrix(kind);
            prop_assert_eq!(matrix.values().dim(), (UNITS, UNITS));
            for i in 0..UNITS {
                prop_assert_eq!(matrix.get(i, i), 0.0);
            }
            prop_assert!(matrix.values().iter().all(|v| *v >= 0.0));
        }

        let expected_calls = edges
            .iter()
            .filter(|(from, to, shape)| shape % 3 == 0 && from != to)
            .count() as f64;
        prop_assert_eq!(graph.calls.total(), expected_calls);
    }
}
