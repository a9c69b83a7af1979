use pretty_assertions::assert_eq;
use trace_classifier::ClassifierConfig;
use trace_cli::{classify_matrices, run_analysis};
use trace_code_model::{CallTarget, ResolutionError, ResolvedType, SourceModel, UnitDeclaration};
use trace_graph::RelationKind;
use trace_semantic::Lexicon;

const FEATURES: [&str; 10] = [
    "billing invoice ledger",
    "shipping parcel courier",
    "catalog product listing",
    "checkout basket payment",
    "customer profile address",
    "warehouse stock inventory",
    "discount coupon campaign",
    "review rating feedback",
    "report revenue quarter",
    "search query ranking",
];

/// `core.Hub` is called by ten feature units and has no vocabulary of its own
fn hub_snapshot() -> SourceModel {
    let mut units = vec![UnitDeclaration::new("core.Hub")
        .with_comment("is it the one")
        .with_identifier("run")];
    for (i, words) in FEATURES.iter().enumerate() {
        units.push(
            UnitDeclaration::new(format!("feature.Unit{i:02}"))
                .with_comment(*words)
                .with_call(Ok(CallTarget::new("core", "Hub"))),
        );
    }
    SourceModel::from_units(units)
}

#[test]
fn hub_without_vocabulary_is_a_utility_trace() {
    let model = hub_snapshot();
    let analysis = run_analysis(&model, &Lexicon::java(), &ClassifierConfig::new(0.9, 0.9)).unwrap();

    assert_eq!(analysis.index().len(), 11);
    assert_eq!(
        analysis.report.utility_traces.iter().cloned().collect::<Vec<_>>(),
        vec!["core.Hub".to_string()]
    );

    let hub = analysis.report.score("core.Hub").unwrap();
    assert_eq!(hub.cs, 1.0 - 1.0 / 11.0);
    assert_eq!(hub.fdr, 5.0);
    assert!(analysis.similarity.get(0, 1).is_nan());
    assert_eq!(analysis.fdr().len(), 11);
    assert_eq!(analysis.cs()[0], hub.cs);
}

#[test]
fn production_thresholds_reject_ten_callers() {
    let model = hub_snapshot();
    let analysis = run_analysis(&model, &Lexicon::java(), &ClassifierConfig::default()).unwrap();
    assert!(analysis.report.utility_traces.is_empty());
}

#[test]
fn relations_and_diagnostics_are_exposed() {
    let model = SourceModel::from_units(vec![
        UnitDeclaration::new("a.A")
            .with_comment("ledger entries")
            .with_call(Ok(CallTarget::new("a", "B")))
            .with_call(Ok(CallTarget::new("a", "B")))
            .with_call(Err(ResolutionError::UnsolvedSymbol("missing()".to_string())))
            .with_field_access(Ok(ResolvedType::reference("a.B")))
            .with_field(Ok(ResolvedType::array_of(ResolvedType::reference("a.B")))),
        UnitDeclaration::new("a.B").with_comment("ledger balances"),
    ]);
    let analysis = run_analysis(&model, &Lexicon::java(), &ClassifierConfig::default()).unwrap();

    let graph = &analysis.graph;
    assert_eq!(graph.relation(RelationKind::Calls, "a.A", "a.B"), Some(2.0));
    assert_eq!(graph.relation(RelationKind::Calls, "a.B", "a.A"), Some(0.0));
    assert_eq!(graph.relation(RelationKind::References, "a.A", "a.B"), Some(1.0));
    assert_eq!(graph.relation(RelationKind::TypeUsage, "a.A", "a.B"), Some(1.0));
    assert_eq!(analysis.diagnostics().len(), 1);
    assert_eq!(analysis.diagnostics()[0].unit, "a.A");
}

#[test]
fn cached_matrices_reproduce_the_report() {
    let model = hub_snapshot();
    let config = ClassifierConfig::new(0.9, 0.9);
    let analysis = run_analysis(&model, &Lexicon::java(), &config).unwrap();

    let report = classify_matrices(
        analysis.index(),
        analysis.graph.calls.values(),
        analysis.graph.references.values(),
        analysis.similarity.values(),
        &config,
    )
    .unwrap();
    assert_eq!(report, analysis.report);
}
