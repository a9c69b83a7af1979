use anyhow::{Context, Result};
use ndarray::Array2;
use trace_classifier::{ClassifierConfig, UtilityTraceClassifier, UtilityTraceReport};
use trace_code_model::{CodeUnitIndex, SourceModel};
use trace_graph::{GraphBuilder, ResolutionDiagnostic, StructuralGraph};
use trace_semantic::{Lexicon, SemanticAnalysis, SemanticMatrix};

/// Every product of one end-to-end run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: StructuralGraph,
    pub similarity: SemanticMatrix,
    pub report: UtilityTraceReport,
}

impl Analysis {
    pub fn index(&self) -> &CodeUnitIndex {
        &self.graph.index
    }

    pub fn diagnostics(&self) -> &[ResolutionDiagnostic] {
        &self.graph.diagnostics
    }

    /// FDR per unit, in ordinal order
    pub fn fdr(&self) -> Vec<f64> {
        self.report.scores.iter().map(|score| score.fdr).collect()
    }

    /// CS per unit, in ordinal order
    pub fn cs(&self) -> Vec<f64> {
        self.report.scores.iter().map(|score| score.cs).collect()
    }
}

/// Build both relation families, then classify.
///
/// The structural walk and the document pipeline are independent and run
/// concurrently; TF-IDF and similarity start once the documents are done.
pub fn run_analysis(
    model: &SourceModel,
    lexicon: &Lexicon,
    config: &ClassifierConfig,
) -> Result<Analysis> {
    let index = model.index();
    log::info!("Analyzing {} code units", index.len());

    let (graph, semantic) = rayon::join(
        || GraphBuilder::new(index).build(model.units()),
        || SemanticAnalysis::build(index, model.units(), lexicon),
    );
    let graph = graph.context("Failed to build structural relations")?;
    let semantic = semantic.context("Failed to build semantic relations")?;

    let report = classify_matrices(
        index,
        graph.calls.values(),
        graph.references.values(),
        semantic.similarity.values(),
        config,
    )?;

    Ok(Analysis {
        graph,
        similarity: semantic.similarity,
        report,
    })
}

/// Classify from already computed matrices, e.g. ones restored from a cache
pub fn classify_matrices(
    index: &CodeUnitIndex,
    calls: &Array2<f64>,
    references: &Array2<f64>,
    semantic: &Array2<f64>,
    config: &ClassifierConfig,
) -> Result<UtilityTraceReport> {
    let classifier = UtilityTraceClassifier::new(*config).context("Invalid classifier thresholds")?;
    classifier
        .classify(index, calls, references, semantic)
        .context("Relation matrices do not match the code unit index")
}
