use std::fmt::Write;
use trace_classifier::UtilityTraceReport;

/// Plain-text summary: unit and trace counts, then the trace names in
/// order. With `scores`, a per-unit FDR/CS table follows.
pub fn render_text(report: &UtilityTraceReport, scores: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total classes : {}", report.unit_count());
    let _ = writeln!(out, "Total utility traces : {}", report.utility_traces.len());
    for name in &report.utility_traces {
        let _ = writeln!(out, "{name}");
    }

    if scores {
        let width = report
            .scores
            .iter()
            .map(|score| score.name.len())
            .max()
            .unwrap_or(0);
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<width$}  {:>10}  {:>10}  utility", "unit", "fdr", "cs");
        for score in &report.scores {
            let _ = writeln!(
                out,
                "{:<width$}  {:>10.4}  {:>10.4}  {}",
                score.name,
                score.fdr,
                score.cs,
                if score.utility { "yes" } else { "no" }
            );
        }
    }

    out.trim_end().to_string()
}
