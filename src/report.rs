use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{PredictionRequest, PredictionResult};
use crate::prediction::BatchOutcome;
use crate::risk;

pub fn build_prediction_report(
    request: &PredictionRequest,
    result: &PredictionResult,
    generated_on: NaiveDate,
) -> String {
    let scheme = risk::scheme_for(result.risk_level);
    let mut output = String::new();

    let _ = writeln!(output, "# Dropout Risk Report");
    let _ = writeln!(output, "Generated for {} on {}", request.name, generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Assessment");
    let _ = writeln!(
        output,
        "- Risk level: {} {}",
        scheme.icon.glyph(),
        result.risk_level.label()
    );
    let _ = writeln!(output, "- Risk score: {:.0}%", result.risk_score);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Inputs");
    let _ = writeln!(output, "- Attendance: {:.1}%", request.attendance);
    let _ = writeln!(output, "- GPA: {:.2}", request.gpa);
    let _ = writeln!(output, "- Participation: {:.1}/10", request.participation);
    let _ = writeln!(output, "- Stress: {:.1}/10", request.stress);
    let _ = writeln!(output, "- Family income: {:.0}", request.family_income);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendations");

    if result.recommendations.is_empty() {
        let _ = writeln!(output, "No recommendations returned.");
    } else {
        for (index, recommendation) in result.recommendations.iter().enumerate() {
            let _ = writeln!(output, "{}. {}", index + 1, recommendation);
        }
    }

    output
}

pub fn build_batch_report(outcomes: &[BatchOutcome], generated_on: NaiveDate) -> String {
    let results: Vec<PredictionResult> = outcomes
        .iter()
        .filter_map(|row| row.outcome.as_ref().ok().cloned())
        .collect();
    let summaries = risk::summarize_by_level(&results);

    let mut output = String::new();
    let _ = writeln!(output, "# Batch Risk Report");
    let _ = writeln!(
        output,
        "Generated on {} ({} of {} students scored)",
        generated_on,
        results.len(),
        outcomes.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No students were scored.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} students (avg score {:.1})",
                summary.risk_level.label(),
                summary.count,
                summary.avg_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Students");

    for row in outcomes {
        match &row.outcome {
            Ok(result) => {
                let _ = writeln!(
                    output,
                    "- {}: {} ({:.0}%)",
                    row.name,
                    result.risk_level.label(),
                    result.risk_score
                );
            }
            Err(reason) => {
                let _ = writeln!(output, "- {}: failed ({})", row.name, reason);
            }
        }
    }

    output
}
