use super::{MethodKind, PlanScore, ScoringError};
use std::io::Write;

/// Column set of the risk report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    ScoreOnly,
    /// Adds the batch-normalized score column used by the end-to-end run.
    WithNormalized,
}

/// Writes `Plan,ServicePath,<score column>[,NormalizedScore]` with four decimals.
pub fn write_report<W: Write>(
    writer: W,
    scores: &[PlanScore],
    method: MethodKind,
    layout: ReportLayout,
) -> Result<(), ScoringError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Plan", "ServicePath", method.score_column()];
    if layout == ReportLayout::WithNormalized {
        header.push("NormalizedScore");
    }
    csv_writer.write_record(&header)?;

    for score in scores {
        let mut row = vec![
            score.plan.clone(),
            score.path.clone(),
            format!("{:.4}", score.risk_score),
        ];
        if layout == ReportLayout::WithNormalized {
            row.push(
                score
                    .normalized_score
                    .map(|value| format!("{value:.4}"))
                    .unwrap_or_default(),
            );
        }
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> Vec<PlanScore> {
        vec![
            PlanScore {
                plan: "P1".to_string(),
                path: "S1->S2->S3".to_string(),
                risk_score: 48.0,
                normalized_score: Some(1.0),
            },
            PlanScore {
                plan: "P2".to_string(),
                path: "S2".to_string(),
                risk_score: 12.345678,
                normalized_score: Some(0.0),
            },
        ]
    }

    #[test]
    fn end_to_end_layout_includes_normalized_column() {
        let mut buffer = Vec::new();
        write_report(
            &mut buffer,
            &scores(),
            MethodKind::RawWeighted,
            ReportLayout::WithNormalized,
        )
        .expect("report writes");

        assert_eq!(
            String::from_utf8(buffer).expect("utf8"),
            "Plan,ServicePath,RiskScore,NormalizedScore\n\
P1,S1->S2->S3,48.0000,1.0000\n\
P2,S2,12.3457,0.0000\n"
        );
    }

    #[test]
    fn header_follows_method() {
        for (method, header) in [
            (MethodKind::RawWeighted, "Plan,ServicePath,RiskScore"),
            (MethodKind::Historical, "Plan,ServicePath,H-RiskScore"),
            (MethodKind::Threshold, "Plan,ServicePath,T-RiskScore"),
        ] {
            let mut buffer = Vec::new();
            write_report(&mut buffer, &scores(), method, ReportLayout::ScoreOnly)
                .expect("report writes");

            let text = String::from_utf8(buffer).expect("utf8");
            assert_eq!(text.lines().next(), Some(header));
            assert_eq!(text.lines().nth(1), Some("P1,S1->S2->S3,48.0000"));
        }
    }
}
