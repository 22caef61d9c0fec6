use plan_risk::workflows::generator::GeneratedPlan;
use plan_risk::workflows::scoring::{write_report, MethodKind, PlanScore, ReportLayout};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScoreFormat {
    Csv(ReportLayout),
    Json,
}

impl ScoreFormat {
    pub(crate) fn from_flag(json: bool, layout: ReportLayout) -> Self {
        if json {
            Self::Json
        } else {
            Self::Csv(layout)
        }
    }
}

#[derive(Serialize)]
struct ScoreListing<'a> {
    method: MethodKind,
    scores: &'a [PlanScore],
}

pub(crate) fn render_scores<W: Write>(
    out: &mut W,
    scores: &[PlanScore],
    method: MethodKind,
    format: ScoreFormat,
) -> io::Result<()> {
    match format {
        ScoreFormat::Csv(layout) => {
            write_report(&mut *out, scores, method, layout).map_err(io::Error::other)
        }
        ScoreFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &ScoreListing { method, scores })?;
            writeln!(out)
        }
    }
}

pub(crate) fn render_plans<W: Write>(out: &mut W, plans: &[GeneratedPlan]) -> io::Result<()> {
    for plan in plans {
        writeln!(out, "{} {}", plan.name, plan.path())?;
    }
    Ok(())
}
