//! The `evaluate` subcommand: run the full pipeline and print the results.

use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{output, EvaluateArgs};
use crate::adapter::{FileMatchStore, FileRuleStore};
use crate::app::{Evaluator, MatchReport};
use crate::config::Config;
use crate::domain::DetectedOpportunity;
use crate::error::Result;

#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "Match")]
    match_label: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Pick")]
    pick: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Rule")]
    rule: String,
}

impl RecommendationRow {
    fn from_report(report: &MatchReport, rec: &DetectedOpportunity) -> Self {
        let confidence = match report.confidence {
            Some(c) if c.premium => format!("{} (premium)", c.tier),
            Some(c) => c.tier.to_string(),
            None => "-".into(),
        };
        Self {
            match_label: report.label.clone(),
            market: rec.market().to_string(),
            pick: rec.predicted_outcome().to_string(),
            odds: format!("{:.2}", rec.odds()),
            confidence,
            rule: rec.source_rule().to_string(),
        }
    }
}

pub async fn run(args: EvaluateArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    config.logging.init();

    let evaluator = Evaluator::new(
        Arc::new(FileRuleStore::new(&config.stores.rules)),
        Arc::new(FileMatchStore::new(&config.stores.matches)),
        config.model.clone(),
    );
    let reports = evaluator.evaluate_all().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let rows: Vec<RecommendationRow> = reports
        .iter()
        .flat_map(|report| {
            report
                .recommendations
                .iter()
                .map(|rec| RecommendationRow::from_report(report, rec))
        })
        .collect();

    output::section("Recommendations");
    if rows.is_empty() {
        output::note("no rule matched any match");
    } else {
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{table}");
    }

    if args.all_candidates {
        output::section("Candidates");
        for report in &reports {
            for candidate in &report.candidates {
                let line = format!(
                    "{}: {} {} @ {:.2} [{}] {}",
                    report.label,
                    candidate.market(),
                    candidate.predicted_outcome(),
                    candidate.odds(),
                    candidate.source_rule(),
                    candidate.matched_conditions().join("; "),
                );
                if candidate.is_inverted() {
                    println!("{}", line.yellow());
                } else {
                    output::note(&line);
                }
            }
        }
    }

    let quiet = reports
        .iter()
        .filter(|r| r.recommendations.is_empty())
        .count();
    output::key_value("matches", reports.len());
    output::key_value("no pick", quiet);
    Ok(())
}
