//! The `matrix` subcommand: print one match's scoreline grid.

use std::sync::Arc;

use owo_colors::OwoColorize;

use super::{output, MatrixArgs};
use crate::adapter::{FileMatchStore, FileRuleStore};
use crate::app::Evaluator;
use crate::config::Config;
use crate::error::Result;

pub async fn run(args: MatrixArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    config.logging.init();

    let evaluator = Evaluator::new(
        Arc::new(FileRuleStore::new(&config.stores.rules)),
        Arc::new(FileMatchStore::new(&config.stores.matches)),
        config.model.clone(),
    );
    let report = evaluator.evaluate_one(&args.match_id).await?;
    let grid = &report.grid;

    output::section(&format!("Scoreline grid: {}", report.label));
    output::key_value("λ home", format!("{:.3}", grid.lambda_home()));
    output::key_value("λ away", format!("{:.3}", grid.lambda_away()));
    if let Some(rec) = report.recommendations.first() {
        output::key_value(
            "pick",
            format!(
                "{} {} (rule '{}')",
                rec.market(),
                rec.predicted_outcome(),
                rec.source_rule()
            ),
        );
    }

    // Header: away goals across the top.
    print!("{:>5}", "h\\a");
    for a in 0..=grid.max_goals() {
        print!("{a:>8}");
    }
    println!();

    for h in 0..=grid.max_goals() {
        print!("{h:>5}");
        for a in 0..=grid.max_goals() {
            let Some(cell) = grid.cell(h, a) else {
                continue;
            };
            let text = format!("{:>7.2}%", cell.probability * 100.0);
            if cell.highlighted {
                print!("{}", text.green().bold());
            } else {
                print!("{text}");
            }
        }
        println!();
    }

    let mode = grid.mode();
    output::key_value(
        "most likely",
        format!(
            "{}-{} ({:.1}%)",
            mode.home_goals,
            mode.away_goals,
            mode.probability * 100.0
        ),
    );
    output::key_value("grid mass", format!("{:.4}", grid.total_probability()));
    Ok(())
}
