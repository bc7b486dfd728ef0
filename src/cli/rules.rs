//! The `rules` subcommand: list the configured detection rules.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{output, ConfigPathArg};
use crate::adapter::FileRuleStore;
use crate::config::Config;
use crate::domain::ConditionalRule;
use crate::error::Result;
use crate::port::RuleStore;

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Priority")]
    priority: i32,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Conditions")]
    conditions: String,
}

impl From<&ConditionalRule> for RuleRow {
    fn from(rule: &ConditionalRule) -> Self {
        Self {
            name: rule.name.clone(),
            market: rule.market.to_string(),
            priority: rule.priority,
            action: rule.action.to_string(),
            enabled: if rule.enabled { "yes" } else { "no" }.into(),
            conditions: rule.conditions_summary(),
        }
    }
}

pub async fn run(args: ConfigPathArg) -> Result<()> {
    let config = Config::load(&args.config)?;
    let store = FileRuleStore::new(&config.stores.rules);
    let rules = store.get_rules().await?;

    output::section("Detection rules");
    if rules.is_empty() {
        output::note("no rules configured");
        return Ok(());
    }

    let rows: Vec<RuleRow> = rules.iter().map(RuleRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
    output::key_value("total", rules.len());
    Ok(())
}
