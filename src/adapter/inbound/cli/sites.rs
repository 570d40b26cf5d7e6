//! Site rule listing and inspection.

use std::path::Path;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::rules::{Site, SiteRules};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Site")]
    site: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Salary Cap")]
    cap: u32,
    #[tabled(rename = "Roster")]
    roster: String,
}

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Slot")]
    label: String,
    #[tabled(rename = "Eligible")]
    eligible: String,
}

#[derive(Tabled)]
struct BoundRow {
    #[tabled(rename = "Position")]
    position: &'static str,
    #[tabled(rename = "Min")]
    min: u32,
    #[tabled(rename = "Max")]
    max: u32,
}

fn roster_summary(rules: &SiteRules) -> String {
    rules.header().join(" ")
}

/// List the built-in sites.
pub fn list() -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    if output::is_json() {
        let sites: Vec<_> = Site::BUILT_IN
            .iter()
            .filter_map(|site| site.rules().map(|rules| (site, rules)))
            .map(|(site, rules)| {
                json!({
                    "site": site.name(),
                    "name": rules.name,
                    "salary_cap": rules.salary_cap,
                    "roster": rules.header(),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "sites.list",
            "sites": sites,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Built-in sites");

    let rows: Vec<SiteRow> = Site::BUILT_IN
        .iter()
        .filter_map(|site| site.rules().map(|rules| (site, rules)))
        .map(|(site, rules)| SiteRow {
            site: site.name(),
            cap: rules.salary_cap,
            roster: roster_summary(&rules),
            name: rules.name,
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::hint(&format!(
        "run {} for details; set site = \"custom\" with a [rules] table for other sites",
        output::highlight("linestack sites show <site>")
    ));
    Ok(())
}

/// Resolve the rules of `site`, reading `[rules]` from the config for custom.
fn resolve(site: Site, config_path: &Path) -> Result<SiteRules> {
    match site.rules() {
        Some(rules) => Ok(rules),
        None => Config::load_or_default(config_path)?.rules_for(Site::Custom),
    }
}

/// Show the full rule set of one site.
pub fn show(site: Site, config_path: &Path) -> Result<()> {
    let rules = resolve(site, config_path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "sites.show",
            "site": site.name(),
            "rules": rules,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&rules.name);
    output::field("Salary cap", rules.salary_cap);
    output::field("Roster size", rules.roster_size());
    output::field("Min teams", rules.min_distinct_teams);
    output::field(
        "Max per team",
        rules
            .max_skaters_per_team
            .map_or_else(|| "none".to_string(), |max| max.to_string()),
    );
    output::field(
        "Goalie rule",
        if rules.goalie_opponent_exclusion {
            "no skaters facing the goalie"
        } else {
            "none"
        },
    );

    output::section("Roster slots");
    let slots: Vec<SlotRow> = rules
        .roster_slots
        .iter()
        .enumerate()
        .map(|(i, slot)| SlotRow {
            index: i + 1,
            label: slot.label.clone(),
            eligible: slot
                .eligible
                .iter()
                .map(|p| p.tag())
                .collect::<Vec<_>>()
                .join("/"),
        })
        .collect();
    output::lines(&Table::new(slots).to_string());

    if !rules.position_bounds.is_empty() {
        output::section("Position bounds");
        let bounds: Vec<BoundRow> = rules
            .position_bounds
            .iter()
            .map(|b| BoundRow {
                position: b.position.tag(),
                min: b.min,
                max: b.max,
            })
            .collect();
        output::lines(&Table::new(bounds).to_string());
    }

    output::section("Stacking");
    if rules.stacking.is_empty() {
        output::note("(none)");
    }
    for rule in &rules.stacking {
        output::note(&format!(
            "- at least {} line(s) with {}+ skaters from the same team line",
            rule.min_lines, rule.min_players
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_summary_lists_labels_in_order() {
        assert_eq!(
            roster_summary(&SiteRules::draftkings()),
            "C C W W W D D G UTIL"
        );
    }

    #[test]
    fn built_in_sites_resolve_without_config() {
        let rules = resolve(Site::Fanduel, Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(rules, SiteRules::fanduel());
    }

    #[test]
    fn custom_site_needs_rules_table() {
        assert!(resolve(Site::Custom, Path::new("/nonexistent/config.toml")).is_err());
    }
}
