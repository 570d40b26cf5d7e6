//! Handler for `linestack generate`.
//!
//! Loads the roster, runs the generation loop on a blocking task while a
//! Ctrl-C watcher flips the shared cancel flag, lays each lineup out on the
//! site's slots and writes the upload-ready and with-projections files.

use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Select};
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::GenerateArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::csv::{CsvLineupWriter, CsvRosterSource};
use crate::application::generator::{
    CancelFlag, GenerationReport, GenerationState, LineupGenerator,
};
use crate::domain::catalog::RosterCatalog;
use crate::domain::rules::{Site, SiteRules};
use crate::domain::slot::{FilledLineup, SlotMapper};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::solver::build_solver;
use crate::port::outbound::roster::{LineupSink, OutputMode, RosterSource};

/// Lineups shown in the summary table.
const PREVIEW_ROWS: usize = 5;

#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Projected")]
    projected: String,
    #[tabled(rename = "Salary")]
    salary: u32,
    #[tabled(rename = "Lineup")]
    players: String,
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut Config, args: &GenerateArgs) {
    if let Some(lineups) = args.lineups {
        config.optimizer.lineups = lineups;
    }
    if let Some(overlap) = args.overlap {
        config.optimizer.overlap = overlap;
    }
    if let Some(secs) = args.time_limit {
        config.optimizer.time_limit_secs = secs;
    }
    if let Some(path) = &args.output {
        config.output.path.clone_from(path);
    }
}

/// Site precedence: flag, config file, interactive prompt, DraftKings.
fn resolve_site(flag: Option<Site>, config: &Config) -> Result<Site> {
    if let Some(site) = flag.or(config.site) {
        return Ok(site);
    }
    if output::is_interactive() {
        return prompt_site(config.rules.is_some());
    }
    info!("No site given, defaulting to draftkings");
    Ok(Site::Draftkings)
}

fn prompt_site(has_custom_rules: bool) -> Result<Site> {
    let mut sites = Site::BUILT_IN.to_vec();
    if has_custom_rules {
        sites.push(Site::Custom);
    }
    let labels: Vec<String> = sites
        .iter()
        .map(|site| match site.rules() {
            Some(rules) => format!("{} ({})", rules.name, site),
            None => "Custom rules from config".to_string(),
        })
        .collect();

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select contest site")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(sites[choice])
}

/// Run the loop off the async runtime, cancelling on Ctrl-C.
async fn run_generation(
    catalog: RosterCatalog,
    rules: SiteRules,
    config: &Config,
) -> Result<(RosterCatalog, SiteRules, GenerationReport)> {
    let cancel = CancelFlag::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, stopping after the current lineup");
                cancel.cancel();
            }
        }
    });

    let solver = build_solver(&config.optimizer);
    let requested = config.optimizer.lineups;
    let overlap = config.optimizer.overlap;
    let bar = output::progress(requested as u64, "Generating lineups");
    let task_bar = bar.clone();

    let task = tokio::task::spawn_blocking(move || {
        let report = LineupGenerator::new(&catalog, &rules, solver.as_ref())
            .lineups(requested)
            .overlap(overlap)
            .cancel_flag(cancel)
            .generate_with_progress(|_, produced| task_bar.set_position(produced as u64))?;
        Ok::<_, Error>((catalog, rules, report))
    });

    let result = task.await.map_err(|err| Error::Task(err.to_string()));
    watcher.abort();

    let (catalog, rules, report) = match result {
        Ok(Ok(done)) => done,
        Ok(Err(err)) | Err(err) => {
            bar.abandon();
            return Err(err);
        }
    };

    let message = format!("{} of {} lineups", report.produced(), report.requested);
    match report.state {
        GenerationState::Complete => {
            output::progress_success(&bar, &format!("Generated {message}"));
        }
        GenerationState::Infeasible => output::progress_stopped(
            &bar,
            &format!("Stopped early: no further lineup satisfies the rules ({message})"),
        ),
        GenerationState::Cancelled => {
            output::progress_stopped(&bar, &format!("Cancelled ({message})"));
        }
        GenerationState::Running => bar.finish_and_clear(),
    }
    Ok((catalog, rules, report))
}

fn preview(filled: &[FilledLineup], report: &GenerationReport, catalog: &RosterCatalog) {
    let rows: Vec<PreviewRow> = filled
        .iter()
        .zip(report.pool.iter())
        .take(PREVIEW_ROWS)
        .enumerate()
        .map(|(i, (lineup, picked))| PreviewRow {
            index: i + 1,
            projected: format!("{:.2}", lineup.projected),
            salary: picked.salary(catalog),
            players: lineup.players.join(", "),
        })
        .collect();
    if rows.is_empty() {
        return;
    }
    output::section("Top lineups");
    output::lines(&Table::new(rows).to_string());
}

/// Execute `generate`.
pub async fn execute(args: GenerateArgs) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    apply_overrides(&mut config, &args);
    let site = resolve_site(args.site, &config)?;
    config.site = Some(site);
    config.validate()?;
    let rules = config.rules_for(site)?;

    let source = CsvRosterSource::new(&args.skaters, &args.goalies);
    let catalog = RosterCatalog::try_new(source.skaters()?, source.goalies()?)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Site", &rules.name);
    output::field("Skaters", catalog.skater_count());
    output::field("Goalies", catalog.goalie_count());
    output::field("Lineups", config.optimizer.lineups);
    output::field("Overlap", config.optimizer.overlap);

    let (catalog, rules, report) = run_generation(catalog, rules, &config).await?;

    let mapper = SlotMapper::new(&rules);
    let filled = report
        .pool
        .iter()
        .map(|lineup| mapper.fill(lineup, &catalog))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let upload_path = config.output.path.clone();
    let projections_path: PathBuf = config.output.with_projections_path();
    let header = rules.header();
    CsvLineupWriter::new(&upload_path, OutputMode::UploadReady).write(&header, &filled)?;
    CsvLineupWriter::new(&projections_path, OutputMode::WithProjections).write(&header, &filled)?;

    if output::is_json() {
        let lineups: Vec<_> = filled
            .iter()
            .map(|l| {
                json!({
                    "players": l.players,
                    "projected": format!("{:.2}", l.projected),
                    "actual": l.actual.map(|a| format!("{a:.2}")),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "generate",
            "site": site.name(),
            "state": report.state.to_string(),
            "requested": report.requested,
            "produced": report.produced(),
            "output": upload_path.display().to_string(),
            "with_projections": projections_path.display().to_string(),
            "header": header,
            "lineups": lineups,
        }));
        return Ok(());
    }

    preview(&filled, &report, &catalog);
    output::section("Output");
    output::field("Upload file", upload_path.display());
    output::field("Projections", projections_path.display());
    Ok(())
}
