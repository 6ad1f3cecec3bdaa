//! Command dispatch and handlers

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveTime};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_dir, global_config_path, local_config_path, Settings};
use crate::domain::{
    CalculationMode, EffortOutcome, RiskLevel, SessionTimes, SurveillanceEffortEstimate,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;

/// Run the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given (try `mangosurv --help`)".to_string(),
        ));
    };

    let farm_dir = farm_dir(cli)?;
    match command {
        Commands::Config { command } => config_command(command, &farm_dir),
        // handled in main before logging is set up
        Commands::Completion { .. } => Ok(()),
        command => {
            let settings = load_settings(cli, &farm_dir)?;
            run(&ServiceContainer::new(settings), command)
        }
    }
}

fn run(container: &ServiceContainer, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Estimate {
            grower,
            quick,
            frequency,
            toml,
        } => estimate(container, grower, *quick, *frequency, *toml),
        Commands::Stocking { grower } => stocking(container, grower),
        Commands::Plan { grower, locations } => plan(container, grower, locations),
        Commands::Session {
            grower,
            location,
            start,
            end,
            date,
        } => session(container, grower, location, *start, *end, *date),
        Commands::Check { grower } => check(container, grower),
        Commands::Growers => growers(container),
        Commands::Threats => threats(container),
        Commands::Risk {
            threat,
            pest,
            disease,
        } => risk(container, threat.as_deref(), *pest, *disease),
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

fn farm_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.farm_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("current directory", e))),
    }
}

/// Layered settings, with command line flags applied last.
fn load_settings(cli: &Cli, farm_dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(farm_dir))?;
    if let Some(inventory) = &cli.inventory {
        settings.inventory = inventory.clone();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(container))]
fn estimate(
    container: &ServiceContainer,
    grower: &str,
    quick: bool,
    frequency: Option<u32>,
    as_toml: bool,
) -> CliResult<()> {
    let mut service = container.estimate_service();
    if quick {
        service = service.with_mode(CalculationMode::Quick);
    }
    if frequency.is_some() {
        service = service.with_frequency_override(frequency);
    }

    let outcome = service.compute_surveillance_estimate(grower)?;
    if as_toml {
        let rendered = toml::to_string_pretty(&outcome).map_err(|e| InfraError::Serialize {
            message: e.to_string(),
        })?;
        output::info(&rendered);
        return Ok(());
    }

    match outcome {
        EffortOutcome::NoData => {
            output::warning(&format!(
                "no trees recorded for {grower}; add a tree to see your estimate"
            ));
        }
        EffortOutcome::Estimate(estimate) => print_estimate(&estimate),
    }
    Ok(())
}

fn print_estimate(estimate: &SurveillanceEffortEstimate) {
    output::header(&format!(
        "Surveillance estimate for {} ({} mode)",
        estimate.grower_id, estimate.mode
    ));
    output::field("Trees", &estimate.total_trees);
    output::field("Locations", &estimate.locations.len());
    output::field(
        "Time per session",
        &format!("{:.2} h ({:.0} min)", estimate.total_hours, estimate.total_minutes),
    );
    output::field(
        "Frequency",
        &format!("every {} days", estimate.frequency_days),
    );
    output::field("Monthly effort", &format!("{:.1} h", estimate.monthly_effort_hours));
    output::field("Sessions per year", &estimate.annual_sessions);

    output::header("Breakdown");
    for location in &estimate.locations {
        let rate = location
            .stocking_rate
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1} trees/ha"));
        output::detail(&format!(
            "{:<20} {:>4} trees  {:>7.1} min  (x{:.1}, {})",
            location.location_name,
            location.tree_count,
            location.adjusted_minutes,
            location.stocking_multiplier,
            rate
        ));
    }
    output::detail(&format!(
        "{:<20} {:>18.1} min",
        "travel", estimate.travel_minutes
    ));
    output::detail(&format!(
        "{:<20} {:>18.1} min",
        "documentation", estimate.documentation_minutes
    ));

    for name in estimate.invalid_area_locations() {
        output::warning(&format!(
            "{name}: area must be greater than 0; stocking rate ignored"
        ));
    }
}

#[instrument(skip(container))]
fn stocking(container: &ServiceContainer, grower: &str) -> CliResult<()> {
    let report = container.estimate_service().stocking_report(grower)?;
    if report.is_empty() {
        output::info("No location has both trees and a valid area.");
        return Ok(());
    }
    output::header(&format!("Stocking density for {grower}"));
    for row in report {
        output::detail(&format!(
            "{:<20} {:>7.1} trees/ha  {:<18} {}",
            row.location_name, row.rate, row.classification, row.impact_description
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn plan(container: &ServiceContainer, grower: &str, locations: &[String]) -> CliResult<()> {
    let plan = container.estimate_service().plan_session(grower, locations)?;
    let Some(effort) = &plan.effort else {
        output::warning("no trees in the selected locations; add a tree to see your estimate");
        return Ok(());
    };

    output::header(&format!("Session plan for {}", plan.grower_id));
    output::field("Trees", &effort.tree_count);
    output::field("Estimated time", &format!("{:.2} h", effort.total_hours));
    output::field(
        "Average per tree",
        &format!("{:.1} min", effort.average_minutes_per_tree),
    );
    for location in &plan.locations {
        output::header(&location.location_name);
        for inspection in &location.inspections {
            output::detail(&format!(
                "{:<12} {:<18} {:<12} {:<10} {:>5.1} min",
                inspection.tree_id,
                inspection.variety.label(),
                inspection.age_group.label(),
                inspection.health_status.label(),
                inspection.minutes
            ));
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn session(
    container: &ServiceContainer,
    grower: &str,
    location: &str,
    start: NaiveTime,
    end: NaiveTime,
    date: Option<NaiveDate>,
) -> CliResult<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let times = SessionTimes::new(date, start, end).map_err(ApplicationError::from)?;
    let review = container
        .estimate_service()
        .review_session(grower, location, times)?;

    output::header(&format!("Session at {} on {}", review.location_name, date));
    output::field("Actual", &format!("{} min", review.actual_minutes));
    match (review.expected_minutes, review.variance_minutes()) {
        (Some(expected), Some(variance)) => {
            output::field("Expected", &format!("{expected:.1} min"));
            output::field("Variance", &format!("{variance:+.1} min"));
        }
        _ => output::field("Expected", &"- (no trees recorded)"),
    }
    Ok(())
}

#[instrument(skip(container))]
fn check(container: &ServiceContainer, grower: &str) -> CliResult<()> {
    let issues = container.inventory_service().check(grower)?;
    if issues.is_empty() {
        output::success(&format!("{grower}: inventory looks good"));
        return Ok(());
    }
    output::header(&format!("{} issue(s) for {grower}", issues.len()));
    for issue in &issues {
        output::failure(issue);
    }
    Ok(())
}

#[instrument(skip(container))]
fn growers(container: &ServiceContainer) -> CliResult<()> {
    for grower in container.inventory_service().growers()? {
        output::detail(&format!(
            "{:<16} {:<28} {:>5} trees",
            grower.id, grower.name, grower.tree_count
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn threats(container: &ServiceContainer) -> CliResult<()> {
    let threats = container.inventory_service().threats()?;
    if threats.is_empty() {
        output::info("Threat catalogue is empty.");
        return Ok(());
    }
    for threat in threats {
        output::info(&format!(
            "{:<28} {:<8} {:<10} {}",
            threat.slug(),
            format!("{:?}", threat.threat_type).to_lowercase(),
            output::risk(threat.risk_level),
            threat.name
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn risk(
    container: &ServiceContainer,
    threat: Option<&str>,
    pest: Option<RiskLevel>,
    disease: Option<RiskLevel>,
) -> CliResult<()> {
    if threat.is_none() && pest.is_none() && disease.is_none() {
        return Err(CliError::InvalidArgs(
            "give --threat, --pest or --disease".to_string(),
        ));
    }
    let level = container
        .inventory_service()
        .assess_risk(threat, pest, disease)?;
    output::action("Risk", &output::risk(level));
    Ok(())
}

#[instrument]
fn config_command(command: &ConfigCommands, farm_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(farm_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(farm_dir)
            };
            write_config_template(&RealFileSystem, &path)?;
            output::action("Created", &path.display());
        }
        ConfigCommands::Path => {
            match global_config_dir() {
                Some(dir) => {
                    output::info(&format!("global: {}", dir.join("mangosurv.toml").display()))
                }
                None => output::info("global: (unavailable)"),
            }
            output::info(&format!("local:  {}", local_config_path(farm_dir).display()));
        }
    }
    Ok(())
}

/// Write the settings template to `path`, refusing to overwrite.
fn write_config_template(fs: &dyn FileSystem, path: &Path) -> CliResult<()> {
    if fs.exists(path) {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            path.display()
        )));
    }
    fs.ensure_parent(path)
        .and_then(|()| fs.write(path, &Settings::template()))
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}
