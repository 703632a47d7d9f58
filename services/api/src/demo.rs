use clap::{ArgGroup, Args};
use seat_allocation::allocation::domain::{ApplicantStatus, Roster};
use seat_allocation::allocation::{
    AllocationConfig, AllocationEngine, AllocationOutcome, AllocationSummary, RosterImporter,
    TieBreak,
};
use seat_allocation::config::{AppConfig, TelemetryConfig};
use seat_allocation::error::AppError;
use seat_allocation::telemetry;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["roster", "facilities"])
))]
pub(crate) struct AllocateArgs {
    /// JSON roster snapshot with `facilities` and `applicants` arrays
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Facilities CSV export (id,name,location,capacity[,allocated])
    #[arg(long, requires = "applicants")]
    pub(crate) facilities: Option<PathBuf>,
    /// Applicants CSV export (id,name,priority_rank,preferences[,status][,assigned_facility_id])
    #[arg(long, requires = "facilities")]
    pub(crate) applicants: Option<PathBuf>,
    /// Write the resulting roster snapshot to this path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Ordering for applicants sharing a priority rank (input_order, applicant_id, reject)
    #[arg(long)]
    pub(crate) tie_break: Option<TieBreak>,
    /// Print the full outcome as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Ordering for applicants sharing a priority rank
    #[arg(long)]
    pub(crate) tie_break: Option<TieBreak>,
}

pub(crate) fn run_allocate(args: AllocateArgs) -> Result<(), AppError> {
    let AllocateArgs {
        roster,
        facilities,
        applicants,
        output,
        tie_break,
        json,
    } = args;

    let config = allocation_config(tie_break)?;
    let roster = match (roster, facilities, applicants) {
        (Some(path), _, _) => RosterImporter::from_json_path(path)?,
        (None, Some(facilities), Some(applicants)) => {
            RosterImporter::from_csv_paths(facilities, applicants)?
        }
        _ => {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "provide --roster or both --facilities and --applicants",
            )))
        }
    };

    let outcome = AllocationEngine::new(config).run(roster)?;

    if let Some(path) = output {
        let snapshot = serde_json::to_vec_pretty(&outcome.roster())?;
        fs::write(&path, snapshot)?;
        eprintln!("Wrote allocated roster to {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        render_outcome(&outcome);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = allocation_config(args.tie_break)?;
    let engine = AllocationEngine::new(config);

    println!(
        "Seat allocation demo (tie-break: {})",
        engine.config().tie_break
    );
    let first = engine.run(Roster::sample())?;
    render_outcome(&first);

    println!("\nRe-running against the published result");
    let second = engine.run(first.roster())?;
    let unchanged = second.facilities == first.facilities
        && second.applicants == first.applicants
        && second.stats == first.stats;
    println!(
        "- {} allocated | {} unallocated | {:.1}% utilization",
        second.stats.total_allocated,
        second.stats.total_unallocated,
        second.stats.capacity_utilization
    );
    println!(
        "- Outcome {} the first run",
        if unchanged { "matches" } else { "differs from" }
    );

    Ok(())
}

fn allocation_config(tie_break: Option<TieBreak>) -> Result<AllocationConfig, AppError> {
    let app_config = AppConfig::load()?;
    init_cli_telemetry(&app_config.telemetry);

    let mut config = app_config.allocation;
    if let Some(tie_break) = tie_break {
        config.tie_break = tie_break;
    }
    Ok(config)
}

fn init_cli_telemetry(config: &TelemetryConfig) {
    if let Err(err) = telemetry::init(config) {
        eprintln!("telemetry disabled: {err}");
    }
}

fn render_outcome(outcome: &AllocationOutcome) {
    let roster = outcome.roster();
    let summary = AllocationSummary::from_roster(&roster);

    println!(
        "- {} allocated | {} unallocated | {:.1}% of {} seats used",
        outcome.stats.total_allocated,
        outcome.stats.total_unallocated,
        outcome.stats.capacity_utilization,
        summary.total_capacity
    );

    println!("Facility fill:");
    for facility in &summary.facilities {
        println!(
            "  - {} ({}, {}): {}/{} seats | {} remaining{}",
            facility.name,
            facility.id,
            facility.location,
            facility.allocated,
            facility.capacity,
            facility.remaining,
            if facility.is_full { " | full" } else { "" }
        );
    }

    let mut ranked: Vec<_> = roster.applicants.iter().collect();
    ranked.sort_by_key(|applicant| applicant.priority_rank);

    println!("Applicants by priority:");
    for applicant in ranked {
        let view = applicant.to_outcome_view(&roster);
        let detail = match (&view.facility, view.preference_rank) {
            (Some(facility), Some(choice)) => format!("{} (choice #{choice})", facility.name),
            (Some(facility), None) => facility.name.clone(),
            (None, _) if view.status == ApplicantStatus::Pending => {
                "no preferences submitted".to_string()
            }
            (None, _) => "every preferred facility was full".to_string(),
        };
        println!(
            "  - #{} {} [{}]: {}",
            view.priority_rank, view.name, view.status_label, detail
        );
    }

    let breakdown = summary.status_breakdown;
    println!(
        "Status totals: {} pending | {} submitted | {} allocated | {} not allocated",
        breakdown.pending, breakdown.submitted, breakdown.allocated, breakdown.unallocated
    );
}
