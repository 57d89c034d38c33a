use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use rf_app::{
    load_json, load_yaml, run_campaign_with_progress, AppError, AppResult, CampaignFile,
    CampaignOptions, CampaignProgressEvent, CampaignStage, CouplingRuntime,
};
use rf_coupling::{BurnupScheduler, StepOutcome};

#[derive(Parser)]
#[command(name = "rf-cli")]
#[command(about = "ReactorFlow CLI - burnup coupling campaign driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate campaign file syntax and structure
    Validate {
        /// Path to the campaign YAML or JSON file
        campaign_path: PathBuf,
    },
    /// Show the scheduler and transfer summary of a campaign
    Show {
        /// Path to the campaign YAML or JSON file
        campaign_path: PathBuf,
    },
    /// Run a burnup campaign with the built-in demo kernels
    Run {
        /// Path to the campaign YAML or JSON file
        campaign_path: PathBuf,
        /// Override the calculation type (1=neutronics only, 2=coupled)
        #[arg(long)]
        calc_type: Option<u32>,
        /// Stop at the first failed step
        #[arg(long)]
        stop_on_failure: bool,
        /// Suppress per-step progress output
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { campaign_path } => cmd_validate(&campaign_path),
        Commands::Show { campaign_path } => cmd_show(&campaign_path),
        Commands::Run {
            campaign_path,
            calc_type,
            stop_on_failure,
            quiet,
        } => cmd_run(&campaign_path, calc_type, stop_on_failure, quiet),
    }
}

fn load_campaign(path: &Path) -> AppResult<CampaignFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

fn cmd_validate(campaign_path: &Path) -> AppResult<()> {
    println!("Validating campaign: {}", campaign_path.display());
    load_campaign(campaign_path)?;
    println!("✓ Campaign is valid");
    Ok(())
}

fn cmd_show(campaign_path: &Path) -> AppResult<()> {
    let campaign = load_campaign(campaign_path)?;
    let sched = &campaign.scheduler;

    println!("Campaign: {} (version {})", campaign.name, campaign.version);
    println!(
        "  Calculation type: {}",
        if sched.calc_type == 1 {
            "neutronics only"
        } else {
            "coupled neutronics-thermal"
        }
    );
    println!(
        "  Burnup steps: {} -> {} ({} days each)",
        sched.burn_step, sched.max_burn_steps, campaign.physics.step_length_days
    );
    println!(
        "  Coupling: up to {} iterations, tolerance {:.1e}",
        sched.max_coupling_iterations, sched.coupling_tolerance
    );
    println!(
        "  Sub-applications: {} / {}",
        sched.neutronics_app, sched.thermal_app
    );
    println!(
        "  Mesh: {}x{}x{}",
        campaign.mesh.nx, campaign.mesh.ny, campaign.mesh.nz
    );

    if campaign.transfers.is_empty() {
        println!("  No transfers declared");
    } else {
        println!("  Transfers:");
        for t in &campaign.transfers {
            println!(
                "    {} [{}] {} {} ({} <-> {})",
                t.name, t.group, t.direction, t.app, t.parent_field, t.app_field
            );
        }
    }
    Ok(())
}

fn outcome_label(outcome: StepOutcome) -> &'static str {
    match outcome {
        StepOutcome::Success => "success",
        StepOutcome::MaxIterations { accepted: true } => "max iterations (accepted)",
        StepOutcome::MaxIterations { accepted: false } => "max iterations (warning)",
        StepOutcome::Failed => "FAILED",
    }
}

fn cmd_run(
    campaign_path: &Path,
    calc_type: Option<u32>,
    stop_on_failure: bool,
    quiet: bool,
) -> AppResult<()> {
    let mut campaign = load_campaign(campaign_path)?;
    if let Some(raw) = calc_type {
        campaign.scheduler.calc_type = raw;
    }

    println!("Running campaign: {}", campaign.name);

    let mut runtime = CouplingRuntime::from_campaign(&campaign)?;
    let config = campaign.scheduler.to_coupling_config()?;
    let mut scheduler = BurnupScheduler::new(config)?;

    let options = CampaignOptions { stop_on_failure };
    let mut render = |event: CampaignProgressEvent| {
        if quiet {
            return;
        }
        if event.stage == CampaignStage::StepCompleted {
            let label = event.outcome.map(outcome_label).unwrap_or("unknown");
            println!(
                "  step {}/{}: {} ({:.2}s elapsed)",
                event.step, event.max_steps, label, event.elapsed_wall_s
            );
        }
    };

    let summary =
        run_campaign_with_progress(&mut scheduler, &mut runtime, &options, Some(&mut render))?;

    println!(
        "✓ Campaign finished: {} steps in {:.2}s",
        summary.steps_executed, summary.total_time_s
    );
    if runtime.convergence().is_primed() {
        println!(
            "  Final temperature change between iterations: {:.3e}",
            runtime.convergence().relative_change()
        );
    }

    if !summary.all_succeeded() {
        return Err(AppError::Campaign(format!(
            "{} of {} steps failed",
            summary.failures, summary.steps_executed
        )));
    }
    Ok(())
}
