//! Campaign execution: the host loop driving the scheduler.

use std::time::Instant;

use rf_coupling::{BurnupScheduler, Collaborators, StepOutcome};
use tracing::info;

use crate::error::AppResult;
use crate::progress::{CampaignProgressEvent, CampaignStage};

/// Options for campaign runs.
#[derive(Debug, Clone)]
pub struct CampaignOptions {
    /// Stop driving further steps after the first failed one. The
    /// default keeps going: a failed step is reported and the campaign
    /// moves on, matching the recoverable step-failure contract.
    pub stop_on_failure: bool,
}

impl Default for CampaignOptions {
    fn default() -> Self {
        Self {
            stop_on_failure: false,
        }
    }
}

/// Outcome of one executed burnup step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
    pub step: u32,
    pub outcome: StepOutcome,
}

/// Concise execution summary for a campaign.
#[derive(Debug, Clone, Default)]
pub struct CampaignSummary {
    pub steps_executed: u32,
    pub failures: u32,
    pub records: Vec<StepRecord>,
    pub total_time_s: f64,
}

impl CampaignSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failures == 0
    }
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(CampaignProgressEvent)>,
    event: CampaignProgressEvent,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(event);
    }
}

/// Drive the scheduler through the remaining burnup steps.
pub fn run_campaign<C: Collaborators>(
    scheduler: &mut BurnupScheduler,
    plant: &mut C,
    options: &CampaignOptions,
) -> AppResult<CampaignSummary> {
    run_campaign_with_progress(scheduler, plant, options, None)
}

/// Drive the scheduler through the remaining burnup steps, streaming
/// progress events.
///
/// One scheduler invocation per burnup step, until the step counter
/// reaches the configured maximum: a fresh scheduler starting at step 0
/// is invoked exactly `max_burn_steps` times. Every collaborator call
/// inside a step is collective and unconditional; this loop never gates
/// one on data local to a single process.
pub fn run_campaign_with_progress<C: Collaborators>(
    scheduler: &mut BurnupScheduler,
    plant: &mut C,
    options: &CampaignOptions,
    mut progress_cb: Option<&mut dyn FnMut(CampaignProgressEvent)>,
) -> AppResult<CampaignSummary> {
    let started = Instant::now();
    let max_steps = scheduler.max_burn_steps();
    let mut summary = CampaignSummary::default();

    info!(
        first_step = scheduler.burn_step(),
        max_steps, "starting burnup campaign"
    );
    emit_progress(
        &mut progress_cb,
        CampaignProgressEvent::stage(
            CampaignStage::Starting,
            scheduler.burn_step(),
            max_steps,
            0.0,
            None,
        ),
    );

    while scheduler.burn_step() < max_steps {
        let step = scheduler.burn_step();
        emit_progress(
            &mut progress_cb,
            CampaignProgressEvent::stage(
                CampaignStage::ExecutingStep,
                step,
                max_steps,
                started.elapsed().as_secs_f64(),
                None,
            ),
        );

        let outcome = scheduler.execute_step(plant);

        summary.steps_executed += 1;
        if outcome.is_failure() {
            summary.failures += 1;
        }
        summary.records.push(StepRecord { step, outcome });

        emit_progress(
            &mut progress_cb,
            CampaignProgressEvent {
                stage: CampaignStage::StepCompleted,
                step,
                max_steps,
                elapsed_wall_s: started.elapsed().as_secs_f64(),
                outcome: Some(outcome),
                message: None,
            },
        );

        if outcome.is_failure() && options.stop_on_failure {
            info!(step, "stopping campaign on first failure");
            break;
        }
    }

    summary.total_time_s = started.elapsed().as_secs_f64();
    info!(
        steps = summary.steps_executed,
        failures = summary.failures,
        "burnup campaign finished"
    );
    emit_progress(
        &mut progress_cb,
        CampaignProgressEvent::stage(
            CampaignStage::Completed,
            scheduler.burn_step(),
            max_steps,
            summary.total_time_s,
            None,
        ),
    );

    Ok(summary)
}
