use rf_coupling::StepOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignStage {
    Starting,
    ExecutingStep,
    StepCompleted,
    Completed,
}

/// Progress event streamed to frontends during campaign execution.
#[derive(Debug, Clone)]
pub struct CampaignProgressEvent {
    pub stage: CampaignStage,
    /// Burnup step the event refers to.
    pub step: u32,
    pub max_steps: u32,
    pub elapsed_wall_s: f64,
    /// Present on StepCompleted events.
    pub outcome: Option<StepOutcome>,
    pub message: Option<String>,
}

impl CampaignProgressEvent {
    pub fn stage(
        stage: CampaignStage,
        step: u32,
        max_steps: u32,
        elapsed_wall_s: f64,
        message: Option<String>,
    ) -> Self {
        Self {
            stage,
            step,
            max_steps,
            elapsed_wall_s,
            outcome: None,
            message,
        }
    }
}
