//! Campaign file format: schema, validation, and YAML/JSON persistence.

use std::collections::HashSet;
use std::path::Path;

use rf_core::TransferDirection;
use rf_coupling::{CalcMode, CouplingConfig};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Latest supported campaign file version.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignFile {
    pub version: u32,
    pub name: String,
    pub scheduler: SchedulerDef,
    pub mesh: MeshDef,
    #[serde(default)]
    pub physics: PhysicsDef,
    #[serde(default)]
    pub transfers: Vec<TransferDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulerDef {
    /// 1 = neutronics only, 2 = coupled.
    pub calc_type: u32,
    #[serde(default = "default_burn_step")]
    pub burn_step: u32,
    pub max_burn_steps: u32,
    #[serde(default = "default_max_coupling_iterations")]
    pub max_coupling_iterations: u32,
    #[serde(default = "default_coupling_tolerance")]
    pub coupling_tolerance: f64,
    #[serde(default = "default_fixed_point_min_its")]
    pub fixed_point_min_its: u32,
    #[serde(default = "default_fixed_point_max_its")]
    pub fixed_point_max_its: u32,
    #[serde(default = "default_fixed_point_tol")]
    pub fixed_point_tol: f64,
    #[serde(default = "default_accept_on_max_iteration")]
    pub accept_on_max_iteration: bool,
    #[serde(default = "default_neutronics_app")]
    pub neutronics_app: String,
    #[serde(default = "default_thermal_app")]
    pub thermal_app: String,
}

fn default_burn_step() -> u32 {
    1
}

fn default_max_coupling_iterations() -> u32 {
    5
}

fn default_coupling_tolerance() -> f64 {
    1e-4
}

fn default_fixed_point_min_its() -> u32 {
    1
}

fn default_fixed_point_max_its() -> u32 {
    5
}

fn default_fixed_point_tol() -> f64 {
    1e-6
}

fn default_accept_on_max_iteration() -> bool {
    true
}

fn default_neutronics_app() -> String {
    "neutronics".to_string()
}

fn default_thermal_app() -> String {
    "thermal".to_string()
}

impl SchedulerDef {
    /// Build the validated scheduler configuration.
    pub fn to_coupling_config(&self) -> AppResult<CouplingConfig> {
        let calc_type = CalcMode::from_raw(self.calc_type)?;
        Ok(CouplingConfig {
            calc_type,
            burn_step: self.burn_step,
            max_burn_steps: self.max_burn_steps,
            max_coupling_iterations: self.max_coupling_iterations,
            coupling_tolerance: self.coupling_tolerance,
            fixed_point_min_its: self.fixed_point_min_its,
            fixed_point_max_its: self.fixed_point_max_its,
            fixed_point_tol: self.fixed_point_tol,
            accept_on_max_iteration: self.accept_on_max_iteration,
            neutronics_app: self.neutronics_app.clone(),
            thermal_app: self.thermal_app.clone(),
            transfer_groups: Default::default(),
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeshDef {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhysicsDef {
    #[serde(default = "default_rated_power_mw")]
    pub rated_power_mw: f64,
    #[serde(default = "default_initial_temperature_k")]
    pub initial_temperature_k: f64,
    #[serde(default = "default_sink_temperature_k")]
    pub sink_temperature_k: f64,
    #[serde(default = "default_thermal_resistance")]
    pub thermal_resistance_k_per_w: f64,
    #[serde(default = "default_step_length_days")]
    pub step_length_days: f64,
}

fn default_rated_power_mw() -> f64 {
    10.0
}

fn default_initial_temperature_k() -> f64 {
    560.0
}

fn default_sink_temperature_k() -> f64 {
    540.0
}

fn default_thermal_resistance() -> f64 {
    1e-4
}

fn default_step_length_days() -> f64 {
    30.0
}

impl Default for PhysicsDef {
    fn default() -> Self {
        Self {
            rated_power_mw: default_rated_power_mw(),
            initial_temperature_k: default_initial_temperature_k(),
            sink_temperature_k: default_sink_temperature_k(),
            thermal_resistance_k_per_w: default_thermal_resistance(),
            step_length_days: default_step_length_days(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferKindDef {
    Copy,
    Interpolate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferDef {
    pub name: String,
    pub group: String,
    pub direction: TransferDirection,
    /// Sub-application the transfer binds to.
    pub app: String,
    pub parent_field: String,
    pub app_field: String,
    #[serde(default = "default_transfer_kind")]
    pub kind: TransferKindDef,
}

fn default_transfer_kind() -> TransferKindDef {
    TransferKindDef::Copy
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },
}

pub fn validate_campaign(campaign: &CampaignFile) -> Result<(), ValidationError> {
    if campaign.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: campaign.version,
        });
    }

    let sched = &campaign.scheduler;
    if sched.calc_type < 1 || sched.calc_type > 2 {
        return Err(ValidationError::InvalidValue {
            field: "scheduler.calc_type".to_string(),
            value: sched.calc_type.to_string(),
            reason: "must be 1 (neutronics only) or 2 (coupled)".to_string(),
        });
    }
    if sched.burn_step > sched.max_burn_steps {
        return Err(ValidationError::InvalidValue {
            field: "scheduler.burn_step".to_string(),
            value: sched.burn_step.to_string(),
            reason: format!("cannot exceed max_burn_steps ({})", sched.max_burn_steps),
        });
    }
    if sched.max_coupling_iterations == 0 {
        return Err(ValidationError::InvalidValue {
            field: "scheduler.max_coupling_iterations".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if !(sched.coupling_tolerance > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: "scheduler.coupling_tolerance".to_string(),
            value: sched.coupling_tolerance.to_string(),
            reason: "must be positive".to_string(),
        });
    }

    if campaign.mesh.nx == 0 || campaign.mesh.ny == 0 || campaign.mesh.nz == 0 {
        return Err(ValidationError::InvalidValue {
            field: "mesh".to_string(),
            value: format!(
                "{}x{}x{}",
                campaign.mesh.nx, campaign.mesh.ny, campaign.mesh.nz
            ),
            reason: "mesh dimensions must be nonzero".to_string(),
        });
    }

    if !(campaign.physics.rated_power_mw > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: "physics.rated_power_mw".to_string(),
            value: campaign.physics.rated_power_mw.to_string(),
            reason: "must be positive".to_string(),
        });
    }

    let mut transfer_names = HashSet::new();
    for transfer in &campaign.transfers {
        if !transfer_names.insert(&transfer.name) {
            return Err(ValidationError::DuplicateId {
                id: transfer.name.clone(),
                context: "transfers".to_string(),
            });
        }
        if transfer.app != sched.neutronics_app && transfer.app != sched.thermal_app {
            return Err(ValidationError::MissingReference {
                id: transfer.app.clone(),
                context: format!("transfer '{}' app", transfer.name),
            });
        }
    }

    Ok(())
}

pub fn load_yaml(path: &Path) -> AppResult<CampaignFile> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::CampaignFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let campaign: CampaignFile = serde_yaml::from_str(&content)?;
    validate_campaign(&campaign)?;
    Ok(campaign)
}

pub fn save_yaml(path: &Path, campaign: &CampaignFile) -> AppResult<()> {
    validate_campaign(campaign)?;
    let content = serde_yaml::to_string(campaign)?;
    std::fs::write(path, content).map_err(|source| AppError::CampaignFileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

pub fn load_json(path: &Path) -> AppResult<CampaignFile> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::CampaignFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let campaign: CampaignFile = serde_json::from_str(&content)?;
    validate_campaign(&campaign)?;
    Ok(campaign)
}

pub fn save_json(path: &Path, campaign: &CampaignFile) -> AppResult<()> {
    validate_campaign(campaign)?;
    let content = serde_json::to_string_pretty(campaign)?;
    std::fs::write(path, content).map_err(|source| AppError::CampaignFileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_yaml() -> &'static str {
        r#"
version: 1
name: demo
scheduler:
  calc_type: 2
  max_burn_steps: 3
mesh:
  nx: 4
  ny: 4
  nz: 4
"#
    }

    #[test]
    fn minimal_campaign_parses_with_defaults() {
        let campaign: CampaignFile = serde_yaml::from_str(minimal_yaml()).unwrap();
        validate_campaign(&campaign).unwrap();
        assert_eq!(campaign.scheduler.burn_step, 1);
        assert_eq!(campaign.scheduler.max_coupling_iterations, 5);
        assert_eq!(campaign.scheduler.neutronics_app, "neutronics");
        assert_eq!(campaign.physics.rated_power_mw, 10.0);
    }

    #[test]
    fn calc_type_out_of_range_fails_validation() {
        let mut campaign: CampaignFile = serde_yaml::from_str(minimal_yaml()).unwrap();
        campaign.scheduler.calc_type = 3;
        assert!(matches!(
            validate_campaign(&campaign),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn burn_step_past_max_fails_validation() {
        let mut campaign: CampaignFile = serde_yaml::from_str(minimal_yaml()).unwrap();
        campaign.scheduler.burn_step = 4;
        assert!(validate_campaign(&campaign).is_err());
    }

    #[test]
    fn transfer_referencing_unknown_app_fails_validation() {
        let mut campaign: CampaignFile = serde_yaml::from_str(minimal_yaml()).unwrap();
        campaign.transfers.push(TransferDef {
            name: "t".to_string(),
            group: "to_thermal".to_string(),
            direction: TransferDirection::ToSubApp,
            app: "mystery".to_string(),
            parent_field: "power".to_string(),
            app_field: "power".to_string(),
            kind: TransferKindDef::Copy,
        });
        assert!(matches!(
            validate_campaign(&campaign),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn yaml_round_trip_preserves_campaign() {
        let campaign: CampaignFile = serde_yaml::from_str(minimal_yaml()).unwrap();
        let text = serde_yaml::to_string(&campaign).unwrap();
        let reparsed: CampaignFile = serde_yaml::from_str(&text).unwrap();
        assert_eq!(campaign, reparsed);
    }
}
