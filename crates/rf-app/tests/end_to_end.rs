//! End-to-end campaign over the real runtime and demo kernels.

use rf_core::{PhaseTag, TransferDirection};
use rf_coupling::{BurnupScheduler, StepOutcome, TransferRunner};
use rf_app::{
    run_campaign, CampaignFile, CampaignOptions, CouplingRuntime, MeshDef, PhysicsDef,
    SchedulerDef, TransferDef, TransferKindDef,
};

fn campaign_file() -> CampaignFile {
    CampaignFile {
        version: 1,
        name: "coupled-demo".to_string(),
        scheduler: SchedulerDef {
            calc_type: 2,
            burn_step: 0,
            max_burn_steps: 3,
            max_coupling_iterations: 2,
            coupling_tolerance: 1e-4,
            fixed_point_min_its: 1,
            fixed_point_max_its: 5,
            fixed_point_tol: 1e-6,
            accept_on_max_iteration: true,
            neutronics_app: "neutronics".to_string(),
            thermal_app: "thermal".to_string(),
        },
        mesh: MeshDef { nx: 4, ny: 4, nz: 4 },
        physics: PhysicsDef::default(),
        transfers: vec![
            TransferDef {
                name: "power_to_parent".to_string(),
                group: "from_neutronics".to_string(),
                direction: TransferDirection::FromSubApp,
                app: "neutronics".to_string(),
                parent_field: "power".to_string(),
                app_field: "power".to_string(),
                kind: TransferKindDef::Copy,
            },
            TransferDef {
                name: "power_to_thermal".to_string(),
                group: "to_thermal".to_string(),
                direction: TransferDirection::ToSubApp,
                app: "thermal".to_string(),
                parent_field: "power".to_string(),
                app_field: "power".to_string(),
                kind: TransferKindDef::Copy,
            },
            TransferDef {
                name: "temperature_to_parent".to_string(),
                group: "from_thermal".to_string(),
                direction: TransferDirection::FromSubApp,
                app: "thermal".to_string(),
                parent_field: "temperature".to_string(),
                app_field: "temperature".to_string(),
                kind: TransferKindDef::Copy,
            },
            TransferDef {
                name: "temperature_to_neutronics".to_string(),
                group: "to_neutronics".to_string(),
                direction: TransferDirection::ToSubApp,
                app: "neutronics".to_string(),
                parent_field: "temperature".to_string(),
                app_field: "temperature".to_string(),
                kind: TransferKindDef::Copy,
            },
        ],
    }
}

#[test]
fn three_step_coupled_campaign() {
    let file = campaign_file();
    let mut runtime = CouplingRuntime::from_campaign(&file).expect("runtime should build");
    let config = file
        .scheduler
        .to_coupling_config()
        .expect("scheduler config should parse");
    let mut scheduler = BurnupScheduler::new(config).expect("config should validate");

    let summary = run_campaign(&mut scheduler, &mut runtime, &CampaignOptions::default())
        .expect("campaign should run");

    assert_eq!(summary.steps_executed, 3);
    assert!(summary.all_succeeded());

    let outcomes: Vec<StepOutcome> = summary.records.iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            StepOutcome::Success,
            StepOutcome::Success,
            StepOutcome::MaxIterations { accepted: true },
        ]
    );

    // Step 1 runs the corrected transport solve once; step 2 runs two
    // full neutronics/thermal pairs.
    assert_eq!(runtime.phase_call_count(PhaseTag::CorrectedNeutronics), 1);
    assert_eq!(runtime.phase_call_count(PhaseTag::Neutronics), 2);
    assert_eq!(runtime.phase_call_count(PhaseTag::Thermal), 3);

    assert_eq!(scheduler.burn_step(), 3);

    // Three thermal solves leave the convergence history primed.
    assert!(runtime.convergence().is_primed());
    assert!(runtime.convergence().relative_change() < 1.0);
}

#[test]
fn power_pull_transfer_moves_solved_field_to_parent() {
    let file = campaign_file();
    let mut runtime = CouplingRuntime::from_campaign(&file).unwrap();
    let config = file.scheduler.to_coupling_config().unwrap();
    let mut scheduler = BurnupScheduler::new(config).unwrap();

    run_campaign(&mut scheduler, &mut runtime, &CampaignOptions::default()).unwrap();

    // The parent power field is untouched until the pull group is
    // explicitly enabled.
    let before: f64 = runtime
        .parent_fields()
        .get("power")
        .unwrap()
        .values()
        .iter()
        .sum();
    assert_eq!(before, 0.0);

    runtime
        .run_transfer("from_neutronics", TransferDirection::FromSubApp, true)
        .expect("pull transfer should run");

    let after: f64 = runtime
        .parent_fields()
        .get("power")
        .unwrap()
        .values()
        .iter()
        .sum();
    // Rated power from the default physics definition (10 MW).
    assert!((after - 1.0e7).abs() < 1.0);
}

#[test]
fn neutronics_only_campaign_never_runs_thermal() {
    let mut file = campaign_file();
    file.scheduler.calc_type = 1;
    let mut runtime = CouplingRuntime::from_campaign(&file).unwrap();
    let config = file.scheduler.to_coupling_config().unwrap();
    let mut scheduler = BurnupScheduler::new(config).unwrap();

    let summary = run_campaign(&mut scheduler, &mut runtime, &CampaignOptions::default()).unwrap();

    assert!(summary.all_succeeded());
    assert_eq!(runtime.phase_call_count(PhaseTag::Neutronics), 1);
    assert_eq!(runtime.phase_call_count(PhaseTag::CorrectedNeutronics), 1);
    assert_eq!(runtime.phase_call_count(PhaseTag::Thermal), 0);
}
