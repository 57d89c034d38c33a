//! Sub-application registry and phase dispatch.

use std::collections::HashMap;

use rf_core::{FieldStore, PhaseTag};
use tracing::debug;

use crate::error::{PhysicsError, PhysicsResult};
use crate::subapp::SubApp;

/// Ordered collection of sub-applications with phase-tag dispatch.
///
/// `exec_phase` runs every application registered for a tag, optionally
/// restricted to a name list, and reports false if any of them fails to
/// solve. It is callable any number of times per burnup step and keeps
/// per-application solve counters for observability.
#[derive(Default)]
pub struct AppRegistry {
    apps: Vec<Box<dyn SubApp>>,
    solve_counts: HashMap<String, usize>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sub-application. Names must be unique.
    pub fn register(&mut self, app: Box<dyn SubApp>) -> PhysicsResult<()> {
        if self.has_app(app.name()) {
            return Err(PhysicsError::DuplicateApp {
                name: app.name().to_string(),
            });
        }
        debug!(app = app.name(), "sub-application registered");
        self.apps.push(app);
        Ok(())
    }

    pub fn has_app(&self, name: &str) -> bool {
        self.apps.iter().any(|a| a.name() == name)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn app_names(&self) -> Vec<&str> {
        self.apps.iter().map(|a| a.name()).collect()
    }

    pub fn app_fields(&self, name: &str) -> Option<&FieldStore> {
        self.apps
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.fields())
    }

    pub fn app_fields_mut(&mut self, name: &str) -> Option<&mut FieldStore> {
        self.apps
            .iter_mut()
            .find(|a| a.name() == name)
            .map(|a| a.fields_mut())
    }

    /// Number of solves dispatched to `name` so far.
    pub fn solve_count(&self, name: &str) -> usize {
        self.solve_counts.get(name).copied().unwrap_or(0)
    }

    /// Execute all applications registered for `phase`.
    ///
    /// With `only = Some(names)` the dispatch is restricted to the listed
    /// applications. Returns Ok(false) if any executed application
    /// reports solve failure; structural faults surface as errors.
    pub fn exec_phase(&mut self, phase: PhaseTag, only: Option<&[&str]>) -> PhysicsResult<bool> {
        let mut all_ok = true;
        for app in &mut self.apps {
            if !app.phases().contains(&phase) {
                continue;
            }
            if let Some(names) = only {
                if !names.contains(&app.name()) {
                    continue;
                }
            }

            debug!(app = app.name(), %phase, "dispatching phase");
            *self.solve_counts.entry(app.name().to_string()).or_insert(0) += 1;
            if !app.solve(phase)? {
                all_ok = false;
            }
        }
        Ok(all_ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::ScalarField;

    struct StubApp {
        name: String,
        phases: Vec<PhaseTag>,
        succeed: bool,
        fields: FieldStore,
    }

    impl StubApp {
        fn new(name: &str, phases: &[PhaseTag], succeed: bool) -> Box<Self> {
            let mut fields = FieldStore::new();
            let dims = rf_core::MeshDims::new(1, 1, 1).unwrap();
            fields.insert("power", ScalarField::filled(dims, 0.0));
            Box::new(Self {
                name: name.to_string(),
                phases: phases.to_vec(),
                succeed,
                fields,
            })
        }
    }

    impl SubApp for StubApp {
        fn name(&self) -> &str {
            &self.name
        }

        fn phases(&self) -> &[PhaseTag] {
            &self.phases
        }

        fn solve(&mut self, _phase: PhaseTag) -> PhysicsResult<bool> {
            Ok(self.succeed)
        }

        fn fields(&self) -> &FieldStore {
            &self.fields
        }

        fn fields_mut(&mut self) -> &mut FieldStore {
            &mut self.fields
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = AppRegistry::new();
        registry
            .register(StubApp::new("neutronics", &[PhaseTag::Neutronics], true))
            .unwrap();
        let err = registry
            .register(StubApp::new("neutronics", &[PhaseTag::Thermal], true))
            .unwrap_err();
        assert!(matches!(err, PhysicsError::DuplicateApp { .. }));
    }

    #[test]
    fn exec_phase_dispatches_by_tag() {
        let mut registry = AppRegistry::new();
        registry
            .register(StubApp::new("neutronics", &[PhaseTag::Neutronics], true))
            .unwrap();
        registry
            .register(StubApp::new("thermal", &[PhaseTag::Thermal], true))
            .unwrap();

        assert!(registry.exec_phase(PhaseTag::Thermal, None).unwrap());
        assert_eq!(registry.solve_count("thermal"), 1);
        assert_eq!(registry.solve_count("neutronics"), 0);
    }

    #[test]
    fn exec_phase_honors_name_filter() {
        let mut registry = AppRegistry::new();
        registry
            .register(StubApp::new("a", &[PhaseTag::Neutronics], true))
            .unwrap();
        registry
            .register(StubApp::new("b", &[PhaseTag::Neutronics], true))
            .unwrap();

        registry
            .exec_phase(PhaseTag::Neutronics, Some(&["b"]))
            .unwrap();
        assert_eq!(registry.solve_count("a"), 0);
        assert_eq!(registry.solve_count("b"), 1);
    }

    #[test]
    fn any_solve_failure_reports_false() {
        let mut registry = AppRegistry::new();
        registry
            .register(StubApp::new("a", &[PhaseTag::Neutronics], true))
            .unwrap();
        registry
            .register(StubApp::new("b", &[PhaseTag::Neutronics], false))
            .unwrap();

        assert!(!registry.exec_phase(PhaseTag::Neutronics, None).unwrap());
        // Both still ran; a failure does not short-circuit the phase.
        assert_eq!(registry.solve_count("a"), 1);
        assert_eq!(registry.solve_count("b"), 1);
    }
}
