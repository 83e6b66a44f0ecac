use anyhow::Result;

use crate::compose::{compose, Chart};
use crate::config::AppConfig;
use crate::cursor::{CursorBoard, Reconciled, Trigger};
use crate::data::registry::CaseRegistry;
use crate::data::source::SpectrumStore;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every interaction goes through one dispatch method which runs a single
/// synchronous pass: cursor reconciliation, then recomposition of the chart.
pub struct AppState {
    /// Cases available for selection.
    pub registry: CaseRegistry,

    /// Checked case ids, in the order they were checked.
    pub selection: Vec<String>,

    /// Slider and numeric-entry values of every cursor.
    pub cursors: CursorBoard,

    /// Where spectra are read from.
    pub store: SpectrumStore,

    /// Result of the last recomposition.
    pub chart: Chart,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let config = AppConfig::default();
        Self::with_registry(&config, CaseRegistry::reference())
    }
}

impl AppState {
    /// Build the state for a configuration and run the first pass.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let registry = config.registry()?;
        Ok(Self::with_registry(config, registry))
    }

    fn with_registry(config: &AppConfig, registry: CaseRegistry) -> Self {
        let mut state = Self {
            registry,
            selection: config.initial_selection(),
            cursors: CursorBoard::default(),
            store: SpectrumStore::new(config.data_dir.clone(), config.cache_spectra),
            chart: Chart::default(),
            status_message: None,
        };
        state.dispatch(Trigger::SliderChanged);
        state
    }

    /// Swap in a new configuration, keeping the current state if it is
    /// invalid.
    pub fn replace_config(&mut self, config: &AppConfig) -> Result<()> {
        *self = Self::from_config(config)?;
        Ok(())
    }

    pub fn is_selected(&self, case_id: &str) -> bool {
        self.selection.iter().any(|id| id == case_id)
    }

    /// Check or uncheck a case. Checking appends it to the selection.
    pub fn toggle_case(&mut self, case_id: &str) {
        if self.is_selected(case_id) {
            self.selection.retain(|id| id != case_id);
        } else if self.registry.contains(case_id) {
            self.selection.push(case_id.to_string());
        } else {
            return;
        }
        log::debug!("Selection is now {:?}", self.selection);
        // Fresh controls report their slider values, as after a slider move.
        self.dispatch(Trigger::SliderChanged);
    }

    /// Run one reconciliation + recomposition pass for `trigger`.
    pub fn dispatch(&mut self, trigger: Trigger) -> Reconciled {
        let reconciled = self.cursors.reconcile(&self.selection, trigger);
        self.recompose(&reconciled.sliders);
        reconciled
    }

    fn recompose(&mut self, cursors: &[f64]) {
        self.chart = compose(&self.selection, cursors, &self.registry, &mut self.store);
    }

    /// A click on the chart at plot x-coordinate `x`, snapped to the nearest
    /// drawn sample. Returns `None` when nothing is drawn to click on.
    pub fn chart_click_wavelength(&self, x: f64) -> Option<f64> {
        self.chart.snap_click(x)
    }

    pub fn set_caching(&mut self, on: bool) {
        self.store.set_caching(on);
        log::info!("Spectrum cache {}", if on { "enabled" } else { "disabled" });
    }
}
