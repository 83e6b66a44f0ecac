use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Cursor domain
// ---------------------------------------------------------------------------

pub const WAVELENGTH_MIN: f64 = 450.0;
pub const WAVELENGTH_MAX: f64 = 700.0;
/// Slider resolution in nm.
pub const CURSOR_STEP: f64 = 0.1;

/// Which of the two cursors of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::One, Slot::Two];

    pub fn number(self) -> u8 {
        match self {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }

    /// Position a freshly created cursor starts at.
    pub fn default_wavelength(self) -> f64 {
        match self {
            Slot::One => 462.7,
            Slot::Two => 560.0,
        }
    }
}

/// Composite key of one cursor: (case id, slot).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorKey {
    pub case: String,
    pub slot: Slot,
}

impl CursorKey {
    pub fn new(case: &str, slot: Slot) -> Self {
        CursorKey {
            case: case.to_string(),
            slot,
        }
    }
}

/// Flat cursor ordering for a selection: case `i` owns positions `2i`, `2i+1`.
pub fn flat_keys(selection: &[String]) -> Vec<CursorKey> {
    selection
        .iter()
        .flat_map(|case| Slot::BOTH.map(|slot| CursorKey::new(case, slot)))
        .collect()
}

pub fn clamp_wavelength(w: f64) -> f64 {
    w.clamp(WAVELENGTH_MIN, WAVELENGTH_MAX)
}

/// Round to the slider grid, avoiding `462.70000000000005`-style drift.
pub fn snap_to_step(w: f64) -> f64 {
    clamp_wavelength((w / CURSOR_STEP).round() / (1.0 / CURSOR_STEP))
}

/// Accept a numeric-entry string only if it is a finite wavelength in range.
pub fn parse_entry(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (WAVELENGTH_MIN..=WAVELENGTH_MAX).contains(v))
}

/// Text shown in a numeric entry for `w` (`462.7`, `560`).
pub fn format_entry(w: f64) -> String {
    format!("{w}")
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// What started a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    SliderChanged,
    InputChanged,
    ChartClicked { wavelength: f64 },
}

impl Trigger {
    /// Collapse the interactions seen during one frame into one trigger.
    ///
    /// A single kind maps to itself; several kinds at once fall back to
    /// [`Trigger::SliderChanged`].
    pub fn from_frame(slider: bool, input: bool, click: Option<f64>) -> Option<Trigger> {
        match (slider, input, click) {
            (false, false, None) => None,
            (false, false, Some(wavelength)) => Some(Trigger::ChartClicked { wavelength }),
            (false, true, None) => Some(Trigger::InputChanged),
            _ => Some(Trigger::SliderChanged),
        }
    }
}

// ---------------------------------------------------------------------------
// CursorBoard – both widget representations of every cursor
// ---------------------------------------------------------------------------

/// Values produced by one reconciliation pass, aligned to [`flat_keys`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub sliders: Vec<f64>,
    pub inputs: Vec<f64>,
}

/// Slider values, numeric-entry values and the entry text buffers, keyed by
/// [`CursorKey`].
///
/// Widgets write into their own representation; [`CursorBoard::reconcile`]
/// then makes one side authoritative and copies it over the other.
#[derive(Debug, Clone, Default)]
pub struct CursorBoard {
    sliders: BTreeMap<CursorKey, f64>,
    inputs: BTreeMap<CursorKey, f64>,
    entry_text: BTreeMap<CursorKey, String>,
}

impl CursorBoard {
    /// Create default cursors for newly selected cases and drop the cursors
    /// of deselected ones. Surviving cursors keep their values.
    pub fn sync_selection(&mut self, selection: &[String]) {
        let keys = flat_keys(selection);
        self.sliders.retain(|k, _| keys.contains(k));
        self.inputs.retain(|k, _| keys.contains(k));
        self.entry_text.retain(|k, _| keys.contains(k));

        for key in keys {
            if !self.sliders.contains_key(&key) {
                let w = key.slot.default_wavelength();
                self.sliders.insert(key.clone(), w);
                self.inputs.insert(key.clone(), w);
                self.entry_text.insert(key, format_entry(w));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    pub fn slider(&self, key: &CursorKey) -> Option<f64> {
        self.sliders.get(key).copied()
    }

    pub fn input(&self, key: &CursorKey) -> Option<f64> {
        self.inputs.get(key).copied()
    }

    /// Mutable slider value, for binding to a slider widget.
    pub fn slider_mut(&mut self, key: &CursorKey) -> Option<&mut f64> {
        self.sliders.get_mut(key)
    }

    /// Mutable entry text, for binding to a text field.
    pub fn entry_text_mut(&mut self, key: &CursorKey) -> Option<&mut String> {
        self.entry_text.get_mut(key)
    }

    /// Take the current entry text for `key` as a numeric entry.
    ///
    /// Returns `true` when the text parsed to a valid wavelength and the entry
    /// value changed. Malformed text leaves the last valid value in place.
    pub fn commit_entry(&mut self, key: &CursorKey) -> bool {
        let Some(parsed) = self.entry_text.get(key).and_then(|t| parse_entry(t)) else {
            return false;
        };
        match self.inputs.get_mut(key) {
            Some(v) if *v != parsed => {
                *v = parsed;
                true
            }
            _ => false,
        }
    }

    /// Put the entry text for `key` back in line with its value, e.g. after
    /// the field loses focus holding something unparseable.
    pub fn restore_entry_text(&mut self, key: &CursorKey) {
        if let (Some(v), Some(text)) = (self.inputs.get(key), self.entry_text.get_mut(key)) {
            if parse_entry(text) != Some(*v) {
                *text = format_entry(*v);
            }
        }
    }

    /// The (cursor 1, cursor 2) pair of a case, from the slider side.
    pub fn pair(&self, case: &str) -> Option<(f64, f64)> {
        let c1 = self.slider(&CursorKey::new(case, Slot::One))?;
        let c2 = self.slider(&CursorKey::new(case, Slot::Two))?;
        Some((c1, c2))
    }

    /// One reconciliation pass.
    ///
    /// * `ChartClicked`: every cursor of every selected case takes the clicked
    ///   wavelength (clamped to the cursor domain).
    /// * `InputChanged`: entry values are copied onto the sliders.
    /// * `SliderChanged`: slider values are copied onto the entries.
    ///
    /// Afterwards both representations hold identical values.
    pub fn reconcile(&mut self, selection: &[String], trigger: Trigger) -> Reconciled {
        self.sync_selection(selection);
        let keys = flat_keys(selection);

        match trigger {
            Trigger::ChartClicked { wavelength } => {
                let w = clamp_wavelength(wavelength);
                for key in &keys {
                    self.sliders.insert(key.clone(), w);
                    self.inputs.insert(key.clone(), w);
                    self.entry_text.insert(key.clone(), format_entry(w));
                }
            }
            Trigger::InputChanged => {
                for key in &keys {
                    if let Some(&v) = self.inputs.get(key) {
                        self.sliders.insert(key.clone(), v);
                    }
                }
            }
            Trigger::SliderChanged => {
                for key in &keys {
                    if let Some(&v) = self.sliders.get(key) {
                        self.inputs.insert(key.clone(), v);
                        self.entry_text.insert(key.clone(), format_entry(v));
                    }
                }
            }
        }

        let sliders: Vec<f64> = keys.iter().filter_map(|k| self.slider(k)).collect();
        let inputs: Vec<f64> = keys.iter().filter_map(|k| self.input(k)).collect();
        log::debug!("Reconciled {} cursors on {trigger:?}", sliders.len());
        Reconciled { sliders, inputs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flat_keys_positional_mapping() {
        let keys = flat_keys(&selection(&["Case 2", "Blank"]));
        assert_eq!(
            keys,
            vec![
                CursorKey::new("Case 2", Slot::One),
                CursorKey::new("Case 2", Slot::Two),
                CursorKey::new("Blank", Slot::One),
                CursorKey::new("Blank", Slot::Two),
            ]
        );
    }

    #[test]
    fn test_new_cases_get_default_cursors() {
        let mut board = CursorBoard::default();
        board.sync_selection(&selection(&["Blank"]));
        assert_eq!(board.pair("Blank"), Some((462.7, 560.0)));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_deselect_destroys_and_survivors_keep_values() {
        let sel = selection(&["Blank", "Case 1"]);
        let mut board = CursorBoard::default();
        board.sync_selection(&sel);
        *board.slider_mut(&CursorKey::new("Case 1", Slot::Two)).unwrap() = 600.0;
        board.reconcile(&sel, Trigger::SliderChanged);

        board.sync_selection(&selection(&["Case 1"]));
        assert_eq!(board.len(), 2);
        assert_eq!(board.pair("Blank"), None);
        assert_eq!(board.pair("Case 1"), Some((462.7, 600.0)));

        // Reselecting starts from the defaults again.
        board.sync_selection(&selection(&["Case 1", "Blank"]));
        assert_eq!(board.pair("Blank"), Some((462.7, 560.0)));
    }

    #[test]
    fn test_slider_change_propagates_to_entries() {
        let sel = selection(&["Blank", "Case 3"]);
        let mut board = CursorBoard::default();
        board.sync_selection(&sel);
        let key = CursorKey::new("Case 3", Slot::One);
        *board.slider_mut(&key).unwrap() = 512.3;

        let out = board.reconcile(&sel, Trigger::SliderChanged);
        assert_eq!(out.sliders, vec![462.7, 560.0, 512.3, 560.0]);
        assert_eq!(out.sliders, out.inputs);
        assert_eq!(board.entry_text_mut(&key).map(|t| t.clone()), Some("512.3".into()));
    }

    #[test]
    fn test_input_change_propagates_to_sliders() {
        let sel = selection(&["Blank"]);
        let mut board = CursorBoard::default();
        board.sync_selection(&sel);
        let key = CursorKey::new("Blank", Slot::Two);
        *board.entry_text_mut(&key).unwrap() = "615.25".into();
        assert!(board.commit_entry(&key));

        let out = board.reconcile(&sel, Trigger::InputChanged);
        assert_eq!(out.sliders, vec![462.7, 615.25]);
        assert_eq!(out.sliders, out.inputs);
    }

    #[test]
    fn test_chart_click_sets_every_cursor() {
        let sel = selection(&["Blank", "Case 1", "Case 4"]);
        let mut board = CursorBoard::default();
        board.sync_selection(&sel);
        *board.slider_mut(&CursorKey::new("Case 1", Slot::One)).unwrap() = 480.0;

        let out = board.reconcile(&sel, Trigger::ChartClicked { wavelength: 521.5 });
        assert_eq!(out.sliders, vec![521.5; 6]);
        assert_eq!(out.inputs, vec![521.5; 6]);
    }

    #[test]
    fn test_chart_click_outside_domain_is_clamped() {
        let sel = selection(&["Blank"]);
        let mut board = CursorBoard::default();
        let out = board.reconcile(&sel, Trigger::ChartClicked { wavelength: 820.0 });
        assert_eq!(out.sliders, vec![WAVELENGTH_MAX; 2]);
    }

    #[test]
    fn test_malformed_entry_keeps_last_valid_value() {
        let sel = selection(&["Blank"]);
        let mut board = CursorBoard::default();
        board.sync_selection(&sel);
        let key = CursorKey::new("Blank", Slot::One);

        for bad in ["", "abc", "NaN", "inf", "449.9", "700.1"] {
            *board.entry_text_mut(&key).unwrap() = bad.to_string();
            assert!(!board.commit_entry(&key), "{bad:?} should be rejected");
        }
        assert_eq!(board.input(&key), Some(462.7));

        board.restore_entry_text(&key);
        assert_eq!(board.entry_text_mut(&key).map(|t| t.clone()), Some("462.7".into()));

        let out = board.reconcile(&sel, Trigger::InputChanged);
        assert_eq!(out.sliders, vec![462.7, 560.0]);
    }

    #[test]
    fn test_representations_equal_after_every_trigger() {
        let sel = selection(&["Blank", "Case 1"]);
        let mut board = CursorBoard::default();
        board.sync_selection(&sel);
        let k1 = CursorKey::new("Blank", Slot::Two);
        let k2 = CursorKey::new("Case 1", Slot::One);

        *board.slider_mut(&k1).unwrap() = 555.5;
        *board.entry_text_mut(&k2).unwrap() = "499".into();
        board.commit_entry(&k2);

        for trigger in [
            Trigger::SliderChanged,
            Trigger::InputChanged,
            Trigger::ChartClicked { wavelength: 470.0 },
        ] {
            let out = board.reconcile(&sel, trigger);
            assert_eq!(out.sliders.len(), 4);
            assert_eq!(out.sliders, out.inputs);
        }
    }

    #[test]
    fn test_trigger_from_frame() {
        assert_eq!(Trigger::from_frame(false, false, None), None);
        assert_eq!(Trigger::from_frame(true, false, None), Some(Trigger::SliderChanged));
        assert_eq!(Trigger::from_frame(false, true, None), Some(Trigger::InputChanged));
        assert_eq!(
            Trigger::from_frame(false, false, Some(500.0)),
            Some(Trigger::ChartClicked { wavelength: 500.0 })
        );
        // Ambiguous frames fall back to the sliders.
        assert_eq!(Trigger::from_frame(true, true, None), Some(Trigger::SliderChanged));
        assert_eq!(Trigger::from_frame(false, true, Some(500.0)), Some(Trigger::SliderChanged));
    }

    #[test]
    fn test_snap_to_step() {
        assert_eq!(snap_to_step(462.70000000000005), 462.7);
        assert_eq!(snap_to_step(449.0), WAVELENGTH_MIN);
        assert_eq!(format_entry(560.0), "560");
        assert_eq!(format_entry(462.7), "462.7");
    }
}
