use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::case_color;
use crate::config::AppConfig;
use crate::cursor::{snap_to_step, CursorKey, Slot, CURSOR_STEP, WAVELENGTH_MAX, WAVELENGTH_MIN};
use crate::data::registry::Case;
use crate::state::AppState;

/// Which cursor representations were edited during this frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct CursorEdits {
    pub slider_changed: bool,
    pub input_changed: bool,
}

// ---------------------------------------------------------------------------
// Left side panel – case selector and per-case cursor controls
// ---------------------------------------------------------------------------

/// Render the left panel. Selection changes are dispatched immediately;
/// cursor edits are returned so the caller can dispatch one pass per frame.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) -> CursorEdits {
    let mut edits = CursorEdits::default();

    ui.heading("Cases");
    ui.separator();

    let cases: Vec<Case> = state.registry.iter().cloned().collect();
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for case in &cases {
            let mut checked = state.is_selected(&case.id);
            if ui.checkbox(&mut checked, case.id.as_str()).changed() {
                state.toggle_case(&case.id);
            }
        }
    });
    ui.separator();

    if state.selection.is_empty() {
        ui.label("No case selected.");
        return edits;
    }

    let selected: Vec<Case> = state
        .selection
        .iter()
        .filter_map(|id| state.registry.get(id).cloned())
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for case in &selected {
                case_controls(ui, state, case, &mut edits);
                ui.separator();
            }
        });

    edits
}

fn case_controls(ui: &mut Ui, state: &mut AppState, case: &Case, edits: &mut CursorEdits) {
    let color = case_color(&state.registry, &case.id, &case.color);
    ui.label(RichText::new(&case.description).heading().color(color));

    for slot in Slot::BOTH {
        let key = CursorKey::new(&case.id, slot);
        ui.push_id(&key, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(format!("Cursor {}", slot.number()));

                let mut text_changed = false;
                let mut text_left = false;
                if let Some(text) = state.cursors.entry_text_mut(&key) {
                    let resp = ui.add(egui::TextEdit::singleline(text).desired_width(100.0));
                    text_changed = resp.changed();
                    text_left = resp.lost_focus();
                }
                if text_changed && state.cursors.commit_entry(&key) {
                    edits.input_changed = true;
                }
                if text_left {
                    state.cursors.restore_entry_text(&key);
                }
            });

            if let Some(value) = state.cursors.slider_mut(&key) {
                let resp = ui.add(
                    egui::Slider::new(value, WAVELENGTH_MIN..=WAVELENGTH_MAX)
                        .step_by(CURSOR_STEP)
                        .suffix(" nm"),
                );
                if resp.changed() {
                    *value = snap_to_step(*value);
                    edits.slider_changed = true;
                }
            }
        });
        ui.add_space(8.0);
    }

    if let Some(delta) = state.chart.delta_for(&case.id) {
        ui.label(RichText::new(&delta.text).strong().color(color));
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – delta summary table
// ---------------------------------------------------------------------------

pub fn delta_table(ui: &mut Ui, state: &AppState) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(220.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Case");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Description");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Cursor difference");
            });
        })
        .body(|mut body| {
            for delta in &state.chart.deltas {
                let color = state
                    .registry
                    .get(&delta.case_id)
                    .map(|c| case_color(&state.registry, &c.id, &c.color))
                    .unwrap_or(Color32::GRAY);
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(&delta.case_id).color(color));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(delta.description.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(&delta.text).strong());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open configuration…").clicked() {
                open_config_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export deltas…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} of {} cases shown",
            state.chart.curves.len(),
            state.selection.len()
        ));

        ui.separator();

        let caching = state.store.caching();
        if ui
            .selectable_label(caching, "Cache spectra")
            .on_hover_text(format!("Data directory: {}", state.store.data_dir().display()))
            .clicked()
        {
            state.set_caching(!caching);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_config_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open case configuration")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match AppConfig::load(&path).and_then(|config| state.replace_config(&config)) {
            Ok(()) => {
                log::info!(
                    "Loaded {} cases from {}",
                    state.registry.len(),
                    path.display()
                );
            }
            Err(e) => {
                log::error!("Failed to load configuration: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export cursor differences")
        .add_filter("CSV", &["csv"])
        .set_file_name("deltas.csv")
        .save_file();

    if let Some(path) = file {
        match crate::export::export_deltas(&path, &state.chart.deltas) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export deltas: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
