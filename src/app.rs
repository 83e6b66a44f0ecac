use eframe::egui;

use crate::cursor::Trigger;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FluoroApp {
    pub state: AppState,
}

impl FluoroApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for FluoroApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: delta table ----
        egui::TopBottomPanel::bottom("delta_table")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                panels::delta_table(ui, &self.state);
            });

        // ---- Left side panel: cases and cursors ----
        let edits = egui::SidePanel::left("cursor_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &mut self.state))
            .inner;

        // ---- Central panel: plot ----
        let click_x = egui::CentralPanel::default()
            .show(ctx, |ui| plot::spectral_plot(ui, &self.state))
            .inner;

        let click = click_x.and_then(|x| self.state.chart_click_wavelength(x));
        if let Some(trigger) = Trigger::from_frame(edits.slider_changed, edits.input_changed, click)
        {
            self.state.dispatch(trigger);
            ctx.request_repaint();
        }
    }
}
