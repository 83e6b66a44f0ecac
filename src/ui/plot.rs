use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Text};

use crate::color::case_color;
use crate::compose::{CHART_TITLE, X_AXIS_LABEL, Y_AXIS_LABEL};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Spectral plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart from the last composition.
///
/// Returns the plot x-coordinate of a click, if the user clicked the plot
/// this frame.
pub fn spectral_plot(ui: &mut Ui, state: &AppState) -> Option<f64> {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(CHART_TITLE);
    });

    let plot_resp = Plot::new("spectral_plot")
        .legend(Legend::default())
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label(Y_AXIS_LABEL)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.2} nm\n{:.2}%", value.x, value.y)
            } else {
                format!("{name}\n{:.2} nm\n{:.2}%", value.x, value.y)
            }
        })
        .allow_boxed_zoom(false)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for curve in &state.chart.curves {
                let color = case_color(&state.registry, &curve.case_id, &curve.color);

                let line = Line::new(PlotPoints::from(curve.spectrum.points()))
                    .name(&curve.name)
                    .color(color)
                    .width(1.5);
                plot_ui.line(line);

                // Unnamed items stay out of the legend.
                for marker in &curve.markers {
                    let stem = vec![[marker.wavelength, 0.0], [marker.wavelength, marker.top]];
                    plot_ui.line(
                        Line::new(PlotPoints::from(stem))
                            .color(color)
                            .width(1.0)
                            .style(LineStyle::dashed_loose()),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(marker.wavelength, marker.top),
                            RichText::new(&marker.label).color(color),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        });

    if !plot_resp.response.clicked() {
        return None;
    }
    plot_resp
        .response
        .interact_pointer_pos()
        .map(|pos| plot_resp.transform.value_from_position(pos).x)
}
