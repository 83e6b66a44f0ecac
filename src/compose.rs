use crate::data::model::Spectrum;
use crate::data::registry::CaseRegistry;
use crate::data::resolve::{nearest_index, resolve};
use crate::data::source::SpectrumSource;

pub const CHART_TITLE: &str = "Fluorescence Spectrum Analysis";
pub const X_AXIS_LABEL: &str = "Wavelength (nm)";
pub const Y_AXIS_LABEL: &str = "Intensity (%)";

// ---------------------------------------------------------------------------
// Chart description – what the plot panel draws
// ---------------------------------------------------------------------------

/// A vertical cursor marker from 0 up to the spectrum's maximum intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub wavelength: f64,
    pub top: f64,
    /// `"462.70 nm"`
    pub label: String,
}

/// One rendered case: its spectrum and both cursor markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub case_id: String,
    /// Legend name (the case description).
    pub name: String,
    pub color: String,
    pub spectrum: Spectrum,
    pub markers: [Marker; 2],
}

/// Cursor difference for one rendered case.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaSummary {
    pub case_id: String,
    pub description: String,
    pub delta_wavelength: f64,
    pub delta_intensity: f64,
    /// `"Δλ = 97.30 nm, ΔI = 4.35%"`
    pub text: String,
}

/// Everything one recomposition pass produces.
///
/// `curves` and `deltas` hold one entry per case that produced a curve, in
/// selection order; cases whose spectrum was unavailable are absent from both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chart {
    pub curves: Vec<Curve>,
    pub deltas: Vec<DeltaSummary>,
}

impl Chart {
    pub fn delta_for(&self, case_id: &str) -> Option<&DeltaSummary> {
        self.deltas.iter().find(|d| d.case_id == case_id)
    }

    /// Wavelength of the tabulated sample closest to `x` over all curves.
    ///
    /// This is what a chart click reports. The earlier curve wins ties;
    /// `None` when nothing is drawn.
    pub fn snap_click(&self, x: f64) -> Option<f64> {
        let mut best: Option<f64> = None;
        for curve in &self.curves {
            let Some(i) = nearest_index(&curve.spectrum, x) else {
                continue;
            };
            let w = curve.spectrum.wavelength[i];
            match best {
                Some(b) if (b - x).abs() <= (w - x).abs() => {}
                _ => best = Some(w),
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

pub fn format_marker_label(wavelength: f64) -> String {
    format!("{wavelength:.2} nm")
}

pub fn format_delta(delta_wavelength: f64, delta_intensity: f64) -> String {
    format!("Δλ = {delta_wavelength:.2} nm, ΔI = {delta_intensity:.2}%")
}

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Build the chart for `selection`.
///
/// `cursors` is the flat cursor list: the case at position `i` reads its two
/// cursors from `cursors[2i]` and `cursors[2i + 1]`. Each case's spectrum is
/// loaded through `source` on every call.
pub fn compose(
    selection: &[String],
    cursors: &[f64],
    registry: &CaseRegistry,
    source: &mut dyn SpectrumSource,
) -> Chart {
    let mut chart = Chart::default();

    for (i, case_id) in selection.iter().enumerate() {
        let Some(case) = registry.get(case_id) else {
            log::warn!("Selected case {case_id:?} is not in the registry");
            continue;
        };
        let (Some(&c1), Some(&c2)) = (cursors.get(2 * i), cursors.get(2 * i + 1)) else {
            log::warn!("No cursor values for {case_id:?} at position {i}");
            continue;
        };
        let Some(spectrum) = source.load(&case.file) else {
            continue;
        };
        let (Some(i1), Some(i2), Some(top)) = (
            resolve(&spectrum, c1),
            resolve(&spectrum, c2),
            spectrum.max_intensity(),
        ) else {
            continue;
        };

        let delta_wavelength = (c2 - c1).abs();
        let delta_intensity = (i2 - i1).abs();
        chart.deltas.push(DeltaSummary {
            case_id: case.id.clone(),
            description: case.description.clone(),
            delta_wavelength,
            delta_intensity,
            text: format_delta(delta_wavelength, delta_intensity),
        });

        let marker = |wavelength: f64| Marker {
            wavelength,
            top,
            label: format_marker_label(wavelength),
        };
        chart.curves.push(Curve {
            case_id: case.id.clone(),
            name: case.description.clone(),
            color: case.color.clone(),
            markers: [marker(c1), marker(c2)],
            spectrum,
        });
    }

    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::registry::reference_cases;
    use crate::data::source::MemorySource;

    fn selection(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn blank_spectrum() -> Spectrum {
        Spectrum::from_pairs([(450.0, 3.0), (462.7, 12.345), (500.0, 20.0), (560.0, 8.0)])
    }

    #[test]
    fn test_delta_format_exact() {
        assert_eq!(
            format_delta((560.00f64 - 462.70).abs(), (8.0f64 - 12.345).abs()),
            "Δλ = 97.30 nm, ΔI = 4.35%"
        );
    }

    #[test]
    fn test_single_case_composition() {
        let registry = CaseRegistry::reference();
        let mut source = MemorySource::default().with("t-white-blank.txt", blank_spectrum());

        let chart = compose(&selection(&["Blank"]), &[462.7, 560.0], &registry, &mut source);

        assert_eq!(chart.curves.len(), 1);
        let curve = &chart.curves[0];
        assert_eq!(curve.color, "black");
        assert_eq!(curve.name, "Blank");
        assert_eq!(curve.markers[0].label, "462.70 nm");
        assert_eq!(curve.markers[1].label, "560.00 nm");
        assert_eq!(curve.markers[0].top, 20.0);

        assert_eq!(chart.deltas.len(), 1);
        assert_eq!(chart.deltas[0].text, "Δλ = 97.30 nm, ΔI = 4.35%");
    }

    #[test]
    fn test_unavailable_spectrum_contributes_nothing() {
        let registry = CaseRegistry::reference();
        let mut source = MemorySource::default();

        let chart = compose(&selection(&["Blank"]), &[462.7, 560.0], &registry, &mut source);

        assert!(chart.curves.is_empty());
        assert_eq!(chart.deltas.len(), 0);
    }

    #[test]
    fn test_empty_spectrum_counts_as_unavailable() {
        let registry = CaseRegistry::reference();
        let mut source = MemorySource::default().with("t-white-blank.txt", Spectrum::default());
        let chart = compose(&selection(&["Blank"]), &[462.7, 560.0], &registry, &mut source);
        assert_eq!(chart, Chart::default());
    }

    #[test]
    fn test_empty_selection() {
        let registry = CaseRegistry::reference();
        let mut source = MemorySource::default();
        let chart = compose(&[], &[], &registry, &mut source);
        assert!(chart.curves.is_empty());
        assert!(chart.deltas.is_empty());
        assert_eq!(source.loads, 0);
    }

    #[test]
    fn test_skipped_case_keeps_other_cursor_positions() {
        let registry = CaseRegistry::reference();
        let flat = Spectrum::from_pairs((0..=250).map(|i| (450.0 + i as f64, i as f64)));
        let mut source = MemorySource::default()
            .with("t-1white.txt", flat.clone())
            .with("t-3white.txt", flat);

        // Case 2 is missing; Case 3 must still read positions 4 and 5.
        let chart = compose(
            &selection(&["Case 1", "Case 2", "Case 3"]),
            &[460.0, 470.0, 480.0, 490.0, 500.0, 650.0],
            &registry,
            &mut source,
        );

        let ids: Vec<&str> = chart.deltas.iter().map(|d| d.case_id.as_str()).collect();
        assert_eq!(ids, ["Case 1", "Case 3"]);
        assert_eq!(chart.deltas[1].delta_wavelength, 150.0);
        assert_eq!(chart.deltas[1].delta_intensity, 150.0);
        assert_eq!(chart.curves[1].color, "blue");
        assert!(chart.delta_for("Case 2").is_none());
    }

    #[test]
    fn test_every_render_reloads() {
        let registry = CaseRegistry::reference();
        let mut source = MemorySource::default().with("t-white-blank.txt", blank_spectrum());
        let sel = selection(&["Blank"]);
        compose(&sel, &[462.7, 560.0], &registry, &mut source);
        compose(&sel, &[470.0, 560.0], &registry, &mut source);
        assert_eq!(source.loads, 2);
    }

    #[test]
    fn test_unknown_case_is_skipped() {
        let registry = CaseRegistry::new(reference_cases()).unwrap();
        let mut source = MemorySource::default().with("t-white-blank.txt", blank_spectrum());
        let chart = compose(
            &selection(&["Nope", "Blank"]),
            &[450.0, 451.0, 462.7, 560.0],
            &registry,
            &mut source,
        );
        assert_eq!(chart.deltas.len(), 1);
        assert_eq!(chart.deltas[0].case_id, "Blank");
    }

    #[test]
    fn test_snap_click_to_nearest_sample() {
        let registry = CaseRegistry::reference();
        let mut source = MemorySource::default()
            .with("t-white-blank.txt", Spectrum::from_pairs([(450.0, 1.0), (500.0, 1.0)]))
            .with("t-1white.txt", Spectrum::from_pairs([(480.0, 1.0), (520.0, 1.0)]));
        let chart = compose(
            &selection(&["Blank", "Case 1"]),
            &[462.7, 560.0, 462.7, 560.0],
            &registry,
            &mut source,
        );
        assert_eq!(chart.snap_click(497.0), Some(500.0));
        assert_eq!(chart.snap_click(470.0), Some(480.0));
        // 490 is 10 nm from both 480 and 500; the first curve wins.
        assert_eq!(chart.snap_click(490.0), Some(500.0));
        assert_eq!(Chart::default().snap_click(500.0), None);
    }
}
