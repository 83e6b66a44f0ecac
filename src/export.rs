use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::compose::DeltaSummary;

#[derive(Debug, Serialize)]
struct DeltaRow<'a> {
    case: &'a str,
    description: &'a str,
    delta_wavelength_nm: f64,
    delta_intensity: f64,
    summary: &'a str,
}

/// Write one CSV row per delta summary, with a header.
pub fn write_deltas<W: Write>(writer: W, deltas: &[DeltaSummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for d in deltas {
        wtr.serialize(DeltaRow {
            case: &d.case_id,
            description: &d.description,
            delta_wavelength_nm: d.delta_wavelength,
            delta_intensity: d.delta_intensity,
            summary: &d.text,
        })
        .context("writing delta row")?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

pub fn export_deltas(path: &Path, deltas: &[DeltaSummary]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_deltas(file, deltas)?;
    log::info!("Exported {} delta summaries to {}", deltas.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::format_delta;

    #[test]
    fn test_csv_layout() {
        let deltas = vec![DeltaSummary {
            case_id: "Case 1".into(),
            description: "10µL FITC-BSA with 290µL water".into(),
            delta_wavelength: 97.5,
            delta_intensity: 4.25,
            text: format_delta(97.5, 4.25),
        }];
        let mut buf = Vec::new();
        write_deltas(&mut buf, &deltas).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("case,description,delta_wavelength_nm,delta_intensity,summary")
        );
        assert_eq!(
            lines.next(),
            Some("Case 1,10µL FITC-BSA with 290µL water,97.5,4.25,\"Δλ = 97.50 nm, ΔI = 4.25%\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_no_deltas_writes_nothing() {
        let mut buf = Vec::new();
        write_deltas(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }
}
