use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::Spectrum;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a spectrum file could not produce any samples.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: no numeric rows", .path.display())]
    Empty { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a two-column spectrum file.
///
/// Layout: one sample per line, wavelength and intensity separated by any run
/// of whitespace, no header.
///
/// ```text
/// 450.0   0.812
/// 450.5   0.830
/// ```
///
/// Rows whose first two fields are not both finite numbers are dropped. A file
/// that leaves no rows behind is reported as [`LoadError::Empty`].
pub fn load_spectrum(path: &Path) -> Result<Spectrum, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Non-UTF-8 bytes only spoil the rows they sit in.
    let text = String::from_utf8_lossy(&bytes);

    let spectrum = parse_spectrum(&text);
    if spectrum.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(spectrum)
}

/// Parse every line of `text`, keeping the rows that coerce to numbers.
pub fn parse_spectrum(text: &str) -> Spectrum {
    Spectrum::from_pairs(text.lines().filter_map(parse_row))
}

/// Coerce one line to `(wavelength, intensity)`.
fn parse_row(line: &str) -> Option<(f64, f64)> {
    let mut fields = line.split_whitespace();
    let wavelength = parse_finite(fields.next()?)?;
    let intensity = parse_finite(fields.next()?)?;
    Some((wavelength, intensity))
}

fn parse_finite(tok: &str) -> Option<f64> {
    tok.parse::<f64>().ok().filter(|v| v.is_finite())
}
