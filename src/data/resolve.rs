use super::model::Spectrum;

/// Index of the sample whose wavelength is closest to `wavelength`.
///
/// Linear scan; on ties the first sample in source order wins. `None` only for
/// an empty spectrum.
pub fn nearest_index(spectrum: &Spectrum, wavelength: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in spectrum.wavelength.iter().enumerate() {
        let dist = (x - wavelength).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

/// Intensity of the tabulated sample nearest to `wavelength`. No interpolation.
pub fn resolve(spectrum: &Spectrum, wavelength: f64) -> Option<f64> {
    nearest_index(spectrum, wavelength).map(|i| spectrum.intensity[i])
}
