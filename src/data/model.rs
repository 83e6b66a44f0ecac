// ---------------------------------------------------------------------------
// Spectrum – one two-column emission scan
// ---------------------------------------------------------------------------

/// A single fluorescence spectrum in source order.
///
/// Samples are kept in the order they were read; the files are assumed to be
/// sorted by wavelength already and nothing here re-sorts them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    /// Wavelength axis in nm (x).
    pub wavelength: Vec<f64>,
    /// Intensity axis in % (y) – same length as `wavelength`.
    pub intensity: Vec<f64>,
}

impl Spectrum {
    /// Build from (wavelength, intensity) pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (wavelength, intensity) = pairs.into_iter().unzip();
        Spectrum {
            wavelength,
            intensity,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Whether the spectrum has no samples.
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// Largest intensity value, `None` for an empty spectrum.
    pub fn max_intensity(&self) -> Option<f64> {
        self.intensity.iter().copied().reduce(f64::max)
    }

    /// Samples as `[x, y]` points, ready for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.wavelength
            .iter()
            .zip(self.intensity.iter())
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_keeps_order() {
        let sp = Spectrum::from_pairs([(500.0, 1.0), (450.0, 2.0), (600.0, 3.0)]);
        assert_eq!(sp.wavelength, vec![500.0, 450.0, 600.0]);
        assert_eq!(sp.intensity, vec![1.0, 2.0, 3.0]);
        assert_eq!(sp.len(), 3);
    }

    #[test]
    fn test_max_intensity() {
        let sp = Spectrum::from_pairs([(450.0, 4.5), (451.0, 9.25), (452.0, -1.0)]);
        assert_eq!(sp.max_intensity(), Some(9.25));
        assert_eq!(Spectrum::default().max_intensity(), None);
    }
}
