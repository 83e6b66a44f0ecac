use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::loader::load_spectrum;
use super::model::Spectrum;

/// Where the composer gets spectra from.
///
/// `None` means "unavailable": the caller skips the case without reporting
/// anything to the user.
pub trait SpectrumSource {
    fn load(&mut self, reference: &str) -> Option<Spectrum>;
}

// ---------------------------------------------------------------------------
// File-backed store with an optional read-through cache
// ---------------------------------------------------------------------------

/// Reads spectra from disk, relative references resolved against `data_dir`.
///
/// With caching off (the default) every call re-reads the file.
#[derive(Debug, Clone)]
pub struct SpectrumStore {
    data_dir: PathBuf,
    cache: Option<HashMap<String, Spectrum>>,
}

impl SpectrumStore {
    pub fn new(data_dir: impl Into<PathBuf>, caching: bool) -> Self {
        SpectrumStore {
            data_dir: data_dir.into(),
            cache: caching.then(HashMap::new),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Turn the cache on or off. Turning it off drops everything cached.
    pub fn set_caching(&mut self, on: bool) {
        match (on, self.cache.is_some()) {
            (true, false) => self.cache = Some(HashMap::new()),
            (false, true) => self.cache = None,
            _ => {}
        }
    }

    pub fn resolve_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    fn read(&self, reference: &str) -> Option<Spectrum> {
        let path = self.resolve_path(reference);
        match load_spectrum(&path) {
            Ok(spectrum) => {
                log::debug!("Loaded {} samples from {}", spectrum.len(), path.display());
                Some(spectrum)
            }
            Err(e) => {
                log::warn!("Spectrum unavailable: {e}");
                None
            }
        }
    }
}

impl SpectrumSource for SpectrumStore {
    fn load(&mut self, reference: &str) -> Option<Spectrum> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(reference)) {
            return Some(hit.clone());
        }
        let spectrum = self.read(reference)?;
        // Only successful reads are cached, so a file that appears later is
        // still picked up.
        if let Some(cache) = self.cache.as_mut() {
            cache.insert(reference.to_string(), spectrum.clone());
        }
        Some(spectrum)
    }
}

// ---------------------------------------------------------------------------
// In-memory source for tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySource {
    pub spectra: HashMap<String, Spectrum>,
    pub loads: usize,
}

#[cfg(test)]
impl MemorySource {
    pub fn with(mut self, reference: &str, spectrum: Spectrum) -> Self {
        self.spectra.insert(reference.to_string(), spectrum);
        self
    }
}

#[cfg(test)]
impl SpectrumSource for MemorySource {
    fn load(&mut self, reference: &str) -> Option<Spectrum> {
        self.loads += 1;
        self.spectra.get(reference).filter(|s| !s.is_empty()).cloned()
    }
}
