/// Data layer: spectra, the case registry, loading and lookup.
///
/// Architecture:
/// ```text
///  data/t-*.txt  (two whitespace-separated columns)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Spectrum (unparseable rows dropped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  SpectrumStore: data_dir + optional cache
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  resolve  │  cursor wavelength → nearest tabulated intensity
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod registry;
pub mod resolve;
pub mod source;
