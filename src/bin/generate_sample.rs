use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn generate_spectrum(
    wavelengths: &[f64],
    peaks: &[(f64, f64, f64)],
    baseline: f64,
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    wavelengths
        .iter()
        .map(|&wl| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wl, mu, sigma, amp))
                .sum();
            (baseline + signal + rng.gauss(0.0, noise_level)).max(0.0)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Writes synthetic white-light fluorescence scans for the reference cases
/// into `data/`: a blank and four FITC-BSA dilutions (10, 20, 30, 50 µL).
fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Wavelengths: 400 → 750 nm, step 0.5
    let wavelengths: Vec<f64> = (0..=700).map(|i| 400.0 + i as f64 * 0.5).collect();

    // (file, µL of FITC-BSA)
    let cases = [
        ("t-white-blank.txt", 0.0),
        ("t-1white.txt", 10.0),
        ("t-2white.txt", 20.0),
        ("t-3white.txt", 30.0),
        ("t-4white.txt", 50.0),
    ];

    let out_dir = Path::new("data");
    std::fs::create_dir_all(out_dir).context("creating data directory")?;

    for (file, volume) in cases {
        // Excitation scatter near 462 nm plus FITC emission at ~520 nm.
        let peaks = [
            (462.0, 6.0, 18.0),
            (520.0, 16.0, 1.6 * volume),
            (545.0, 22.0, 0.5 * volume),
        ];
        let intensity = generate_spectrum(&wavelengths, &peaks, 2.0, 0.15, &mut rng);

        let mut text = String::new();
        for (wl, y) in wavelengths.iter().zip(&intensity) {
            writeln!(text, "{wl:.1}\t{y:.4}")?;
        }

        let path = out_dir.join(file);
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {} samples to {}", wavelengths.len(), path.display());
    }

    Ok(())
}
