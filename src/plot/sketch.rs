//! Hand-drawn line effect.
//!
//! A path is resampled roughly once per pixel and every sample is pushed along
//! the local normal by `scale * sin(phase)`. The phase advances by a random
//! factor in `[1/randomness, randomness]` per pixel, so the wobble has a mean
//! wavelength of `length` pixels but never repeats exactly.

use std::f64::consts::TAU;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sketch {
    /// Amplitude of the wobble perpendicular to the line, in pixels.
    pub scale: f64,
    /// Mean wavelength of the wobble along the line, in pixels.
    pub length: f64,
    pub randomness: f64,
}

impl Sketch {
    /// Scale 1, length 100, randomness 2, in points, converted for `dpi`.
    pub fn hand_drawn(dpi: f64) -> Self {
        let k = dpi / 72.0;
        Self {
            scale: 1.0 * k,
            length: 100.0 * k,
            randomness: 2.0,
        }
    }

    pub fn apply<R: Rng>(&self, path: &[(f64, f64)], rng: &mut R) -> Vec<(f64, f64)> {
        if path.len() < 2 || self.scale <= 0.0 || self.length <= 0.0 {
            return path.to_vec();
        }

        let mut out = Vec::new();
        let mut phase = 0.0_f64;
        let wavenumber = TAU / self.length;

        for (seg_idx, pair) in path.windows(2).enumerate() {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            let (dx, dy) = (x1 - x0, y1 - y0);
            let len = dx.hypot(dy);
            if len == 0.0 {
                continue;
            }
            let (nx, ny) = (-dy / len, dx / len);
            let steps = len.ceil().max(1.0) as usize;
            let step = len / steps as f64;

            // Segments share endpoints; only the first one emits its start.
            let first = if seg_idx == 0 { 0 } else { 1 };
            for i in first..=steps {
                if i > 0 {
                    let jitter: f64 = rng.gen_range(-1.0..1.0);
                    phase += step * self.randomness.powf(jitter);
                }
                let t = i as f64 / steps as f64;
                let r = (phase * wavenumber).sin() * self.scale;
                out.push((x0 + dx * t + nx * r, y0 + dy * t + ny * r));
            }
        }

        if out.is_empty() {
            return path.to_vec();
        }
        out
    }
}

/// Split a polyline into dashes of `on` pixels separated by gaps of `off` pixels.
pub fn dash_segments(path: &[(f64, f64)], on: f64, off: f64) -> Vec<Vec<(f64, f64)>> {
    if path.len() < 2 {
        return Vec::new();
    }
    if on <= 0.0 || off <= 0.0 {
        return vec![path.to_vec()];
    }

    let mut dashes = Vec::new();
    let mut current = vec![path[0]];
    let mut drawing = true;
    let mut remaining = on;

    for pair in path.windows(2) {
        let mut a = pair[0];
        let b = pair[1];
        let mut seg = distance(a, b);

        while seg > remaining {
            let t = remaining / seg;
            let p = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
            if drawing {
                current.push(p);
                dashes.push(std::mem::take(&mut current));
            } else {
                current = vec![p];
            }
            drawing = !drawing;
            remaining = if drawing { on } else { off };
            a = p;
            seg = distance(a, b);
        }

        remaining -= seg;
        if drawing {
            current.push(b);
        }
    }

    if drawing && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn polyline_length(path: &[(f64, f64)]) -> f64 {
        path.windows(2).map(|w| distance(w[0], w[1])).sum()
    }

    #[test]
    fn wobble_stays_within_scale() {
        let sketch = Sketch::hand_drawn(300.0);
        let mut rng = StdRng::seed_from_u64(7);
        let out = sketch.apply(&[(0.0, 100.0), (500.0, 100.0)], &mut rng);

        assert!(out.len() >= 500);
        for &(_, y) in &out {
            assert!((y - 100.0).abs() <= sketch.scale + 1e-9);
        }
        assert!(out.iter().any(|&(_, y)| (y - 100.0).abs() > 1e-6));
    }

    #[test]
    fn same_seed_same_line() {
        let sketch = Sketch::hand_drawn(300.0);
        let path = [(0.0, 0.0), (100.0, 50.0), (200.0, 0.0)];
        let a = sketch.apply(&path, &mut StdRng::seed_from_u64(42));
        let b = sketch.apply(&path, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_scale_is_identity() {
        let sketch = Sketch { scale: 0.0, length: 100.0, randomness: 2.0 };
        let path = vec![(1.0, 2.0), (3.0, 4.0)];
        assert_eq!(sketch.apply(&path, &mut StdRng::seed_from_u64(1)), path);
    }

    #[test]
    fn dashes_alternate_on_and_off() {
        let dashes = dash_segments(&[(0.0, 0.0), (100.0, 0.0)], 10.0, 5.0);
        assert_eq!(dashes.len(), 7);
        for dash in &dashes {
            assert!((polyline_length(dash) - 10.0).abs() < 1e-6);
        }
        assert!((dashes[1][0].0 - 15.0).abs() < 1e-9);
    }

    #[test]
    fn dashes_follow_corners() {
        let dashes = dash_segments(&[(0.0, 0.0), (6.0, 0.0), (6.0, 6.0)], 10.0, 2.0);
        let first = &dashes[0];
        assert_eq!(first.len(), 3);
        assert_eq!(first[1], (6.0, 0.0));
        assert!((first[2].0 - 6.0).abs() < 1e-9 && (first[2].1 - 4.0).abs() < 1e-9);
    }
}
