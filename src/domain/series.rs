// Rolling sample windows and the pixel mapping used by chart renderers
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fixed-capacity FIFO of recent samples backing one chart trace.
///
/// A window is always full: it is seeded with `capacity` samples on
/// construction and every push evicts the oldest one.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SeriesWindow {
    /// Build a full window from an index-based closed form.
    pub fn from_fn(capacity: usize, seed: impl FnMut(usize) -> f64) -> Self {
        let mut samples = VecDeque::with_capacity(capacity);
        samples.extend((0..capacity).map(seed));
        Self { samples, capacity }
    }

    pub fn from_samples(samples: Vec<f64>) -> Self {
        let capacity = samples.len();
        Self {
            samples: samples.into(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Append a sample, dropping the oldest.
    pub fn push(&mut self, sample: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Non-mutating append: `self[1..] ++ [sample]`.
    pub fn with_sample(&self, sample: f64) -> Self {
        let mut next = self.clone();
        next.push(sample);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

/// Target drawing area for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelDomain {
    pub width: f64,
    /// y coordinate of the zero value.
    pub baseline: f64,
    /// Pixel span covering `0..=max_value`.
    pub height: f64,
}

impl Default for PixelDomain {
    fn default() -> Self {
        Self {
            width: 280.0,
            baseline: 120.0,
            height: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Linear map of samples onto the plot. Values outside `0..=max_value` are
/// not clamped and land outside the visible area.
pub fn to_pixel_path(samples: &[f64], max_value: f64, domain: PixelDomain) -> Vec<PixelPoint> {
    let len = samples.len() as f64;
    samples
        .iter()
        .enumerate()
        .map(|(i, value)| PixelPoint {
            x: i as f64 * domain.width / len,
            y: domain.baseline - value * domain.height / max_value,
        })
        .collect()
}

/// SVG `d` attribute for a polyline through `points`.
pub fn svg_path_data(points: &[PixelPoint]) -> String {
    let joined = points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" L ");
    format!("M {}", joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SeriesWindow {
        SeriesWindow::from_fn(50, |i| 520.0 - i as f64 * 2.0 + (i as f64 * 0.1).sin() * 10.0)
    }

    #[test]
    fn test_window_is_full_after_seeding() {
        let window = seeded();
        assert_eq!(window.len(), 50);
        assert_eq!(window.capacity(), 50);
        assert_eq!(window.to_vec()[0], 520.0);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let original = seeded().to_vec();
        let mut window = seeded();
        window.push(-1.0);

        let after = window.to_vec();
        assert_eq!(after.len(), 50);
        assert_eq!(&after[..49], &original[1..]);
        assert_eq!(window.latest(), Some(-1.0));
    }

    #[test]
    fn test_with_sample_leaves_source_untouched() {
        let window = SeriesWindow::from_samples(vec![1.0, 2.0, 3.0]);
        let next = window.with_sample(4.0);
        assert_eq!(next.to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(window.to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(next.capacity(), window.capacity());
    }

    #[test]
    fn test_capacity_is_stable_over_many_pushes() {
        let mut window = seeded();
        for i in 0..500 {
            window.push(i as f64);
        }
        assert_eq!(window.len(), 50);
        assert_eq!(window.to_vec()[0], 450.0);
        assert_eq!(window.latest(), Some(499.0));
    }

    #[test]
    fn test_zero_capacity_window_stays_empty() {
        let mut window = SeriesWindow::from_fn(0, |_| 0.0);
        window.push(1.0);
        assert!(window.is_empty());
    }

    #[test]
    fn test_pixel_mapping() {
        let points = to_pixel_path(&[0.0, 300.0, 600.0, 900.0], 600.0, PixelDomain::default());
        assert_eq!(points[0], PixelPoint { x: 0.0, y: 120.0 });
        assert_eq!(points[1], PixelPoint { x: 70.0, y: 70.0 });
        assert_eq!(points[2], PixelPoint { x: 140.0, y: 20.0 });
        // out of domain values are not clamped
        assert_eq!(points[3], PixelPoint { x: 210.0, y: -30.0 });
    }

    #[test]
    fn test_pixel_mapping_with_matching_baseline() {
        let domain = PixelDomain {
            width: 100.0,
            baseline: 50.0,
            height: 50.0,
        };
        let points = to_pixel_path(&[25.0, 0.0], 25.0, domain);
        assert_eq!(points[0], PixelPoint { x: 0.0, y: 0.0 });
        assert_eq!(points[1], PixelPoint { x: 50.0, y: 50.0 });
    }

    #[test]
    fn test_svg_path_data() {
        let points = [PixelPoint { x: 0.0, y: 120.0 }, PixelPoint { x: 5.6, y: 33.5 }];
        assert_eq!(svg_path_data(&points), "M 0,120 L 5.6,33.5");
    }
}
