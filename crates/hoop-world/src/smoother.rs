use std::collections::VecDeque;

use hoop_core::Point;

/// Kernel taps reach out to this many standard deviations.
const KERNEL_TRUNCATE: f64 = 4.0;

/// Denoises the ball position with a Gaussian filter over a sliding window of the
/// most recent raw positions.
#[derive(Debug)]
pub struct PositionSmoother {
    /// Maximum number of positions kept in the window.
    capacity: usize,
    /// Normalized kernel, indexed from `-radius` to `radius`.
    kernel: Vec<f64>,
    /// Raw positions, oldest first.
    window: VecDeque<Point>,
}

impl PositionSmoother {
    pub fn new(capacity: usize, sigma: f64) -> Self {
        let capacity = capacity.max(1);
        PositionSmoother {
            capacity,
            kernel: gaussian_kernel(sigma),
            window: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Adds a raw position and returns the smoothed current position.
    pub fn add(&mut self, position: Point) -> Point {
        self.window.push_back(position);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }

        let x = self.smooth_last(|p| p.x);
        let y = self.smooth_last(|p| p.y);
        Point::new(to_pixel(x), to_pixel(y))
    }

    /// Number of positions currently in the window.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Value of the filtered channel at the newest sample. Samples past either end
    /// of the window are mirrored back into it.
    fn smooth_last(&self, channel: impl Fn(&Point) -> i32) -> f64 {
        let n = self.window.len() as isize;
        let radius = (self.kernel.len() / 2) as isize;
        let last = n - 1;
        self.kernel
            .iter()
            .enumerate()
            .map(|(tap, weight)| {
                let idx = reflect(last + tap as isize - radius, n);
                weight * channel(&self.window[idx]) as f64
            })
            .sum()
    }
}

fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    if sigma.is_nan() || sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (KERNEL_TRUNCATE * sigma + 0.5) as i64;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x as f64 / sigma).powi(2)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Mirror an out-of-range index into `0..n` (`d c b a | a b c d | d c b a`).
fn reflect(i: isize, n: isize) -> usize {
    let period = 2 * n;
    let m = i.rem_euclid(period);
    if m >= n {
        (period - 1 - m) as usize
    } else {
        m as usize
    }
}

/// Truncates towards zero, except that values within rounding noise of an
/// integer snap to it.
fn to_pixel(value: f64) -> i32 {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-6 {
        rounded as i32
    } else {
        value.trunc() as i32
    }
}
