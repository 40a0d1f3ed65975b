//! Running-sum moving average
//!
//! The window starts zero-filled, so the first `W - 1` outputs ramp up from
//! zero. Division truncates toward zero.

use crate::buffer::CircularBuffer;

/// Moving-average state over the last `W` samples
#[derive(Debug, Clone)]
pub struct MovingAverage<const W: usize> {
    window: CircularBuffer<i32, W>,
    running_sum: i32,
}

impl<const W: usize> MovingAverage<W> {
    const WINDOW_IS_NONZERO: () = assert!(W > 0, "moving-average window must be non-empty");

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::WINDOW_IS_NONZERO;
        Self { window: CircularBuffer::new(), running_sum: 0 }
    }

    /// Add `sample` and return the mean of the window
    pub fn update(&mut self, sample: i32) -> i32 {
        let leaving = self.window.push(sample).unwrap_or(0);
        self.running_sum = self.running_sum - leaving + sample;
        self.running_sum / W as i32
    }

    pub fn running_sum(&self) -> i32 {
        self.running_sum
    }

    /// Sum of the window recomputed from its contents
    pub fn recompute_sum(&self) -> i32 {
        self.window.iter().sum()
    }

    /// Slot the next sample will overwrite
    pub fn index(&self) -> usize {
        self.window.write_index()
    }
}

impl<const W: usize> Default for MovingAverage<W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure form of [`MovingAverage::update`]
pub fn moving_average<const W: usize>(mut state: MovingAverage<W>, sample: i32) -> (i32, MovingAverage<W>) {
    let avg = state.update(sample);
    (avg, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ramps_up_from_zero_filled_window() {
        let mut avg = MovingAverage::<4>::new();
        assert_eq!(avg.update(400), 100);
        assert_eq!(avg.update(400), 200);
        assert_eq!(avg.update(400), 300);
        assert_eq!(avg.update(400), 400);
        assert_eq!(avg.update(400), 400);
    }

    #[test]
    fn truncates_toward_zero() {
        let mut avg = MovingAverage::<4>::new();
        assert_eq!(avg.update(3), 0);
        assert_eq!(avg.update(-7), -1);
    }

    #[test]
    fn index_wraps() {
        let mut state = MovingAverage::<3>::new();
        for x in 0..7 {
            let (_, next) = moving_average(state, x);
            state = next;
        }
        assert_eq!(state.index(), 7 % 3);
    }

    proptest! {
        #[test]
        fn running_sum_matches_contents(samples in prop::collection::vec(-5000i32..5000, 1..200)) {
            let mut avg = MovingAverage::<8>::new();
            for &s in &samples {
                let out = avg.update(s);
                prop_assert_eq!(avg.running_sum(), avg.recompute_sum());
                prop_assert_eq!(out, avg.recompute_sum() / 8);
            }
        }
    }
}
