//! First difference

/// Previous sample for the first-difference filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Derivative {
    previous_sample: i32,
}

impl Derivative {
    pub const fn new() -> Self {
        Self { previous_sample: 0 }
    }

    /// Filter whose first delta is measured from `sample`
    pub const fn starting_at(sample: i32) -> Self {
        Self { previous_sample: sample }
    }

    pub fn update(&mut self, sample: i32) -> i32 {
        let delta = sample.saturating_sub(self.previous_sample);
        self.previous_sample = sample;
        delta
    }

    pub const fn previous_sample(&self) -> i32 {
        self.previous_sample
    }
}

/// Pure form of [`Derivative::update`]
pub fn derivative(mut state: Derivative, sample: i32) -> (i32, Derivative) {
    let delta = state.update(sample);
    (delta, state)
}
