pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Mutable scalar driving a visual property.
///
/// The timeline moves trackers through their scripted targets; everything
/// that samples the density reads the current value through [`get`].
///
/// [`get`]: ValueTracker::get
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueTracker {
    value: f64,
}

impl ValueTracker {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn set(&mut self, value: f64) {
        self.value = value;
    }
}
