/// Fixed-capacity rolling window of temperatures
use std::collections::VecDeque;

use crate::models::Temperature;

#[derive(Debug, Clone)]
pub struct SampleWindow {
    capacity: usize,
    values: VecDeque<Temperature>,
}

impl SampleWindow {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Add to the back, evicting the oldest value when already full
    pub fn append(&mut self, value: Temperature) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Temperature> {
        self.values.iter()
    }

    /// Arithmetic mean, 0.0 for an empty window
    pub fn mean(&self) -> Temperature {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: Temperature = self.values.iter().sum();
        sum / self.values.len() as Temperature
    }

    /// Median of a sorted copy, 0.0 for an empty window
    ///
    /// Even-sized windows average the two central values.
    pub fn median(&self) -> Temperature {
        let mut sorted: Vec<Temperature> = self.values.iter().copied().collect();
        if sorted.is_empty() {
            return 0.0;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            sorted[mid]
        } else {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        }
    }
}
