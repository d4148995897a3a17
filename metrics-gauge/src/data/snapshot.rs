use std::sync::Arc;

use crate::{Gauge, GaugeFn, GaugeKind, GaugeValue};

/// A read-only copy of a gauge's value at one instant.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct GaugeSnapshot<T>(T);

impl<T> GaugeSnapshot<T> {
    /// Creates a `GaugeSnapshot` frozen at the given value.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Consumes the snapshot, returning the frozen value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: GaugeValue> GaugeFn<T> for GaugeSnapshot<T> {
    fn update(&self, _value: T) {
        panic!("update called on a gauge snapshot");
    }

    fn value(&self) -> T {
        self.0.clone()
    }

    fn snapshot(self: Arc<Self>) -> Gauge<T> {
        Gauge::from_arc(self)
    }

    fn kind(&self) -> GaugeKind {
        GaugeKind::Snapshot
    }
}
