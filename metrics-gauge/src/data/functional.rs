use crate::{GaugeFn, GaugeKind, GaugeValue};

/// A read-only gauge whose value is computed on demand.
///
/// The producer runs synchronously on every read, on the reading thread, and its result is never
/// cached.  Bounding how long it takes is up to whoever supplies it.
pub struct FunctionalGauge<F> {
    producer: F,
}

impl<F> FunctionalGauge<F> {
    /// Creates a `FunctionalGauge` backed by the given producer.
    pub fn new(producer: F) -> Self {
        Self { producer }
    }
}

impl<T, F> GaugeFn<T> for FunctionalGauge<F>
where
    T: GaugeValue,
    F: Fn() -> T + Send + Sync,
{
    fn update(&self, _value: T) {
        panic!("update called on a functional gauge");
    }

    fn value(&self) -> T {
        (self.producer)()
    }

    fn kind(&self) -> GaugeKind {
        GaugeKind::Functional
    }
}
