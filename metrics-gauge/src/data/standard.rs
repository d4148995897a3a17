use crate::{GaugeFn, GaugeKind, GaugeValue, ValueCell};

/// The standard implementation of a gauge.
///
/// Holds the last updated value in a [`ValueCell`], which for numeric values is a single native
/// atomic, so updates and reads never block and never require external locking.
pub struct StandardGauge<T: GaugeValue> {
    cell: T::Cell,
}

impl<T: GaugeValue> StandardGauge<T> {
    /// Creates a `StandardGauge` holding the domain's zero value.
    pub fn new() -> Self {
        Self { cell: T::Cell::with_value(T::default()) }
    }
}

impl<T: GaugeValue> Default for StandardGauge<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GaugeValue> GaugeFn<T> for StandardGauge<T> {
    fn update(&self, value: T) {
        self.cell.write(value);
    }

    fn value(&self) -> T {
        self.cell.read()
    }

    fn kind(&self) -> GaugeKind {
        GaugeKind::Standard
    }
}
