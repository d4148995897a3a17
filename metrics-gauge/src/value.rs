//! Value domains a gauge can hold.
use parking_lot::RwLock;

/// Storage for the current value of a gauge.
///
/// A cell is shared between every reader and writer of a single gauge, and must hand out complete
/// values only: a reader never observes a mix of two writes.
pub trait ValueCell<T>: Send + Sync {
    /// Creates a cell holding the given value.
    fn with_value(value: T) -> Self
    where
        Self: Sized;

    /// Reads the current value.
    fn read(&self) -> T;

    /// Replaces the current value.
    fn write(&self, value: T);
}

/// A value that can be held by a gauge.
///
/// This is the permissive value domain: the only operations guaranteed to be available on a
/// `GaugeValue` are equality and ordering (`PartialEq` and `PartialOrd`), plus `Default`, which
/// acts as the domain's zero.  No arithmetic is available, which is what allows non-numeric values
/// such as `String` to be used.
///
/// Implementations are provided for every [`Number`], for `bool`, and for `String`.  Other types
/// can opt in by using [`LockedCell`] as their storage:
///
/// ```rust
/// use metrics_gauge::{Gauge, GaugeValue, LockedCell, MetricsConfig};
///
/// #[derive(Clone, Debug, Default, PartialEq, PartialOrd)]
/// enum Health {
///     #[default]
///     Unknown,
///     Degraded,
///     Healthy,
/// }
///
/// impl GaugeValue for Health {
///     type Cell = LockedCell<Self>;
/// }
///
/// let gauge = Gauge::<Health>::new(MetricsConfig::enabled());
/// gauge.update(Health::Degraded);
/// assert!(gauge.value() > Health::Unknown);
/// ```
pub trait GaugeValue: Clone + PartialEq + PartialOrd + Default + Send + Sync + 'static {
    /// Storage used for this value by standard gauges.
    type Cell: ValueCell<Self>;
}

/// A numeric value that can be held by a gauge.
///
/// This is the default value domain: fixed-width integers and floats, each stored in a native
/// atomic of the same width.  Zero is `Default::default()`.
pub trait Number: GaugeValue + Copy {}

/// Replace-under-lock storage for arbitrary gauge values.
///
/// Every write replaces the whole value, and every read clones it, so the lock is only ever held
/// for the duration of a move or a clone.
#[derive(Debug, Default)]
pub struct LockedCell<T>(RwLock<T>);

impl<T> ValueCell<T> for LockedCell<T>
where
    T: Clone + Send + Sync,
{
    fn with_value(value: T) -> Self {
        LockedCell(RwLock::new(value))
    }

    fn read(&self) -> T {
        self.0.read().clone()
    }

    fn write(&self, value: T) {
        // Drop the previous value outside of the lock.
        let _previous = std::mem::replace(&mut *self.0.write(), value);
    }
}

impl GaugeValue for String {
    type Cell = LockedCell<Self>;
}
