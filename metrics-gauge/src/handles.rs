use std::{fmt, sync::Arc};

use crate::{
    data::{FunctionalGauge, GaugeSnapshot, StandardGauge},
    GaugeValue, MetricsConfig,
};

/// The kind, or variant, of a gauge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum GaugeKind {
    /// Mutable gauge holding the last updated value.
    Standard,
    /// Read-only gauge computing its value on every read.
    Functional,
    /// Read-only copy of another gauge's value at one instant.
    Snapshot,
    /// Gauge that discards updates and always reads as zero.
    Noop,
}

impl GaugeKind {
    /// Whether or not gauges of this kind reject updates.
    pub const fn is_read_only(self) -> bool {
        matches!(self, GaugeKind::Functional | GaugeKind::Snapshot)
    }
}

/// A gauge handler.
pub trait GaugeFn<T: GaugeValue>: Send + Sync {
    /// Sets the gauge to the given value.
    ///
    /// Read-only handlers panic: updating them is a defect in the calling code.
    fn update(&self, value: T);

    /// Gets the current value of the gauge.
    fn value(&self) -> T;

    /// Takes a point-in-time, read-only copy of the gauge.
    ///
    /// By default, reads the current value once and wraps it in a [`GaugeSnapshot`].
    fn snapshot(self: Arc<Self>) -> Gauge<T> {
        Gauge::snapshot_of(self.value())
    }

    /// Gets the kind of this gauge.
    fn kind(&self) -> GaugeKind;
}

/// A gauge.
///
/// `Gauge` is a cheaply cloneable handle: clones refer to the same underlying gauge, so an update
/// through one clone is visible through all of them.
#[derive(Clone)]
pub struct Gauge<T: GaugeValue> {
    inner: Option<Arc<dyn GaugeFn<T>>>,
}

impl<T: GaugeValue> Gauge<T> {
    /// Creates a standard `Gauge`, initially holding the domain's zero value.
    ///
    /// If metrics are disabled in `config`, a no-op `Gauge` is returned instead.
    pub fn new(config: MetricsConfig) -> Self {
        if config.is_disabled() {
            return Self::noop();
        }

        Self::from_arc(Arc::new(StandardGauge::<T>::new()))
    }

    /// Creates a functional `Gauge` whose value is computed by `f` on every read.
    ///
    /// Functional gauges are read-only.  If metrics are disabled in `config`, a no-op `Gauge` is
    /// returned instead.
    pub fn functional<F>(config: MetricsConfig, f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        if config.is_disabled() {
            return Self::noop();
        }

        Self::from_arc(Arc::new(FunctionalGauge::new(f)))
    }

    /// Creates a read-only `Gauge` frozen at the given value.
    pub fn snapshot_of(value: T) -> Self {
        Self::from_arc(Arc::new(GaugeSnapshot::new(value)))
    }

    /// Creates a no-op `Gauge` which does nothing.
    ///
    /// Suitable when a handle must be provided that does nothing i.e. when metrics are disabled.
    pub fn noop() -> Self {
        Self { inner: None }
    }

    /// Creates a `Gauge` based on a shared handler.
    pub fn from_arc<F: GaugeFn<T> + 'static>(a: Arc<F>) -> Self {
        Self { inner: Some(a) }
    }

    /// Sets the gauge.
    ///
    /// # Panics
    ///
    /// Panics if the gauge is read-only, which is the case for functional gauges and snapshots.
    pub fn update(&self, value: T) {
        if let Some(ref inner) = self.inner {
            inner.update(value)
        }
    }

    /// Gets the current value of the gauge.
    pub fn value(&self) -> T {
        match self.inner {
            Some(ref inner) => inner.value(),
            None => T::default(),
        }
    }

    /// Takes a point-in-time, read-only copy of the gauge.
    ///
    /// Later updates to this gauge are not reflected in the snapshot.  Taking a snapshot of a
    /// snapshot returns the same snapshot, and taking a snapshot of a no-op gauge returns a no-op
    /// gauge.
    pub fn snapshot(&self) -> Gauge<T> {
        match self.inner {
            Some(ref inner) => Arc::clone(inner).snapshot(),
            None => Self::noop(),
        }
    }

    /// Gets the kind of this gauge.
    pub fn kind(&self) -> GaugeKind {
        match self.inner {
            Some(ref inner) => inner.kind(),
            None => GaugeKind::Noop,
        }
    }

    /// Whether or not this gauge rejects updates.
    pub fn is_read_only(&self) -> bool {
        self.kind().is_read_only()
    }

    /// Returns `true` if both handles refer to the same underlying gauge.
    ///
    /// No-op gauges hold no state, so any two no-op handles are considered the same.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: GaugeValue> Default for Gauge<T> {
    fn default() -> Self {
        Self::new(MetricsConfig::global())
    }
}

impl<T> fmt::Debug for Gauge<T>
where
    T: GaugeValue + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        let mut debug = f.debug_struct("Gauge");
        debug.field("kind", &kind);
        // Reading a functional gauge runs arbitrary code.
        if kind != GaugeKind::Functional {
            debug.field("value", &self.value());
        }
        debug.finish()
    }
}

/// Creates a standard gauge using the process-level configuration.
///
/// Returns a no-op gauge if metrics are disabled globally at the time of the call.
pub fn new_gauge<T: GaugeValue>() -> Gauge<T> {
    Gauge::new(MetricsConfig::global())
}

/// Creates a functional gauge using the process-level configuration.
///
/// Returns a no-op gauge if metrics are disabled globally at the time of the call.
pub fn new_functional_gauge<T, F>(f: F) -> Gauge<T>
where
    T: GaugeValue,
    F: Fn() -> T + Send + Sync + 'static,
{
    Gauge::functional(MetricsConfig::global(), f)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    };

    use proptest::prelude::*;

    use super::{Gauge, GaugeFn, GaugeKind};
    use crate::MetricsConfig;

    fn standard<T: crate::GaugeValue>() -> Gauge<T> {
        Gauge::new(MetricsConfig::enabled())
    }

    #[test]
    fn standard_gauge_starts_at_zero() {
        assert_eq!(standard::<i64>().value(), 0);
        assert_eq!(standard::<f64>().value(), 0.0);
        assert_eq!(standard::<String>().value(), "");
        assert_eq!(standard::<u32>().kind(), GaugeKind::Standard);
    }

    #[test]
    fn clones_share_state() {
        let gauge = standard::<i64>();
        let other = gauge.clone();

        other.update(42);
        assert_eq!(gauge.value(), 42);
        assert!(gauge.ptr_eq(&other));
        assert!(!gauge.ptr_eq(&standard()));
    }

    #[test]
    fn snapshot_is_frozen() {
        let gauge = standard::<i64>();
        gauge.update(1);

        let snapshot = gauge.snapshot();
        gauge.update(2);

        assert_eq!(snapshot.value(), 1);
        assert_eq!(gauge.value(), 2);
        assert_eq!(snapshot.kind(), GaugeKind::Snapshot);
        assert!(snapshot.is_read_only());
    }

    #[test]
    fn snapshot_of_snapshot_is_identical() {
        let gauge = standard::<f64>();
        gauge.update(3.5);

        let snapshot = gauge.snapshot();
        let again = snapshot.snapshot();

        assert!(snapshot.ptr_eq(&again));
        assert_eq!(again.value(), 3.5);
    }

    #[test]
    #[should_panic(expected = "update called on a gauge snapshot")]
    fn snapshot_rejects_updates() {
        let gauge = standard::<i64>();
        gauge.update(7);
        gauge.snapshot().update(8);
    }

    #[test]
    #[should_panic(expected = "update called on a gauge snapshot")]
    fn snapshot_of_value_rejects_updates() {
        Gauge::snapshot_of(String::from("frozen")).update(String::from("thawed"));
    }

    #[test]
    fn functional_gauge_is_not_cached() {
        let source = Arc::new(AtomicI64::new(10));
        let producer = Arc::clone(&source);
        let gauge = Gauge::functional(MetricsConfig::enabled(), move || {
            producer.fetch_add(1, Ordering::SeqCst)
        });

        assert_eq!(gauge.kind(), GaugeKind::Functional);
        assert_eq!(gauge.value(), 10);
        assert_eq!(gauge.value(), 11);

        source.store(100, Ordering::SeqCst);
        assert_eq!(gauge.value(), 100);
    }

    #[test]
    fn functional_snapshot_reads_once() {
        let source = Arc::new(AtomicI64::new(5));
        let producer = Arc::clone(&source);
        let gauge =
            Gauge::functional(MetricsConfig::enabled(), move || producer.load(Ordering::SeqCst));

        let snapshot = gauge.snapshot();
        source.store(6, Ordering::SeqCst);

        assert_eq!(snapshot.value(), 5);
        assert_eq!(snapshot.kind(), GaugeKind::Snapshot);
        assert_eq!(gauge.value(), 6);
    }

    #[test]
    #[should_panic(expected = "update called on a functional gauge")]
    fn functional_gauge_rejects_updates() {
        let gauge = Gauge::functional(MetricsConfig::enabled(), || 1.0f64);
        gauge.update(2.0);
    }

    #[test]
    fn noop_gauge_discards_updates() {
        let gauge = Gauge::<i64>::noop();
        gauge.update(99);

        assert_eq!(gauge.value(), 0);
        assert_eq!(gauge.kind(), GaugeKind::Noop);
        assert!(!gauge.is_read_only());

        let snapshot = gauge.snapshot();
        assert_eq!(snapshot.kind(), GaugeKind::Noop);
        snapshot.update(1);
        assert_eq!(snapshot.value(), 0);
    }

    #[test]
    fn disabled_config_yields_noop_gauges() {
        let config = MetricsConfig::disabled();

        let gauge = Gauge::<f64>::new(config);
        gauge.update(12.5);
        assert_eq!(gauge.kind(), GaugeKind::Noop);
        assert_eq!(gauge.value(), 0.0);

        let functional = Gauge::functional(config, || 7u64);
        assert_eq!(functional.kind(), GaugeKind::Noop);
        assert_eq!(functional.value(), 0);
        functional.update(3);
    }

    #[test]
    fn custom_handlers_use_default_snapshot() {
        struct Fixed;

        impl GaugeFn<u64> for Fixed {
            fn update(&self, _value: u64) {}

            fn value(&self) -> u64 {
                77
            }

            fn kind(&self) -> GaugeKind {
                GaugeKind::Standard
            }
        }

        let gauge = Gauge::from_arc(Arc::new(Fixed));
        let snapshot = gauge.snapshot();

        assert_eq!(snapshot.value(), 77);
        assert_eq!(snapshot.kind(), GaugeKind::Snapshot);
    }

    #[test]
    fn debug_output_includes_kind() {
        let gauge = standard::<i64>();
        gauge.update(4);
        assert_eq!(format!("{:?}", gauge), "Gauge { kind: Standard, value: 4 }");

        let functional = Gauge::functional(MetricsConfig::enabled(), || 1i64);
        assert_eq!(format!("{:?}", functional), "Gauge { kind: Functional }");
    }

    proptest! {
        #[test]
        fn update_then_read_returns_value(value in any::<i64>()) {
            let gauge = standard::<i64>();
            gauge.update(value);
            prop_assert_eq!(gauge.value(), value);
        }

        #[test]
        fn repeated_update_is_idempotent(value in -1.0e12f64..1.0e12f64) {
            let gauge = standard::<f64>();
            gauge.update(value);
            gauge.update(value);
            prop_assert_eq!(gauge.value(), value);
        }

        #[test]
        fn snapshot_keeps_value_across_updates(first in any::<u64>(), second in any::<u64>()) {
            let gauge = standard::<u64>();
            gauge.update(first);
            let snapshot = gauge.snapshot();
            gauge.update(second);

            prop_assert_eq!(snapshot.value(), first);
            prop_assert_eq!(gauge.value(), second);
        }
    }
}
