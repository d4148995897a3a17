//! Gauges: metrics holding the last value that was set, or computed.
//!
//! A gauge, unlike a counter, does not accumulate.  It reports whatever value it was last updated
//! to, which makes it suitable for measured, external values: queue depth, current memory usage,
//! the number of connected peers, and so on.
//!
//! # Variants
//!
//! Every gauge is used through the same [`Gauge`] handle, which exposes [`update`][Gauge::update],
//! [`value`][Gauge::value], and [`snapshot`][Gauge::snapshot].  Behind the handle sits one of four
//! variants:
//!
//! - **standard**: holds the last updated value.  Updates and reads are single atomic operations
//!   and can happen concurrently from any number of threads without external locking.
//! - **functional**: computes its value on every read by calling a producer function.  It has no
//!   settable state, so calling `update` on it panics.
//! - **snapshot**: a frozen, read-only copy of another gauge's value, produced by
//!   [`Gauge::snapshot`].  Calling `update` on it panics.
//! - **no-op**: discards every update and always reads as zero.  Used when metrics are disabled,
//!   so that call sites never need to special-case that.
//!
//! Calling `update` on a read-only gauge is a defect in the calling code rather than a runtime
//! condition, and so it panics instead of returning an error.
//!
//! # Value domains
//!
//! Gauges are generic over the value they hold.  The default domain is [`Number`]: `i64`, `u64`,
//! `i32`, `u32`, `f64`, and `f32`, each stored in a native atomic.  The wider [`GaugeValue`]
//! domain also admits `bool`, `String`, or any type providing a [`ValueCell`], but only guarantees
//! equality and ordering on its values: a gauge never performs arithmetic.
//!
//! # Disabling metrics
//!
//! Constructors take a [`MetricsConfig`].  When it says metrics are disabled, every constructor
//! returns a no-op gauge instead of the requested variant.  The configuration is only consulted at
//! construction time, so once a gauge has been obtained, using it never checks it again.
//!
//! The top-level convenience constructors, [`new_gauge`] and [`new_functional_gauge`], use the
//! process-level configuration, which is set with [`set_global_config`].
//!
//! ```rust
//! use metrics_gauge::{Gauge, GaugeKind, MetricsConfig};
//!
//! let queue_depth = Gauge::<i64>::new(MetricsConfig::enabled());
//! queue_depth.update(12);
//!
//! let at_report_time = queue_depth.snapshot();
//! queue_depth.update(3);
//!
//! assert_eq!(at_report_time.value(), 12);
//! assert_eq!(queue_depth.value(), 3);
//!
//! let disabled = Gauge::<i64>::new(MetricsConfig::disabled());
//! disabled.update(12);
//! assert_eq!(disabled.kind(), GaugeKind::Noop);
//! assert_eq!(disabled.value(), 0);
//! ```
#![deny(missing_docs)]

pub mod atomics;

mod config;
pub use self::config::{set_global_config, MetricsConfig, DISABLED_ENV_VAR};

mod data;
pub use self::data::{FunctionalGauge, GaugeSnapshot, StandardGauge};

mod handles;
pub use self::handles::{new_functional_gauge, new_gauge, Gauge, GaugeFn, GaugeKind};

mod value;
pub use self::value::{GaugeValue, LockedCell, Number, ValueCell};
