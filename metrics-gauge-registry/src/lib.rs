//! Named, process-wide registration of gauges.
//!
//! A [`Registry`] maps instrument names to live instruments so that a gauge created in one place
//! can be found, and shared, everywhere else.  The binding functions in this crate look a gauge up
//! by name and create and register it the first time it is asked for:
//!
//! ```rust
//! use metrics_gauge_registry::{get_or_register_gauge, GaugeRegistry};
//!
//! let registry = GaugeRegistry::new();
//!
//! let connections = get_or_register_gauge::<i64>("connections", Some(&registry)).unwrap();
//! connections.update(17);
//!
//! // Elsewhere, the same gauge is found by name.
//! let same = get_or_register_gauge::<i64>("connections", Some(&registry)).unwrap();
//! assert_eq!(same.value(), 17);
//! ```
//!
//! Registration only happens once: afterwards, callers use the returned [`Gauge`] handle directly
//! without going through the registry.  Passing `None` as the registry uses the process-wide
//! [default registry][default_registry].
//!
//! Asking for a name that is bound to a different instrument, or to a gauge of a different value
//! type, returns [`RegistryError::IncompatibleInstrument`] rather than panicking, since
//! registration usually happens during initialization where callers may want to handle it.
//!
//! [`Gauge`]: metrics_gauge::Gauge
#![deny(missing_docs)]

mod binding;
pub use self::binding::{
    default_registry, get_gauge, get_or_register_gauge, get_or_register_gauge_with,
    new_registered_functional_gauge, new_registered_gauge, register_gauge,
};

mod errors;
pub use self::errors::RegistryError;

mod instrument;
pub use self::instrument::Instrument;

mod registry;
pub use self::registry::{GaugeRegistry, Registry};
