use std::{
    any::{self, Any},
    fmt,
    sync::Arc,
};

use metrics_gauge::{Gauge, GaugeValue};

/// A registered instrument.
///
/// Registries do not know what kind of instrument they hold: an `Instrument` erases the type of
/// whatever was registered, and [`downcast`][Instrument::downcast] recovers it.  Cloning an
/// `Instrument` is cheap and shares the underlying instrument.
#[derive(Clone)]
pub struct Instrument {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instrument {
    /// Creates an `Instrument` from any shareable value.
    ///
    /// Instruments are expected to be handles, such as [`Gauge`], where clones share state.
    pub fn new<I>(instrument: I) -> Self
    where
        I: Any + Send + Sync,
    {
        Self { inner: Arc::new(instrument), type_name: any::type_name::<I>() }
    }

    /// Gets the type name of the registered instrument.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the registered instrument is of type `I`.
    pub fn is<I: Any>(&self) -> bool {
        self.inner.is::<I>()
    }

    /// Gets a clone of the registered instrument if it is of type `I`.
    pub fn downcast<I>(&self) -> Option<I>
    where
        I: Any + Clone,
    {
        self.inner.downcast_ref::<I>().cloned()
    }

    /// Returns `true` if both refer to the same registered instrument.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: GaugeValue> From<Gauge<T>> for Instrument {
    fn from(gauge: Gauge<T>) -> Self {
        Instrument::new(gauge)
    }
}

impl fmt::Debug for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrument").field("type", &self.type_name).finish_non_exhaustive()
    }
}
