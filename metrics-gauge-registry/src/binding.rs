use std::any;

use metrics_gauge::{Gauge, GaugeValue, MetricsConfig};
use once_cell::sync::OnceCell;
use tracing::warn;

use crate::{GaugeRegistry, Instrument, Registry, RegistryError};

static DEFAULT_REGISTRY: OnceCell<GaugeRegistry> = OnceCell::new();

/// Gets the process-wide default registry.
///
/// Every binding function falls back to this registry when no registry is given.
pub fn default_registry() -> &'static GaugeRegistry {
    DEFAULT_REGISTRY.get_or_init(GaugeRegistry::new)
}

fn resolve(registry: Option<&dyn Registry>) -> &dyn Registry {
    match registry {
        Some(registry) => registry,
        None => default_registry(),
    }
}

fn downcast_gauge<T: GaugeValue>(
    name: &str,
    instrument: &Instrument,
) -> Result<Gauge<T>, RegistryError> {
    instrument.downcast::<Gauge<T>>().ok_or_else(|| {
        let expected = any::type_name::<Gauge<T>>();
        warn!(%name, expected, found = instrument.type_name(), "incompatible instrument");
        RegistryError::IncompatibleInstrument {
            name: name.to_owned(),
            expected,
            found: instrument.type_name(),
        }
    })
}

/// Gets an existing gauge, or registers a new standard gauge, under `name`.
///
/// The gauge is constructed with the process-level [`MetricsConfig`], so it is a no-op gauge if
/// metrics are disabled globally at the time it is first registered.  When `registry` is `None`,
/// the [default registry][default_registry] is used.
///
/// # Errors
///
/// If `name` is already registered to an instrument other than a `Gauge<T>`, an error variant
/// will be returned.
pub fn get_or_register_gauge<T: GaugeValue>(
    name: &str,
    registry: Option<&dyn Registry>,
) -> Result<Gauge<T>, RegistryError> {
    get_or_register_gauge_with(name, registry, MetricsConfig::global())
}

/// Gets an existing gauge, or registers a new standard gauge built with `config`, under `name`.
///
/// # Errors
///
/// If `name` is already registered to an instrument other than a `Gauge<T>`, an error variant
/// will be returned.
pub fn get_or_register_gauge_with<T: GaugeValue>(
    name: &str,
    registry: Option<&dyn Registry>,
    config: MetricsConfig,
) -> Result<Gauge<T>, RegistryError> {
    let instrument = resolve(registry)
        .get_or_register(name, &mut || Instrument::from(Gauge::<T>::new(config)));
    downcast_gauge(name, &instrument)
}

/// Gets the gauge registered under `name`, if any.
///
/// # Errors
///
/// If `name` is registered to an instrument other than a `Gauge<T>`, an error variant will be
/// returned.
pub fn get_gauge<T: GaugeValue>(
    name: &str,
    registry: Option<&dyn Registry>,
) -> Result<Option<Gauge<T>>, RegistryError> {
    resolve(registry).get(name).map(|instrument| downcast_gauge(name, &instrument)).transpose()
}

/// Registers an existing gauge under `name`.
///
/// # Errors
///
/// If an instrument is already registered under `name`, an error variant will be returned.
pub fn register_gauge<T: GaugeValue>(
    name: &str,
    registry: Option<&dyn Registry>,
    gauge: Gauge<T>,
) -> Result<(), RegistryError> {
    resolve(registry).register(name, Instrument::from(gauge))
}

/// Creates a standard gauge and registers it under `name`.
///
/// The gauge is constructed with the process-level [`MetricsConfig`].
///
/// # Errors
///
/// If an instrument is already registered under `name`, an error variant will be returned.
pub fn new_registered_gauge<T: GaugeValue>(
    name: &str,
    registry: Option<&dyn Registry>,
) -> Result<Gauge<T>, RegistryError> {
    let gauge = Gauge::new(MetricsConfig::global());
    register_gauge(name, registry, gauge.clone())?;
    Ok(gauge)
}

/// Creates a functional gauge computed by `f` and registers it under `name`.
///
/// The gauge is constructed with the process-level [`MetricsConfig`].
///
/// # Errors
///
/// If an instrument is already registered under `name`, an error variant will be returned.
pub fn new_registered_functional_gauge<T, F>(
    name: &str,
    registry: Option<&dyn Registry>,
    f: F,
) -> Result<Gauge<T>, RegistryError>
where
    T: GaugeValue,
    F: Fn() -> T + Send + Sync + 'static,
{
    let gauge = Gauge::functional(MetricsConfig::global(), f);
    register_gauge(name, registry, gauge.clone())?;
    Ok(gauge)
}
