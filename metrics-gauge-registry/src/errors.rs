use thiserror::Error;

/// Errors that could occur while registering or looking up an instrument.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RegistryError {
    /// An instrument is already registered under the given name.
    #[error("an instrument named `{name}` is already registered")]
    AlreadyRegistered {
        /// Name of the instrument.
        name: String,
    },

    /// The instrument registered under the given name is not of the requested type.
    ///
    /// This covers both a different kind of instrument and a gauge holding a different value
    /// type.
    #[error("instrument `{name}` is registered as `{found}`, but `{expected}` was requested")]
    IncompatibleInstrument {
        /// Name of the instrument.
        name: String,
        /// Type that was requested.
        expected: &'static str,
        /// Type that is registered.
        found: &'static str,
    },
}
