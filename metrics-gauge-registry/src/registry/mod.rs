//! Named instrument storage.
use std::{
    hash::BuildHasher,
    iter::repeat,
    sync::{PoisonError, RwLock},
};

use hashbrown::{DefaultHashBuilder, HashMap};
use tracing::{debug, warn};

use crate::{Instrument, RegistryError};

/// A keyed collection of named instruments.
///
/// Names are unique within a registry.  Implementations must be safe to use from many threads at
/// once, and own whatever locking that requires.
pub trait Registry: Send + Sync {
    /// Gets the instrument registered under `name`, registering the one built by `init` first if
    /// there is none.
    ///
    /// Concurrent calls for the same name converge on a single registered instrument, which is
    /// returned to every caller.  `init` must not call back into the registry.
    fn get_or_register(&self, name: &str, init: &mut dyn FnMut() -> Instrument) -> Instrument;

    /// Registers `instrument` under `name`.
    ///
    /// # Errors
    ///
    /// If an instrument is already registered under `name`, an error variant will be returned and
    /// the existing registration is left untouched.
    fn register(&self, name: &str, instrument: Instrument) -> Result<(), RegistryError>;

    /// Gets the instrument registered under `name`, if any.
    fn get(&self, name: &str) -> Option<Instrument>;

    /// Removes the instrument registered under `name`.
    ///
    /// Returns `true` if an instrument was registered and has been removed, `false` otherwise.
    /// Handles to the instrument that were already handed out keep working.
    fn unregister(&self, name: &str) -> bool;

    /// Visits every registered instrument.
    fn visit(&self, visitor: &mut dyn FnMut(&str, &Instrument));

    /// Gets the number of registered instruments.
    fn len(&self) -> usize {
        let mut len = 0;
        self.visit(&mut |_, _| len += 1);
        len
    }

    /// Returns `true` if no instruments are registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type RegistryHashMap = HashMap<String, Instrument>;

/// A sharded, read-optimized [`Registry`].
///
/// Instruments are spread over a power-of-two number of shards, each behind its own lock, based on
/// the hash of their name.  Looking up an instrument that already exists only takes a read lock.
pub struct GaugeRegistry {
    shards: Vec<RwLock<RegistryHashMap>>,
    shard_mask: usize,
    hasher: DefaultHashBuilder,
}

impl GaugeRegistry {
    /// Creates a new `GaugeRegistry` with one shard per CPU.
    pub fn new() -> Self {
        Self::with_shards(num_cpus::get())
    }

    /// Creates a new `GaugeRegistry` with the given number of shards.
    ///
    /// The shard count is rounded up to the next power of two, with a minimum of one.
    pub fn with_shards(shards: usize) -> Self {
        let shard_count = std::cmp::max(1, shards).next_power_of_two();
        let shard_mask = shard_count - 1;
        let shards =
            repeat(()).take(shard_count).map(|_| RwLock::new(RegistryHashMap::new())).collect();

        Self { shards, shard_mask, hasher: DefaultHashBuilder::default() }
    }

    #[inline]
    fn shard_for(&self, name: &str) -> &RwLock<RegistryHashMap> {
        let hash = self.hasher.hash_one(name);

        // The mask is always `self.shards.len() - 1` for a power-of-two length, so the index is
        // always in bounds.
        &self.shards[hash as usize & self.shard_mask]
    }

    /// Removes every registered instrument.
    ///
    /// This operation is eventually consistent: shards are cleared one at a time, and this method
    /// does not ensure that callers will see the registry as entirely empty at any given point.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.write().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    /// Retains only the instruments specified by the predicate.
    ///
    /// Removes every instrument for which `f(name, instrument)` returns `false`.
    pub fn retain<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Instrument) -> bool,
    {
        for shard in &self.shards {
            let mut shard_write = shard.write().unwrap_or_else(PoisonError::into_inner);
            shard_write.retain(|name, instrument| f(name, instrument));
        }
    }
}

impl Default for GaugeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for GaugeRegistry {
    fn get_or_register(&self, name: &str, init: &mut dyn FnMut() -> Instrument) -> Instrument {
        let shard = self.shard_for(name);

        // Try and get the instrument if it exists.
        let shard_read = shard.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(instrument) = shard_read.get(name) {
            return instrument.clone();
        }

        // Switch to the write guard, and check again in case someone else registered it first.
        drop(shard_read);
        let mut shard_write = shard.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(instrument) = shard_write.get(name) {
            return instrument.clone();
        }

        let instrument = init();
        debug!(%name, instrument = instrument.type_name(), "registered instrument");
        shard_write.insert(name.to_owned(), instrument.clone());
        instrument
    }

    fn register(&self, name: &str, instrument: Instrument) -> Result<(), RegistryError> {
        let mut shard_write = self.shard_for(name).write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = shard_write.get(name) {
            warn!(
                %name,
                existing = existing.type_name(),
                rejected = instrument.type_name(),
                "instrument already registered"
            );
            return Err(RegistryError::AlreadyRegistered { name: name.to_owned() });
        }

        debug!(%name, instrument = instrument.type_name(), "registered instrument");
        shard_write.insert(name.to_owned(), instrument);
        Ok(())
    }

    fn get(&self, name: &str) -> Option<Instrument> {
        let shard_read = self.shard_for(name).read().unwrap_or_else(PoisonError::into_inner);
        shard_read.get(name).cloned()
    }

    fn unregister(&self, name: &str) -> bool {
        let mut shard_write = self.shard_for(name).write().unwrap_or_else(PoisonError::into_inner);
        shard_write.remove(name).is_some()
    }

    fn visit(&self, visitor: &mut dyn FnMut(&str, &Instrument)) {
        for shard in &self.shards {
            let shard_read = shard.read().unwrap_or_else(PoisonError::into_inner);
            for (name, instrument) in shard_read.iter() {
                visitor(name, instrument);
            }
        }
    }

    fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.read().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }
}
