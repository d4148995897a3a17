//! Gauge variants.
//!
//! Each variant is a [`GaugeFn`][crate::GaugeFn] implementation; callers normally interact with
//! them through a [`Gauge`][crate::Gauge] handle rather than directly.
mod functional;
mod snapshot;
mod standard;

pub use self::{functional::FunctionalGauge, snapshot::GaugeSnapshot, standard::StandardGauge};
