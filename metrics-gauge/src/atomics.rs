//! Atomic types used for gauge storage.
//!
//! Every fixed-width value kind a gauge supports is backed by a native atomic of the same width,
//! so that updating or reading a gauge is a single store or load.  Floating-point values use the
//! float atomics from `portable-atomic`, which store the IEEE-754 bits in an integer atomic.
//!
//! We always require a 64-bit atomic regardless of whether the standard library exposes one for
//! the target architecture, so on 32-bit targets the 64-bit integer atomics are taken from
//! `portable-atomic` as well.  They are re-exported here for downstream crates to utilize.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

#[cfg(target_pointer_width = "32")]
pub use portable_atomic::{AtomicI64, AtomicU64};
#[cfg(not(target_pointer_width = "32"))]
pub use std::sync::atomic::{AtomicI64, AtomicU64};

pub use portable_atomic::{AtomicF32, AtomicF64};

use crate::value::{GaugeValue, Number, ValueCell};

macro_rules! impl_atomic_cell {
    ($value_ty:ty, $atomic_ty:ty) => {
        impl ValueCell<$value_ty> for $atomic_ty {
            fn with_value(value: $value_ty) -> Self {
                <$atomic_ty>::new(value)
            }

            fn read(&self) -> $value_ty {
                self.load(Ordering::Acquire)
            }

            fn write(&self, value: $value_ty) {
                self.store(value, Ordering::Release);
            }
        }

        impl GaugeValue for $value_ty {
            type Cell = $atomic_ty;
        }
    };
}

macro_rules! impl_number {
    ($($value_ty:ty => $atomic_ty:ty),+ $(,)?) => {
        $(
            impl_atomic_cell!($value_ty, $atomic_ty);

            impl Number for $value_ty {}
        )+
    };
}

impl_number!(
    i64 => AtomicI64,
    u64 => AtomicU64,
    i32 => AtomicI32,
    u32 => AtomicU32,
    f64 => AtomicF64,
    f32 => AtomicF32,
);

impl_atomic_cell!(bool, AtomicBool);
