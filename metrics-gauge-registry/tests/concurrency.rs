use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Barrier,
    },
    thread,
};

use metrics_gauge::{Gauge, GaugeKind, MetricsConfig};
use metrics_gauge_registry::{get_or_register_gauge_with, GaugeRegistry, Instrument, Registry};

const WRITERS: u64 = 8;
const READERS: usize = 8;
const UPDATES_PER_WRITER: u64 = 10_000;

// Writers store values whose upper and lower halves are identical, so that a value made up of two
// different writes is detectable.
fn mirrored(n: u64) -> u64 {
    (n << 32) | n
}

fn is_mirrored(value: u64) -> bool {
    value >> 32 == value & 0xFFFF_FFFF
}

#[test]
fn concurrent_updates_are_never_torn() {
    let gauge = Gauge::<u64>::new(MetricsConfig::enabled());
    let barrier = Barrier::new(WRITERS as usize + READERS);

    thread::scope(|s| {
        for writer in 0..WRITERS {
            let gauge = gauge.clone();
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for i in 0..UPDATES_PER_WRITER {
                    gauge.update(mirrored(writer * UPDATES_PER_WRITER + i + 1));
                }
            });
        }

        for _ in 0..READERS {
            let gauge = gauge.clone();
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for _ in 0..UPDATES_PER_WRITER {
                    let value = gauge.value();
                    assert!(is_mirrored(value), "observed torn value {:#x}", value);
                }
            });
        }
    });

    let last = gauge.value();
    assert!(is_mirrored(last));
    assert_ne!(last, 0);
}

#[test]
fn concurrent_locked_updates_are_never_torn() {
    let gauge = Gauge::<String>::new(MetricsConfig::enabled());
    gauge.update("a".repeat(64));

    thread::scope(|s| {
        for letter in ['a', 'b', 'c', 'd'] {
            let gauge = gauge.clone();
            s.spawn(move || {
                for _ in 0..1_000 {
                    gauge.update(letter.to_string().repeat(64));
                }
            });
        }

        for _ in 0..4 {
            let gauge = gauge.clone();
            s.spawn(move || {
                for _ in 0..1_000 {
                    let value = gauge.value();
                    assert_eq!(value.len(), 64);
                    let first = value.chars().next().unwrap();
                    assert!(value.chars().all(|c| c == first), "observed torn value {}", value);
                }
            });
        }
    });
}

#[test]
fn concurrent_get_or_register_converges() {
    const CALLERS: usize = 16;

    let registry = GaugeRegistry::new();
    let barrier = Barrier::new(CALLERS);

    let gauges: Vec<Gauge<i64>> = thread::scope(|s| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let registry = &registry;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    get_or_register_gauge_with::<i64>(
                        "shared",
                        Some(registry),
                        MetricsConfig::enabled(),
                    )
                    .expect("should register")
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().expect("caller panicked")).collect()
    });

    let first = &gauges[0];
    assert_eq!(first.kind(), GaugeKind::Standard);
    for gauge in &gauges {
        assert!(gauge.ptr_eq(first));
    }

    first.update(-5);
    assert!(gauges.iter().all(|gauge| gauge.value() == -5));
    assert_eq!(registry.len(), 1);
}

#[test]
fn concurrent_get_or_register_constructs_once() {
    const CALLERS: usize = 16;

    let registry = GaugeRegistry::with_shards(1);
    let constructed = AtomicUsize::new(0);
    let barrier = Barrier::new(CALLERS);

    let instruments: Vec<Instrument> = thread::scope(|s| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let (registry, constructed, barrier) = (&registry, &constructed, &barrier);
                s.spawn(move || {
                    barrier.wait();
                    registry.get_or_register("shared", &mut || {
                        constructed.fetch_add(1, Ordering::SeqCst);
                        Instrument::from(Gauge::<f64>::new(MetricsConfig::enabled()))
                    })
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().expect("caller panicked")).collect()
    });

    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    assert!(instruments.iter().all(|instrument| instrument.ptr_eq(&instruments[0])));
}
