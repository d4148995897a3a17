//! Registers a few gauges, updates them from worker threads, and prints a report.
//!
//! Set `METRICS_GAUGE_DISABLED=1` to see every gauge turn into a no-op.
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use metrics_gauge::{set_global_config, Gauge, GaugeKind, MetricsConfig};
use metrics_gauge_registry::{
    default_registry, get_or_register_gauge, new_registered_functional_gauge, Registry,
};

fn main() {
    tracing_subscriber::fmt().init();
    set_global_config(MetricsConfig::from_env());

    let started = Instant::now();
    new_registered_functional_gauge("process.uptime_ms", None, move || {
        started.elapsed().as_millis() as u64
    })
    .expect("uptime gauge should register");

    let processed = Arc::new(AtomicU64::new(0));
    let workers: Vec<_> = (0..4)
        .map(|id| {
            let processed = Arc::clone(&processed);
            thread::spawn(move || {
                let in_flight = get_or_register_gauge::<i64>("worker.in_flight", None)
                    .expect("in-flight gauge should register");
                for batch in 0..5 {
                    in_flight.update(id * 10 + batch);
                    processed.fetch_add(1, Ordering::Relaxed);
                    thread::sleep(Duration::from_millis(10));
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().expect("worker panicked");
    }

    let last_batch = get_or_register_gauge::<i64>("worker.in_flight", None)
        .expect("in-flight gauge should exist")
        .snapshot();

    println!("processed {} batches", processed.load(Ordering::Relaxed));
    default_registry().visit(&mut |name, instrument| {
        if let Some(gauge) = instrument.downcast::<Gauge<i64>>() {
            println!("{name} ({:?}) = {}", gauge.kind(), gauge.value());
        } else if let Some(gauge) = instrument.downcast::<Gauge<u64>>() {
            println!("{name} ({:?}) = {}", gauge.kind(), gauge.value());
        }
    });

    if last_batch.kind() != GaugeKind::Noop {
        println!("last in-flight value at report time: {}", last_batch.value());
    }
}
