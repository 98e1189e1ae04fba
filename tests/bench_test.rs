//! Benchmark tests for critical operations
//!
//! Run with: cargo test --release -- --ignored --nocapture bench

use std::time::Instant;
use tempfile::NamedTempFile;

use shorturl::database::UrlStore;
use shorturl::handler::{handle_resolve, handle_shorten};

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(usize),
{
    let start = Instant::now();

    for i in 0..iterations {
        f(i);
    }

    let duration = start.elapsed();
    let avg_ms = duration.as_millis() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

#[test]
#[ignore]
fn bench_shorten() {
    println!("\n=== Benchmark: Shorten ===\n");

    let temp_db = NamedTempFile::new().unwrap();
    let store = UrlStore::open(temp_db.path()).unwrap();

    benchmark("Shorten new urls", 1000, |i| {
        handle_shorten(&store, Some(&format!("https://example.com/bench/{}", i))).unwrap();
    });

    benchmark("Shorten known urls", 1000, |i| {
        handle_shorten(&store, Some(&format!("https://example.com/bench/{}", i))).unwrap();
    });

    assert_eq!(store.len().unwrap(), 1000);
}

#[test]
#[ignore]
fn bench_resolve() {
    println!("\n=== Benchmark: Resolve ===\n");

    let temp_db = NamedTempFile::new().unwrap();
    let store = UrlStore::open(temp_db.path()).unwrap();
    for i in 0..1000 {
        store.insert_new(&format!("https://example.com/resolve/{}", i)).unwrap();
    }

    let ids: Vec<String> = (0..1000).map(|i: u64| i.to_string()).collect();
    benchmark("Resolve existing ids", 10_000, |i| {
        handle_resolve(&store, Some(&ids[i % ids.len()])).unwrap();
    });

    benchmark("Resolve missing ids", 10_000, |i| {
        let _ = handle_resolve(&store, Some(&(1000 + i).to_string()));
    });
}
