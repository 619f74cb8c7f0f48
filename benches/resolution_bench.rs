//! Benchmarks for channel enablement resolution
//!
//! Covers the hot path a logging facade hits on every message: single-channel
//! resolution and the OR-combine over a message's channel tags, at several
//! registry sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chanreg::{ChannelRegistry, ProjectSettings};

fn seeded_registry(channel_count: usize) -> ChannelRegistry {
    let channels: Vec<serde_json::Value> = (0..channel_count)
        .map(|n| {
            serde_json::json!({
                "id": format!("channel-{n}"),
                "enabled_by_default": n % 3 != 0
            })
        })
        .collect();
    let settings: ProjectSettings = serde_json::from_value(serde_json::json!({
        "unlisted_channels_enabled_by_default": true,
        "channels": channels
    }))
    .expect("valid settings");

    let mut registry = ChannelRegistry::new();
    settings.apply(&mut registry);
    registry
}

fn bench_is_enabled(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_enabled");
    for size in [10usize, 100, 1000] {
        let mut registry = seeded_registry(size);
        let name = format!("channel-{}", size / 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| registry.is_enabled(black_box(&name)))
        });
    }
    group.finish();
}

fn bench_should_show(c: &mut Criterion) {
    let mut group = c.benchmark_group("should_show_message_with_channels");

    // typical message: a handful of tags, all already registered
    let mut registry = seeded_registry(100);
    let tags = ["channel-3", "channel-42", "channel-77"];
    group.bench_function("three_tags", |b| {
        b.iter(|| registry.should_show_message_with_channels(black_box(&tags)))
    });

    // worst case: every tag force-disabled, full scan with no short-circuit
    let mut registry = seeded_registry(100);
    for tag in tags {
        registry.disable_channel(tag);
    }
    group.bench_function("three_tags_all_disabled", |b| {
        b.iter(|| registry.should_show_message_with_channels(black_box(&tags)))
    });

    // untagged message: single flag read
    let none: [&str; 0] = [];
    group.bench_function("untagged", |b| {
        b.iter(|| registry.should_show_message_with_channels(black_box(&none)))
    });

    group.finish();
}

criterion_group!(benches, bench_is_enabled, bench_should_show);
criterion_main!(benches);
