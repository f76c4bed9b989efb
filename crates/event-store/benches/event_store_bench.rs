use common::Vin;
use criterion::{Criterion, criterion_group, criterion_main};
use event_store::{AppendOptions, EventEnvelope, EventStore, InMemoryEventStore, Version};

fn make_event(vin: &Vin, version: i64) -> EventEnvelope {
    EventEnvelope::builder()
        .vin(vin.clone())
        .aggregate_type("FleetTruck")
        .event_type("TruckReturnedToYard")
        .version(Version::new(version))
        .payload(serde_json::json!({
            "vin": vin.as_str(),
            "distance_traveled": 100
        }))
        .build()
}

fn bench_append_single_event(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_single_event", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                let vin = Vin::new("bench-0001");
                let event = make_event(&vin, 1);
                store
                    .append(vec![event], AppendOptions::expect_new())
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_append_batch_10(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_batch_10", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                let vin = Vin::new("bench-0001");
                let events: Vec<EventEnvelope> = (1..=10).map(|v| make_event(&vin, v)).collect();
                store.append(events, AppendOptions::new()).await.unwrap();
            });
        });
    });
}

fn bench_events_for_aggregate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryEventStore::new();
    let vin = Vin::new("bench-0001");

    rt.block_on(async {
        let events: Vec<EventEnvelope> = (1..=100).map(|v| make_event(&vin, v)).collect();
        store.append(events, AppendOptions::new()).await.unwrap();
    });

    c.bench_function("event_store/read_100_events", |b| {
        b.iter(|| {
            rt.block_on(async {
                let events = store.events_for_aggregate(&vin).await.unwrap();
                assert_eq!(events.len(), 100);
            });
        });
    });
}

criterion_group!(
    benches,
    bench_append_single_event,
    bench_append_batch_10,
    bench_events_for_aggregate
);
criterion_main!(benches);
