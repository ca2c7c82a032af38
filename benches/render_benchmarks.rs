use axum::{body::Body, http::Request};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use temperature_pi::{
    colour_for, create_app, snapshot_store, web::pages, FilePersister, SerialLineReader,
    SerialRecord, TemperatureSnapshot, WebConfig,
};
use tower::ServiceExt;

/// Benchmark colour mapping across all bands
fn bench_colour_mapping(c: &mut Criterion) {
    for temp_f in [-40.0, -10.0, 5.0, 20.0, 30.0, 72.3] {
        c.bench_with_input(BenchmarkId::new("colour_for", temp_f), &temp_f, |b, &t| {
            b.iter(|| colour_for(t))
        });
    }
}

/// Benchmark serial line parsing
fn bench_record_parsing(c: &mut Criterion) {
    c.bench_function("serial_record_parse", |b| {
        b.iter(|| SerialRecord::parse("{\"tempF\": 72.3}\r\n"))
    });

    c.bench_function("serial_record_reject", |b| {
        b.iter(|| SerialRecord::parse("not a reading"))
    });
}

/// Benchmark handling a line, including the spawned file write
fn bench_line_handling(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("Should create tokio runtime");
    let path = std::env::temp_dir().join("temperature_pi_bench.json");
    let (writer, _reader) = snapshot_store();
    let serial = SerialLineReader::new(writer, FilePersister::new(path));

    c.bench_function("handle_line_with_persist", |b| {
        b.to_async(&rt).iter(|| async {
            if let Some(write) = serial.handle_line("{\"tempF\": 72.3}") {
                write.await.expect("Write task should not panic");
            }
        })
    });
}

/// Benchmark HTML page rendering
fn bench_page_rendering(c: &mut Criterion) {
    let snapshot = TemperatureSnapshot::now(68.4);

    c.bench_function("render_temperature_page", |b| {
        b.iter(|| pages::render_temperature(&snapshot))
    });

    c.bench_function("render_not_found_page", |b| {
        b.iter(|| pages::render_not_found("/<script>alert('x')</script>.html"))
    });
}

/// Benchmark a full request through the router
fn bench_router(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("Should create tokio runtime");
    let (_writer, reader) = snapshot_store();
    let app = create_app(&WebConfig::default(), reader);

    c.bench_function("get_temperature", |b| {
        b.to_async(&rt).iter(|| async {
            let request = Request::builder()
                .uri("/temperature")
                .body(Body::empty())
                .expect("Should build request");
            app.clone().oneshot(request).await.expect("Router is infallible")
        })
    });
}

criterion_group!(
    benches,
    bench_colour_mapping,
    bench_record_parsing,
    bench_line_handling,
    bench_page_rendering,
    bench_router
);
criterion_main!(benches);
