use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use hl7_extract::app::services::hl7_decoder::MessageDecoder;
use hl7_extract::app::services::record_projector::RecordProjector;
use hl7_extract::app::services::spec_table::SpecTable;
use std::path::Path;
use std::sync::Arc;

fn load_spec() -> SpecTable {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("spec/hl7_spec.json");
    SpecTable::load(&path).unwrap()
}

fn admission_message() -> String {
    let pv1 = format!(
        "PV1|1|I|4WEST^401^A^NORTHSIDE||||1234^Smith^Adam|5678^Jones^Beth{}|1500.50",
        "|".repeat(38)
    );
    [
        "MSH|^~\\&|EPIC|NORTHSIDE|BILLING|ACME|20240105083000||ADT^A01|MSG00001|P|2.3",
        "EVN|A01|20240105083000",
        "PID|1||12345^^^HOSP||Doe^John^A||19800101|M||2106-3|123 Main St^Apt 4^Springfield^IL^62701||(555) 123-4567^PRN^PH^jdoe@example.com||ENG^English|M||ACC789^^^HOSP|123-45-6789|D1234567^IL||N",
        "PD1|||NSC01^^1001",
        &pv1,
        "GT1|1||Doe^Jane^B||123 Main St^^Springfield^IL^62701",
    ]
    .join("\n")
}

fn bench_decode(c: &mut Criterion) {
    let decoder = MessageDecoder::new(Arc::new(load_spec()), "2.3", false);
    let message = admission_message();

    c.bench_function("decode admission message", |b| {
        b.iter(|| decoder.decode(&message).unwrap())
    });

    let projector = RecordProjector::for_today();
    c.bench_function("decode and project 1000 messages", |b| {
        b.iter_batched(
            || vec![message.clone(); 1000],
            |messages| {
                for text in &messages {
                    let decoded = decoder.decode(text).unwrap();
                    let _ = projector.project(&decoded);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
