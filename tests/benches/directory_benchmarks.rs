//! # Roster Directory Benchmarks
//!
//! | Path | Work per iteration |
//! |------|--------------------|
//! | Signature verification | base64 decode + Ed25519 verify |
//! | Entry validation | freshness + two chained verifications |
//! | Admission | pre-check + atomic replace on the in-memory store |
//! | Sibling listing | prefix scan + decode + sort |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rd_01_entry_validation::test_utils::EntrySigner;
use rd_01_entry_validation::{member_message, EntryValidator, MessageFraming};
use rd_02_record_store::{InMemoryEntryRepository, RecordStore};
use shared_crypto::{verify_encoded, Ed25519KeyPair};
use tokio::runtime::Runtime;

const T: u64 = 1_700_000_000_000;

fn bench_signature_verification(c: &mut Criterion) {
    let signer = EntrySigner::new(Ed25519KeyPair::from_seed([7; 32]));
    let member = signer.member("member-key", "metadata");
    let message = member_message(MessageFraming::Concatenated, &member);
    let authority = signer.authority_key();

    c.bench_function("verify_encoded", |b| {
        b.iter(|| {
            black_box(verify_encoded(
                black_box(&authority),
                black_box(&member.signature),
                black_box(&message),
            ))
        })
    });
}

fn bench_entry_validation(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let signer = EntrySigner::new(Ed25519KeyPair::from_seed([7; 32]));
    let entry = signer.entry("member-key", "metadata", "payload", T);
    let validator = EntryValidator::default();

    c.bench_function("validate_entry", |b| {
        b.iter(|| rt.block_on(async { black_box(validator.validate(&entry, T).await) }))
    });
}

fn bench_record_store(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let signer = EntrySigner::new(Ed25519KeyPair::from_seed([7; 32]));

    let mut group = c.benchmark_group("record-store");

    let store = RecordStore::new(InMemoryEntryRepository::in_memory());
    let entry = signer.entry("member-key", "metadata", "payload", T);
    group.bench_function("admit_replace", |b| {
        b.iter(|| rt.block_on(async { black_box(store.admit(&entry).await) }))
    });

    for size in [10, 100, 1000] {
        let store = RecordStore::new(InMemoryEntryRepository::in_memory());
        rt.block_on(async {
            for i in 0..size {
                let e = signer.entry(&format!("member-{}", i), "m", "d", T);
                store.admit(&e).await.expect("seed admit");
            }
        });
        let authority = signer.authority_key();

        group.bench_with_input(BenchmarkId::new("list_siblings", size), &size, |b, _| {
            b.iter(|| rt.block_on(async { black_box(store.list_siblings(&authority, "member-0").await) }))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_signature_verification,
    bench_entry_validation,
    bench_record_store
);
criterion_main!(benches);
