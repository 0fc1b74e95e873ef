use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::{LoginCredentials, SignupCredentials};
use service::auth::repository::memory::InMemoryIdentityRepository;
use service::auth::AuthService;
use service::random::SeededRandom;
use service::scoring::score_resume;

fn bench_login(c: &mut Criterion) {
    let svc = AuthService::new(Arc::new(InMemoryIdentityRepository::new()));

    // register outside of the measured loop
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(svc.register(SignupCredentials::new("bench@example.com", "Benchmark1", "Bench")))
        .unwrap();

    c.bench_function("auth_login_verify", |b| {
        b.to_async(&rt).iter(|| async {
            svc.authenticate(LoginCredentials::new("bench@example.com", "Benchmark1"))
                .await
                .unwrap()
        });
    });
}

fn bench_scoring(c: &mut Criterion) {
    let rng = SeededRandom::from_seed(42);
    c.bench_function("score_resume", |b| b.iter(|| score_resume(&rng)));
}

criterion_group!(benches, bench_login, bench_scoring);
criterion_main!(benches);
