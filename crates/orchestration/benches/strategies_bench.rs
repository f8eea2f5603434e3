use common::GeoPoint;
use criterion::{Criterion, criterion_group, criterion_main};
use orchestration::{Orchestrator, OrchestratorConfig, Request, Specialists, StrategyKind};

fn bench_strategies(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = Orchestrator::new(Specialists::in_memory(), OrchestratorConfig::default());

    for strategy in StrategyKind::ALL {
        let request = Request::new("bench-user", "cordless drill")
            .with_location(GeoPoint::new(47.6062, -122.3321))
            .with_strategy(strategy);

        c.bench_function(&format!("orchestration/{}", strategy.as_str().to_lowercase()), |b| {
            b.iter(|| {
                rt.block_on(async {
                    orchestrator.run(request.clone()).await.unwrap();
                });
            });
        });
    }
}

fn bench_total_outage(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let search = specialists::InMemorySearchService::new();
    let matchmaking = specialists::InMemoryMatchmakingService::new();
    let location = specialists::InMemoryLocationService::new();
    let navigation = specialists::InMemoryNavigationService::new();
    search.set_fail(true);
    matchmaking.set_fail(true);
    location.set_fail(true);
    navigation.set_fail(true);

    let orchestrator = Orchestrator::new(
        Specialists::new(
            std::sync::Arc::new(search),
            std::sync::Arc::new(matchmaking),
            std::sync::Arc::new(location),
            std::sync::Arc::new(navigation),
        ),
        OrchestratorConfig::default(),
    );
    let request = Request::new("bench-user", "cordless drill")
        .with_location(GeoPoint::new(47.6062, -122.3321))
        .with_strategy(StrategyKind::Magentic);

    c.bench_function("orchestration/magentic_total_outage", |b| {
        b.iter(|| {
            rt.block_on(async {
                orchestrator.run(request.clone()).await.unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_strategies, bench_total_outage);
criterion_main!(benches);
