use std::hint::black_box;
use std::time::Duration;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use option_pricing::prelude::*;

fn bench_binomial(c: &mut Criterion) {
  let mut group = c.benchmark_group("Binomial");
  group.measurement_time(Duration::from_secs(3));

  for steps in [100usize, 500, 2_000] {
    group.bench_with_input(BenchmarkId::new("american_put", steps), &steps, |b, &steps| {
      let pricer = BinomialPricer::crr(100.0, 0.2, 100.0, 0.05, steps, 1.0, OptionType::Put).unwrap();
      b.iter(|| black_box(pricer.calculate_price().unwrap()));
    });
  }

  group.finish();
}

fn bench_black_scholes(c: &mut Criterion) {
  c.bench_function("BlackScholes/call_put", |b| {
    let pricer = BSMPricer::builder(100.0, 0.2, 100.0, 0.05).tau(1.0).build();
    b.iter(|| black_box(pricer.calculate_call_put().unwrap()));
  });

  c.bench_function("Greeks/all", |b| {
    let pricer = BSMPricer::builder(100.0, 0.2, 100.0, 0.05).tau(1.0).build();
    b.iter(|| black_box(pricer.greeks().unwrap()));
  });
}

fn bench_monte_carlo(c: &mut Criterion) {
  let mut group = c.benchmark_group("MonteCarlo");
  group.measurement_time(Duration::from_secs(5));
  let paths = 1_000_000usize;
  let pricer = MonteCarloPricer::new(
    100.0,
    0.2,
    100.0,
    0.05,
    paths,
    Some(42),
    Some(1.0),
    None,
    None,
    OptionType::Call,
  );

  group.bench_with_input(BenchmarkId::new("sequential", paths), &paths, |b, _| {
    b.iter(|| black_box(pricer.estimate().unwrap()));
  });

  group.bench_with_input(BenchmarkId::new("par_16", paths), &paths, |b, _| {
    b.iter(|| black_box(pricer.estimate_par(16).unwrap()));
  });

  group.finish();
}

criterion_group!(
  benches,
  bench_binomial,
  bench_black_scholes,
  bench_monte_carlo
);
criterion_main!(benches);
