use core::hash::BuildHasher;
use core::hash::Hash;
use core::hint::black_box;

use chain_hash::ChainedHashMap;
use chain_hash::Config;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

#[derive(Clone, Copy, Default)]
struct SipBuilder;

impl BuildHasher for SipBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

trait BenchKey: Hash + Eq + Clone {
    fn new(key: u64) -> Self;
}

impl BenchKey for u64 {
    fn new(key: u64) -> Self {
        black_box(key)
    }
}

impl BenchKey for String {
    fn new(key: u64) -> Self {
        black_box(format!("key_{:016X}", key))
    }
}

const SIZES: &[usize] = &[
    (1 << 8),
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
];

const THRESHOLDS: &[f64] = &[0.5, 2.0];

fn chained<K: BenchKey>(resize_threshold: f64) -> ChainedHashMap<K, u64, SipBuilder> {
    let config = Config::default().with_resize_threshold(resize_threshold);
    ChainedHashMap::with_config(config).unwrap()
}

fn random_keys<K: BenchKey>(count: usize) -> Vec<(K, u64)> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            let key = rng.try_next_u64().unwrap();
            (K::new(key), key)
        })
        .collect()
}

fn bench_insert_random<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "insert_random_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let items = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        for &threshold in THRESHOLDS {
            group.bench_function(format!("chain_hash_{threshold}/{size}"), |b| {
                b.iter_batched(
                    || {
                        let mut items = items.clone();
                        items.shuffle(&mut SmallRng::from_os_rng());
                        items
                    },
                    |items| {
                        let mut map = chained::<K>(threshold);
                        for (k, v) in items {
                            black_box(map.insert(k, v));
                        }
                        black_box(map)
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut items = items.clone();
                    items.shuffle(&mut SmallRng::from_os_rng());
                    items
                },
                |items| {
                    let mut map = HashbrownMap::with_hasher(SipBuilder);
                    for (k, v) in items {
                        black_box(map.insert(k, v));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut items = items.clone();
                    items.shuffle(&mut SmallRng::from_os_rng());
                    items
                },
                |items| {
                    let mut map = std::collections::HashMap::with_hasher(SipBuilder);
                    for (k, v) in items {
                        black_box(map.insert(k, v));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit_miss<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "find_hit_miss_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let present = random_keys::<K>(size);
        let mut probes: Vec<K> = present.iter().map(|(k, _)| k.clone()).collect();
        probes.extend(random_keys::<K>(size).into_iter().map(|(k, _)| k));
        probes.shuffle(&mut SmallRng::from_os_rng());

        group.throughput(Throughput::Elements(probes.len() as u64));

        for &threshold in THRESHOLDS {
            let mut map = chained::<K>(threshold);
            map.extend(present.iter().cloned());
            group.bench_function(format!("chain_hash_{threshold}/{size}"), |b| {
                b.iter(|| {
                    for key in &probes {
                        black_box(map.get(key));
                    }
                })
            });
        }

        let mut map = HashbrownMap::with_hasher(SipBuilder);
        map.extend(present.iter().cloned());
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &probes {
                    black_box(map.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let items = random_keys::<K>(size);
        let mut order: Vec<K> = items.iter().map(|(k, _)| k.clone()).collect();
        order.shuffle(&mut SmallRng::from_os_rng());

        group.throughput(Throughput::Elements(size as u64));

        for &threshold in THRESHOLDS {
            let mut map = chained::<K>(threshold);
            map.extend(items.iter().cloned());
            group.bench_function(format!("chain_hash_{threshold}/{size}"), |b| {
                b.iter_batched(
                    || map.clone(),
                    |mut map| {
                        for key in &order {
                            black_box(map.remove(key));
                        }
                        black_box(map)
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        let mut map = HashbrownMap::with_hasher(SipBuilder);
        map.extend(items.iter().cloned());
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || map.clone(),
                |mut map| {
                    for key in &order {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let items = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        for &threshold in THRESHOLDS {
            let mut map = chained::<K>(threshold);
            map.extend(items.iter().cloned());
            group.bench_function(format!("chain_hash_{threshold}/{size}"), |b| {
                b.iter(|| {
                    for entry in map.iter() {
                        black_box(entry);
                    }
                })
            });
        }

        let mut map = HashbrownMap::with_hasher(SipBuilder);
        map.extend(items.iter().cloned());
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for entry in map.iter() {
                    black_box(entry);
                }
            })
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Remove,
    Find,
}

fn bench_mixed_zipf<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("mixed_zipf_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let mut rng = SmallRng::from_os_rng();
        let op_distr = Zipf::new(3.0, 1.0).unwrap();
        let key_distr = Zipf::new(size as f64 * 2.0 - 1.0, 1.0).unwrap();

        let operations = (0..size * 3)
            .map(|_| {
                let op_choice: f64 = rng.sample(op_distr);
                let key = K::new(rng.sample(key_distr) as u64);
                let operation = if op_choice <= 1.0 {
                    Operation::Find
                } else if op_choice <= 2.0 {
                    Operation::Insert
                } else {
                    Operation::Remove
                };
                (operation, key)
            })
            .collect::<Vec<(Operation, K)>>();

        group.throughput(Throughput::Elements(operations.len() as u64));

        for &threshold in THRESHOLDS {
            group.bench_function(format!("chain_hash_{threshold}/{size}"), |b| {
                b.iter_batched(
                    || operations.clone(),
                    |operations| {
                        let mut map = chained::<K>(threshold);
                        for (i, (operation, key)) in operations.into_iter().enumerate() {
                            match operation {
                                Operation::Insert => {
                                    black_box(map.insert(key, i as u64));
                                }
                                Operation::Remove => {
                                    black_box(map.remove(&key));
                                }
                                Operation::Find => {
                                    black_box(map.get(&key));
                                }
                            }
                        }
                        black_box(map)
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut map = HashbrownMap::with_hasher(SipBuilder);
                    for (i, (operation, key)) in operations.into_iter().enumerate() {
                        match operation {
                            Operation::Insert => {
                                black_box(map.insert(key, i as u64));
                            }
                            Operation::Remove => {
                                black_box(map.remove(&key));
                            }
                            Operation::Find => {
                                black_box(map.get(&key));
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<u64>,
    bench_insert_random::<String>,
    bench_find_hit_miss::<u64>,
    bench_find_hit_miss::<String>,
    bench_remove::<u64>,
    bench_remove::<String>,
    bench_iteration::<u64>,
    bench_iteration::<String>,
    bench_mixed_zipf::<u64>,
    bench_mixed_zipf::<String>,
);

criterion_main!(benches);
