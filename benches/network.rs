use criterion::{Criterion, black_box, criterion_group, criterion_main};

use glyph_mlp::{Hyperparameters, Network, NetworkBuilder, Pattern};

fn glyph_input(seed: usize, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| if (i * 7 + seed * 13) % 5 < 2 { 1.0 } else { -1.0 })
        .collect()
}

fn network_forward_bench(c: &mut Criterion) {
    let mut network = Network::new_with_seed(1024, 512, 92, 0).unwrap();
    network.reset_weights();
    let input = glyph_input(0, network.input_len());

    c.bench_function("network_evaluate_1024_512_92", |b| {
        b.iter(|| {
            let out = network.evaluate(black_box(&input)).unwrap();
            black_box(out);
        })
    });
}

fn network_epoch_bench(c: &mut Criterion) {
    let classes = 10;
    let mut network = NetworkBuilder::new(64, 32, classes)
        .unwrap()
        .hyperparameters(Hyperparameters {
            learning_rate: 0.2,
            minimum_error: 0.0,
            max_epochs: 1,
        })
        .unwrap()
        .build_with_seed(0);
    for class in 1..=classes {
        network
            .add_pattern(
                format!("class-{class}"),
                glyph_input(class, 64),
                Pattern::class_target(class, classes).unwrap(),
            )
            .unwrap();
    }

    c.bench_function("network_train_one_epoch_64_32_10", |b| {
        b.iter(|| {
            let report = network.train().unwrap();
            black_box(report);
        })
    });
}

criterion_group!(benches, network_forward_bench, network_epoch_bench);
criterion_main!(benches);
