use std::path::PathBuf;
use std::process::ExitCode;

use glyph_mlp::{Hyperparameters, LogListener, NetworkBuilder, Pattern, Result};

/// 3x3 glyphs, `#` is ink.
const GLYPHS: [(&str, &str); 4] = [
    ("bar", ".#..#..#."),
    ("dash", "...###..."),
    ("slash", "..#.#.#.."),
    ("backslash", "#...#...#"),
];

fn pixels(glyph: &str) -> Vec<f64> {
    glyph
        .chars()
        .map(|c| if c == '#' { 1.0 } else { -1.0 })
        .collect()
}

fn run(weights_path: PathBuf) -> Result<()> {
    let mut network = NetworkBuilder::new(9, 6, GLYPHS.len())?
        .hyperparameters(Hyperparameters {
            learning_rate: 0.5,
            minimum_error: 0.05,
            max_epochs: 5_000,
        })?
        .build_with_seed(42);

    for (id, (name, glyph)) in GLYPHS.iter().enumerate() {
        network.add_pattern(*name, pixels(glyph), Pattern::class_target(id + 1, GLYPHS.len())?)?;
    }

    let report = network.train_with(&mut LogListener)?;
    println!(
        "trained {} passes, mean error {:.5}",
        report.passes(),
        report.mean_error
    );

    for (id, (name, glyph)) in GLYPHS.iter().enumerate() {
        let evaluation = network.evaluate_class(&pixels(glyph), id)?;
        println!(
            "{name:>9}:{} -> {} (rating {:.1})",
            network.formatted_outputs(),
            if evaluation.is_correct() { "ok" } else { "wrong" },
            evaluation.rating()
        );
    }

    if let Some(parent) = weights_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    network.save_weights(&weights_path)?;
    println!("weights written to {}", weights_path.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let weights_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/glyphs.weights"));

    match run(weights_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
