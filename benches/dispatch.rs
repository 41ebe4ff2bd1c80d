//! Benchmarks for the per-keystroke paths
//!
//! - Building the effective binding table from defaults plus user config
//! - Key spec parsing
//! - Dispatching single keys and multi-key sequences
//!
//! Run with: cargo bench dispatch

use std::collections::BTreeMap;

use chordmap::keymap::{
    build, default_bindings, parse_key_sequence, ActionRegistry, BindingConfig, ComboConfig,
    FailedOverride, KeyChord, Keymap,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// User config with `n` extra two-key bindings and a few combos
fn user_config(n: usize) -> (BindingConfig, ComboConfig) {
    let mut bindings = BTreeMap::new();
    let mut combos = BTreeMap::new();
    for i in 0..n {
        let c = char::from(b'a' + (i % 26) as u8);
        let d = char::from(b'a' + ((i / 26) % 26) as u8);
        bindings.insert(format!("M-{} C-{}", c, d), format!("Finish{}", i));
    }
    combos.insert(
        "DownAndFinish".to_string(),
        vec!["SelectDown".to_string(), "Finish".to_string()],
    );
    bindings.insert("C-j".to_string(), "DownAndFinish".to_string());
    bindings.insert("C-p".to_string(), "-".to_string());
    (bindings, combos)
}

// ============================================================================
// Building
// ============================================================================

#[divan::bench(args = [0, 100, 600])]
fn build_binding_table(bencher: divan::Bencher, extra: usize) {
    let defaults = default_bindings();
    let (bindings, combos) = user_config(extra);
    bencher.bench_local(|| {
        let mut registry = ActionRegistry::new();
        let report = build(
            &defaults,
            &bindings,
            &combos,
            &mut registry,
            FailedOverride::Drop,
        );
        divan::black_box(report.bindings.len())
    });
}

#[divan::bench]
fn parse_specs() {
    for spec in ["q", "C-x C-s", "M-C-x ArrowUp F12 PgDn"] {
        divan::black_box(parse_key_sequence(divan::black_box(spec)).ok());
    }
}

// ============================================================================
// Dispatch
// ============================================================================

#[divan::bench]
fn dispatch_plain_chars(bencher: divan::Bencher) {
    let keymap = Keymap::with_defaults();
    let mut dispatcher = keymap.dispatcher();
    let chars: Vec<_> = "the quick brown fox".chars().map(KeyChord::char).collect();
    bencher.bench_local(|| {
        for chord in &chars {
            divan::black_box(dispatcher.handle(*chord));
        }
    });
}

#[divan::bench]
fn dispatch_sequence(bencher: divan::Bencher) {
    let keymap = Keymap::with_defaults();
    let mut dispatcher = keymap.dispatcher();
    let sequence = [KeyChord::ctrl('x'), KeyChord::ctrl('s')];
    bencher.bench_local(|| {
        for chord in &sequence {
            divan::black_box(dispatcher.handle(*chord));
        }
    });
}

#[divan::bench]
fn compile_matcher(bencher: divan::Bencher) {
    let keymap = Keymap::with_defaults();
    bencher.bench_local(|| divan::black_box(keymap.matcher()));
}
