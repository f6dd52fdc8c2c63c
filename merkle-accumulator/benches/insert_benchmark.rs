use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use merkle_accumulator::{
    Caller, InsertPolicy, MemAccountStore, MerkleTreeState, TreeParams, TreeProgram,
    compute_root_from_leaves,
};

fn leaves(count: u32) -> Vec<[u8; 32]> {
    (0..count)
        .map(|i| *blake3::hash(&i.to_be_bytes()).as_bytes())
        .collect()
}

fn fill(params: TreeParams, leaves: &[[u8; 32]]) -> [u8; 32] {
    let caller = Caller::signer([1u8; 32]);
    let mut slot = None;
    MerkleTreeState::initialize(&mut slot, &caller, params, InsertPolicy::AnySigner)
        .expect("initialize");
    let mut tree = slot.expect("initialized");
    for leaf in leaves {
        tree.insert_leaf(leaf, &caller).value.expect("insert");
    }
    *tree.root()
}

fn insert_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for max_leaves in [30u32, 1024, 65536] {
        let params = TreeParams::new(max_leaves).expect("params");
        let data = leaves(max_leaves.min(1024));
        group.bench_function(format!("fill_{}_of_{}", data.len(), max_leaves), |b| {
            b.iter(|| black_box(fill(params, &data)))
        });
        group.bench_function(format!("recompute_{}_of_{}", data.len(), max_leaves), |b| {
            b.iter(|| black_box(compute_root_from_leaves(&params, &data).value))
        });
    }
    group.finish();
}

fn program_benchmark(c: &mut Criterion) {
    let data = leaves(30);
    let caller = Caller::signer([1u8; 32]);
    c.bench_function("program_fill_30", |b| {
        b.iter(|| {
            let program = TreeProgram::new(MemAccountStore::new());
            let address = [2u8; 32];
            program
                .initialize(&address, &caller, TreeParams::default(), InsertPolicy::AnySigner)
                .value
                .expect("initialize");
            for leaf in &data {
                program
                    .insert_leaf(&address, leaf, &caller)
                    .value
                    .expect("insert");
            }
        })
    });
}

criterion_group!(benches, insert_benchmark, program_benchmark);
criterion_main!(benches);
