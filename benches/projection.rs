use divan::{Bencher, black_box};
use xbar::Tree;
use xbar::catalog::{clause, noun, preposition, verb};

fn main() {
    divan::main();
}

/// "the stern son of Morwen ... threw himself onto his sword", inside a clause
fn build_sentence(tree: &mut Tree) -> xbar::Projection {
    let subject = noun("son")
        .specifier("the")
        .complement("of Morwen")
        .adjuncts(["stern", "in the dragon-helm", "who slew Glaurung"])
        .build(tree)
        .unwrap();
    let sword = noun("sword").specifier("his").build(tree).unwrap();
    let pp = preposition("onto").complement(&sword).build(tree).unwrap();
    let vp = verb("threw")
        .specifier(&subject)
        .complement("himself")
        .complement(&pp)
        .build(tree)
        .unwrap();
    clause(tree, &vp).unwrap()
}

#[divan::bench]
fn build(bencher: Bencher) {
    bencher.bench_local(|| {
        let mut tree = Tree::new();
        black_box(build_sentence(&mut tree));
    });
}

#[divan::bench]
fn serialize(bencher: Bencher) {
    let mut tree = Tree::new();
    let cp = build_sentence(&mut tree);
    bencher.bench_local(|| black_box(tree.serialize(black_box(cp.root()))));
}

#[divan::bench]
fn words(bencher: Bencher) {
    let mut tree = Tree::new();
    let cp = build_sentence(&mut tree);
    bencher.bench_local(|| black_box(tree.words(black_box(cp.root())).len()));
}

/// Every ordered pair of nodes
#[divan::bench(sample_count = 20)]
fn governs_all_pairs(bencher: Bencher) {
    let mut tree = Tree::new();
    let cp = build_sentence(&mut tree);
    let mut nodes = tree.subtrees(cp.root());
    nodes.extend(tree.terminals(cp.root()));
    bencher.bench_local(|| {
        let mut count = 0;
        for &a in &nodes {
            for &b in &nodes {
                if tree.governs(a, b) {
                    count += 1;
                }
            }
        }
        black_box(count)
    });
}
