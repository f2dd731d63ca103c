//! Every leaf of every tree shape proves into its root, including the carried
//! tails of non-power-of-two trees.

use proptest::prelude::*;
use tapswap::tree::leaf_hashes;
use tapswap::{build_tree, generate_all_proofs, generate_proof, merkle_root, verify_proof, MastError};

/// Distinct two-byte scripts so no two leaves share a hash.
fn scripts(n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|i| vec![(i & 0xff) as u8, (i >> 8) as u8]).collect()
}

fn assert_all_leaves_prove(n: usize) {
    let s = scripts(n);
    let root = build_tree(&s).expect("root");
    let proofs = generate_all_proofs(&s).expect("proofs");
    assert_eq!(proofs.len(), n);
    for (i, proof) in proofs.iter().enumerate() {
        assert_eq!(verify_proof(&s[i], proof), root, "n={} i={}", n, i);
    }
}

#[test]
fn small_trees_every_index() {
    for n in 1..=256 {
        assert_all_leaves_prove(n);
    }
}

#[test]
fn stepped_sizes_every_index() {
    for n in (257..1600).step_by(97) {
        assert_all_leaves_prove(n);
    }
}

/// Every leaf count up to 1600, checking the first, last and a middle index of each.
/// Slow in debug builds: `cargo test --release -- --ignored`.
#[test]
#[ignore]
fn every_leaf_count_to_sixteen_hundred() {
    for n in 1..=1600 {
        let s = scripts(n);
        let root = build_tree(&s).expect("root");
        for i in [0, n / 2, n - 1] {
            let proof = generate_proof(&s, i).expect("proof");
            assert_eq!(verify_proof(&s[i], &proof), root, "n={} i={}", n, i);
        }
    }
}

#[test]
fn around_sixteen_hundred_every_index() {
    assert_all_leaves_prove(1600);
    assert_all_leaves_prove(1601);
}

#[test]
fn power_of_two_proofs_have_log_length() {
    for exp in 0..=10u32 {
        let n = 1usize << exp;
        let s = scripts(n);
        for proof in generate_all_proofs(&s).expect("proofs") {
            assert_eq!(proof.len(), exp as usize, "n={}", n);
        }
    }
}

#[test]
fn merkle_root_matches_build_tree() {
    let s = scripts(37);
    assert_eq!(merkle_root(&leaf_hashes(&s)), build_tree(&s));
}

#[test]
fn empty_inputs() {
    let empty: Vec<Vec<u8>> = Vec::new();
    assert_eq!(build_tree(&empty), Err(MastError::EmptyTree));
    assert_eq!(generate_all_proofs(&empty), Err(MastError::EmptyTree));
    assert_eq!(
        generate_proof(&empty, 0),
        Err(MastError::IndexOutOfRange { index: 0, leaves: 0 })
    );
}

#[test]
fn proof_for_another_leaf_misses_the_root() {
    let s = scripts(9);
    let root = build_tree(&s).expect("root");
    let proof = generate_proof(&s, 3).expect("proof");
    assert_ne!(verify_proof(&s[8], &proof), root);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: a single proof for a random index verifies against the root.
    #[test]
    fn prop_random_index_verifies(n in 1usize..2048, pick in any::<prop::sample::Index>()) {
        let s = scripts(n);
        let index = pick.index(n);
        let root = build_tree(&s).expect("root");
        let proof = generate_proof(&s, index).expect("proof");
        prop_assert_eq!(verify_proof(&s[index], &proof), root);
    }

    /// Property: any index at or past the leaf count is rejected.
    #[test]
    fn prop_out_of_range_rejected(n in 1usize..512, extra in 0usize..64) {
        let s = scripts(n);
        prop_assert_eq!(
            generate_proof(&s, n + extra),
            Err(MastError::IndexOutOfRange { index: n + extra, leaves: n })
        );
    }
}
