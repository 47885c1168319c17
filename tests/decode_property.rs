use proptest::prelude::*;
use trellis_hmm::{Decoder, TableHmm, TableHmmBuilder};

/// Random small instance: dense tables plus an observation sequence.
#[derive(Debug, Clone)]
struct Instance {
    n: usize,
    start: Vec<f64>,
    trans: Vec<Vec<f64>>,
    emit: Vec<Vec<f64>>,
    obs: Vec<usize>,
}

fn instances() -> impl Strategy<Value = Instance> {
    (1usize..=3, 1usize..=3).prop_flat_map(|(n, vocab)| {
        (
            Just(n),
            proptest::collection::vec(0.01f64..1.0, n),
            proptest::collection::vec(proptest::collection::vec(0.01f64..1.0, n), n),
            proptest::collection::vec(proptest::collection::vec(0.01f64..1.0, vocab), n),
            proptest::collection::vec(0..vocab, 1..=6),
        )
            .prop_map(|(n, start, trans, emit, obs)| Instance {
                n,
                start,
                trans,
                emit,
                obs,
            })
    })
}

fn table_hmm(inst: &Instance) -> TableHmm<usize, usize> {
    let mut builder = TableHmmBuilder::new().states(0..inst.n);
    for (state, &p) in inst.start.iter().enumerate() {
        builder = builder.start(state, p);
    }
    for (from, row) in inst.trans.iter().enumerate() {
        for (to, &p) in row.iter().enumerate() {
            builder = builder.transition(from, to, p);
        }
    }
    for (state, row) in inst.emit.iter().enumerate() {
        for (symbol, &p) in row.iter().enumerate() {
            builder = builder.emission(state, symbol, p);
        }
    }
    builder.build()
}

/// Joint probability of one specific state assignment, multiplied in the
/// same left-to-right order the decoder uses.
fn path_probability(inst: &Instance, path: &[usize]) -> f64 {
    let mut p = inst.start[path[0]] * inst.emit[path[0]][inst.obs[0]];
    for t in 1..path.len() {
        p = p * inst.trans[path[t - 1]][path[t]] * inst.emit[path[t]][inst.obs[t]];
    }
    p
}

/// Exhaustive maximum over all n^T assignments.
fn brute_force_best(inst: &Instance) -> f64 {
    let t_len = inst.obs.len();
    let mut assignment = vec![0usize; t_len];
    let mut best = f64::NEG_INFINITY;
    loop {
        let p = path_probability(inst, &assignment);
        if p > best {
            best = p;
        }
        let mut pos = t_len;
        let mut done = true;
        while pos > 0 {
            pos -= 1;
            assignment[pos] += 1;
            if assignment[pos] < inst.n {
                done = false;
                break;
            }
            assignment[pos] = 0;
        }
        if done {
            return best;
        }
    }
}

fn relative_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
}

proptest! {
    #[test]
    fn matches_exhaustive_enumeration(inst in instances()) {
        let decoding = Decoder::new(table_hmm(&inst)).decode(&inst.obs).unwrap();
        prop_assert_eq!(decoding.path.len(), inst.obs.len());
        let best = brute_force_best(&inst);
        prop_assert!(
            relative_eq(decoding.probability, best),
            "decoder found {}, exhaustive search found {}", decoding.probability, best
        );
    }

    #[test]
    fn returned_path_carries_the_returned_probability(inst in instances()) {
        let decoding = Decoder::new(table_hmm(&inst)).decode(&inst.obs).unwrap();
        let replayed = path_probability(&inst, &decoding.path);
        prop_assert!(
            relative_eq(decoding.probability, replayed),
            "claimed {}, path replays to {}", decoding.probability, replayed
        );
    }

    #[test]
    fn trellis_cells_are_finite_and_non_negative(inst in instances()) {
        let (_, trellis) = Decoder::new(table_hmm(&inst)).decode_traced(&inst.obs).unwrap();
        prop_assert_eq!(trellis.len(), inst.obs.len());
        for t in 0..trellis.len() {
            let column = trellis.column(t).unwrap();
            prop_assert_eq!(column.len(), inst.n);
            for &cell in column {
                prop_assert!(cell.is_finite() && cell >= 0.0, "V[{}] contains {}", t, cell);
            }
        }
    }

    #[test]
    fn decoding_is_deterministic(inst in instances()) {
        let decoder = Decoder::new(table_hmm(&inst));
        let first = decoder.decode(&inst.obs).unwrap();
        let second = decoder.decode(&inst.obs).unwrap();
        prop_assert_eq!(first, second);
    }
}
