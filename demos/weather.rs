//! Example: decoding the classic two-state weather HMM.
//!
//! Run with:
//! `cargo run --example weather`

use trellis_hmm::{Decoder, TableHmmBuilder};

fn main() {
    // Hidden weather states, observed activities. A friend reports what they
    // did on three consecutive days; we recover the most likely weather.
    let hmm = TableHmmBuilder::new()
        .states(["Rainy", "Sunny"])
        .start("Rainy", 0.6)
        .start("Sunny", 0.4)
        .transition("Rainy", "Rainy", 0.7)
        .transition("Rainy", "Sunny", 0.3)
        .transition("Sunny", "Rainy", 0.4)
        .transition("Sunny", "Sunny", 0.6)
        .emission("Rainy", "walk", 0.1)
        .emission("Rainy", "shop", 0.4)
        .emission("Rainy", "clean", 0.5)
        .emission("Sunny", "walk", 0.6)
        .emission("Sunny", "shop", 0.3)
        .emission("Sunny", "clean", 0.1)
        .build();

    let observations = ["walk", "shop", "clean"];

    let decoder = Decoder::new(hmm);
    let (decoding, trellis) = decoder
        .decode_traced(&observations)
        .expect("tables cover every state and symbol");

    println!("DP trellis:");
    println!("{trellis}");
    println!("Best path probability: {}", decoding.probability);
    println!("State sequence:");
    for (t, state) in decoding.path.iter().enumerate() {
        println!("  t = {t:2}, state = {state}");
    }
}
