//! Example: modular exponentiation.
//!
//! Run with:
//! `cargo run --example fast_power`

use bitmask_dp::utils::fast_power;

fn main() {
    for (a, b, p) in [(3, 5, 100), (2, 1_000_000_000, 1_000_000_007), (7, 0, 1)] {
        match fast_power(a, b, p) {
            Ok(v) => println!("{a}^{b} mod {p} = {v}"),
            Err(err) => eprintln!("{a}^{b} mod {p}: {err}"),
        }
    }
}
