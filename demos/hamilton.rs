//! Example: shortest Hamiltonian path via the layered engine.
//!
//! Run with:
//! `cargo run --example hamilton`

use bitmask_dp::problems::hamilton::{shortest_path, solve, WeightMatrix};

fn main() {
    // 0 -> 1 -> 2 costs 10 + 10; going through the 100-edge never pays off.
    let weights = vec![vec![0, 10, 100], vec![10, 0, 10], vec![100, 10, 0]];

    match solve(3, &weights) {
        Ok(cost) => println!("Minimum Hamiltonian path cost: {cost}"),
        Err(err) => {
            eprintln!("invalid input: {err}");
            std::process::exit(1);
        }
    }

    // A one-way street: only 0 -> 2 -> 1 -> 3 is cheap.
    let rows = vec![
        vec![None, Some(9), Some(1), None],
        vec![None, None, None, Some(1)],
        vec![None, Some(1), None, Some(9)],
        vec![None, None, None, None],
    ];
    let matrix = match WeightMatrix::from_optional_rows(&rows) {
        Ok(matrix) => matrix,
        Err(err) => {
            eprintln!("invalid input: {err}");
            std::process::exit(1);
        }
    };
    match shortest_path(&matrix) {
        Some((cost, path)) => {
            println!("Directed graph cost: {cost}");
            println!("Visiting order: {path:?}");
        }
        None => println!("No Hamiltonian path from 0 to {}", matrix.n() - 1),
    }
}
