//! Example: maximise the output of a bitwise gate chain.
//!
//! Run with:
//! `cargo run --example max_attack`

use bitmask_dp::problems::max_attack::{max_attack, Gate};

fn main() {
    let lines = ["AND 5", "OR 6", "XOR 7"];
    let gates = match lines
        .iter()
        .map(|l| l.parse::<Gate>())
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(gates) => gates,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let budget = 10;

    let (initial, attack) = max_attack(&gates, budget);
    println!("Gates: {}", lines.join(", "));
    println!("Budget: {budget}");
    println!("Best initial value: {initial}");
    println!("Maximum final value: {attack}");
}
