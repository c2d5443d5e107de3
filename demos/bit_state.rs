//! Example: compressing a boolean array into one integer.
//!
//! Run with:
//! `cargo run --example bit_state`

use bitmask_dp::BitState;

fn main() {
    // Binary 1101, decimal 13.
    let mut state = BitState::from_bools(&[true, false, true, true]);
    println!("state = {} ({:b})", state.bits(), state);
    println!("bit 2 = {}", u8::from(state.get(2)));

    state.toggle(1);
    state.clear(3);
    println!("after toggle(1), clear(3): {:?}", state);
    println!("members: {:?}", state.iter_ones().collect::<Vec<_>>());
    println!("visited count: {}", state.count_ones());
}
