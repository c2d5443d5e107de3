use bitmask_dp::utils::fast_power;
use bitmask_dp::InvalidInput;
use proptest::prelude::*;

fn naive(base: u64, exp: u64, modulus: u64) -> u64 {
    let m = u128::from(modulus);
    let b = u128::from(base) % m;
    (0..exp).fold(1 % m, |acc, _| acc * b % m) as u64
}

#[test]
fn reference_values() {
    assert_eq!(fast_power(3, 5, 100), Ok(43));
    assert_eq!(fast_power(2, 10, 1_000_000_007), Ok(1024));
    assert_eq!(fast_power(7, 0, 1), Ok(0));
    assert_eq!(fast_power(1, 5, 0), Err(InvalidInput::ZeroModulus));
}

proptest! {
    #[test]
    fn matches_repeated_multiplication(
        base in any::<u64>(),
        exp in 0u64..300,
        modulus in 1u64..=u64::MAX,
    ) {
        prop_assert_eq!(fast_power(base, exp, modulus), Ok(naive(base, exp, modulus)));
    }

    #[test]
    fn exponents_add(
        base in any::<u64>(),
        e1 in any::<u32>(),
        e2 in any::<u32>(),
        modulus in 1u64..=u64::MAX,
    ) {
        let (e1, e2) = (u64::from(e1), u64::from(e2));
        let lhs = fast_power(base, e1 + e2, modulus).unwrap();
        let a = u128::from(fast_power(base, e1, modulus).unwrap());
        let b = u128::from(fast_power(base, e2, modulus).unwrap());
        prop_assert_eq!(u128::from(lhs), a * b % u128::from(modulus));
    }

    #[test]
    fn result_is_reduced(base in any::<u64>(), exp in any::<u64>(), modulus in 1u64..=u64::MAX) {
        prop_assert!(fast_power(base, exp, modulus).unwrap() < modulus);
    }
}
