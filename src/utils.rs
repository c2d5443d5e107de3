//! Assorted utilities and helpers.

use crate::error::InvalidInput;

/// Compute `base^exp mod modulus` by square-and-multiply.
///
/// Products are formed in `u128`, so any `u64` inputs are safe.
///
/// ```
/// use bitmask_dp::utils::fast_power;
///
/// assert_eq!(fast_power(3, 5, 100), Ok(43));
/// ```
pub fn fast_power(base: u64, exp: u64, modulus: u64) -> Result<u64, InvalidInput> {
    if modulus == 0 {
        return Err(InvalidInput::ZeroModulus);
    }
    let p = u128::from(modulus);
    let mut a = u128::from(base) % p;
    let mut b = exp;
    let mut ans = 1 % p;
    while b > 0 {
        if b & 1 == 1 {
            ans = ans * a % p;
        }
        a = a * a % p;
        b >>= 1;
    }
    // ans < modulus, so it fits.
    Ok(ans as u64)
}

/// Pascal's triangle `C(i, j)` for `0 <= j <= i <= n`, row-major.
pub(crate) fn binomial_table(n: usize) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; n + 1]; n + 1];
    for i in 0..=n {
        table[i][0] = 1;
        for j in 1..=i {
            table[i][j] = table[i - 1][j - 1] + if j < i { table[i - 1][j] } else { 0 };
        }
    }
    table
}
