//! Prime sizing for the backing slot array.
//!
//! Table capacities are always prime so that every secondary hash in
//! `[1, capacity - 1]` is coprime with the capacity.

/// Returns `true` if `n` is prime.
///
/// 0 and 1 are not prime; 2 and 3 are.
pub fn is_prime(n: usize) -> bool {
    match n {
        0 | 1 => false,
        2 | 3 => true,
        _ if n % 2 == 0 => false,
        _ => {
            let mut d = 3;
            // d <= n / d avoids overflowing d * d near usize::MAX
            while d <= n / d {
                if n % d == 0 {
                    return false;
                }
                d += 2;
            }
            true
        }
    }
}

/// Smallest prime `>= n`
pub fn next_prime(mut n: usize) -> usize {
    while !is_prime(n) {
        n += 1;
    }
    n
}
