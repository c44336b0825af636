use rand::{Rng, RngExt};

use crate::models::{DRAW_SIZE, MAX_NUMBER, MIN_NUMBER, POOL_SIZE, TICKET_SIZE, WinningDraw};

/// Partial Fisher-Yates: after the call, `pool[..count]` is a uniform random
/// selection without replacement. Only `count` swaps are performed.
pub(crate) fn partial_shuffle(pool: &mut [u8], count: usize, rng: &mut impl Rng) {
    let len = pool.len();
    for i in 0..count.min(len) {
        let j = rng.random_range(i..len);
        pool.swap(i, j);
    }
}

fn full_pool() -> [u8; POOL_SIZE] {
    let mut pool = [0u8; POOL_SIZE];
    for (slot, n) in pool.iter_mut().zip(MIN_NUMBER..=MAX_NUMBER) {
        *slot = n;
    }
    pool
}

/// Draws 6 distinct numbers in ascending order, or 7 when `include_bonus` is
/// set, in which case the 7th is the bonus and stays last.
pub fn generate_draw(include_bonus: bool, rng: &mut impl Rng) -> Vec<u8> {
    let limit = if include_bonus { DRAW_SIZE } else { TICKET_SIZE };
    let mut pool = full_pool();
    partial_shuffle(&mut pool, limit, rng);

    let mut numbers = pool[..limit].to_vec();
    numbers[..TICKET_SIZE].sort_unstable();
    numbers
}

pub fn draw_winning(rng: &mut impl Rng) -> WinningDraw {
    let numbers = generate_draw(true, rng);
    let mut main = [0u8; TICKET_SIZE];
    main.copy_from_slice(&numbers[..TICKET_SIZE]);
    WinningDraw::from_parts_unchecked(main, numbers[TICKET_SIZE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_valid(numbers: &[u8]) {
        for &n in numbers {
            assert!((1..=45).contains(&n), "{} out of range", n);
        }
        let mut sorted = numbers.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), numbers.len(), "duplicate in {:?}", numbers);
    }

    #[test]
    fn test_generate_without_bonus() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let numbers = generate_draw(false, &mut rng);
            assert_eq!(numbers.len(), 6);
            assert_valid(&numbers);
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_generate_with_bonus() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let numbers = generate_draw(true, &mut rng);
            assert_eq!(numbers.len(), 7);
            assert_valid(&numbers);
            assert!(numbers[..6].windows(2).all(|w| w[0] < w[1]));
            assert!(!numbers[..6].contains(&numbers[6]));
        }
    }

    #[test]
    fn test_generate_deterministic_with_seed() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        assert_eq!(generate_draw(true, &mut rng1), generate_draw(true, &mut rng2));
    }

    #[test]
    fn test_draw_winning_matches_generate_draw() {
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        let draw = draw_winning(&mut rng1);
        assert_eq!(draw.numbers().to_vec(), generate_draw(true, &mut rng2));
    }

    #[test]
    fn test_every_number_reachable() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 46];
        for _ in 0..2_000 {
            for n in generate_draw(true, &mut rng) {
                seen[n as usize] = true;
            }
        }
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_partial_shuffle_keeps_elements() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = [1u8, 2, 3, 4, 5];
        partial_shuffle(&mut pool, 10, &mut rng);
        let mut sorted = pool;
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 3, 4, 5]);
    }
}
