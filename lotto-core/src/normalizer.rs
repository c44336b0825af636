use rand::Rng;

use crate::error::{LottoError, Result};
use crate::generator::partial_shuffle;
use crate::models::{MAX_NUMBER, MIN_NUMBER, POOL_SIZE, TICKET_SIZE, Ticket};

/// Completes up to six user picks into a full ticket.
///
/// The length check runs on the raw input, so seven picks are rejected even
/// if they collapse to six distinct values. Missing slots are filled from the
/// numbers the user did not pick.
pub fn complete_ticket(user_numbers: &[u8], rng: &mut impl Rng) -> Result<Ticket> {
    if user_numbers.len() > TICKET_SIZE {
        return Err(LottoError::Overflow(user_numbers.len()));
    }

    let mut picked = [false; POOL_SIZE + 1];
    let mut chosen: Vec<u8> = Vec::with_capacity(TICKET_SIZE);
    for &n in user_numbers {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
            return Err(LottoError::OutOfRange(n));
        }
        if !picked[n as usize] {
            picked[n as usize] = true;
            chosen.push(n);
        }
    }

    let needed = TICKET_SIZE - chosen.len();
    if needed > 0 {
        let mut available: Vec<u8> = (MIN_NUMBER..=MAX_NUMBER)
            .filter(|&n| !picked[n as usize])
            .collect();
        partial_shuffle(&mut available, needed, rng);
        chosen.extend_from_slice(&available[..needed]);
    }

    let mut numbers = [0u8; TICKET_SIZE];
    numbers.copy_from_slice(&chosen);
    numbers.sort_unstable();
    Ok(Ticket::from_sorted_unchecked(numbers))
}
