use crate::error::{LottoError, Result};
use crate::models::{DRAW_SIZE, MatchResult, TICKET_SIZE, WinningRank};

/// Scores a ticket against a draw laid out as six main numbers then the bonus.
///
/// Rank depends only on the main-match count (plus the bonus for 2nd place),
/// but `matched_numbers` always carries the bonus when it matched, even for
/// a ticket that wins nothing.
pub fn evaluate(ticket: &[u8], draw: &[u8]) -> Result<MatchResult> {
    if ticket.len() != TICKET_SIZE || draw.len() != DRAW_SIZE {
        return Err(LottoError::InvalidInput {
            ticket: ticket.len(),
            draw: draw.len(),
        });
    }

    let main = &draw[..TICKET_SIZE];
    let bonus = draw[TICKET_SIZE];

    let mut matched_numbers: Vec<u8> = ticket.iter().copied().filter(|n| main.contains(n)).collect();
    matched_numbers.sort_unstable();
    matched_numbers.dedup();
    let main_matches = matched_numbers.len();

    let has_bonus = ticket.contains(&bonus);
    if has_bonus {
        matched_numbers.push(bonus);
    }

    let rank = match (main_matches, has_bonus) {
        (6, _) => WinningRank::First,
        (5, true) => WinningRank::Second,
        (5, false) => WinningRank::Third,
        (4, _) => WinningRank::Fourth,
        (3, _) => WinningRank::Fifth,
        _ => WinningRank::None,
    };

    Ok(MatchResult {
        rank,
        matched_numbers,
        message: rank.message(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAW: [u8; 7] = [1, 2, 3, 4, 5, 6, 7];

    #[test]
    fn test_first_rank() {
        let result = evaluate(&[1, 2, 3, 4, 5, 6], &DRAW).unwrap();
        assert_eq!(result.rank, WinningRank::First);
        assert_eq!(result.message, "1등당첨");
        assert_eq!(result.matched_numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_second_rank_bonus_last() {
        let result = evaluate(&[1, 2, 3, 4, 5, 7], &DRAW).unwrap();
        assert_eq!(result.rank, WinningRank::Second);
        assert_eq!(result.message, "2등당첨");
        assert_eq!(result.matched_numbers, vec![1, 2, 3, 4, 5, 7]);
    }

    #[test]
    fn test_bonus_appended_not_sorted() {
        let draw = [10, 20, 30, 40, 41, 42, 5];
        let result = evaluate(&[5, 10, 20, 30, 40, 41], &draw).unwrap();
        assert_eq!(result.rank, WinningRank::Second);
        assert_eq!(result.matched_numbers, vec![10, 20, 30, 40, 41, 5]);
    }

    #[test]
    fn test_third_rank() {
        let result = evaluate(&[1, 2, 3, 4, 5, 45], &DRAW).unwrap();
        assert_eq!(result.rank, WinningRank::Third);
        assert_eq!(result.matched_numbers.len(), 5);
        assert!(!result.matched_numbers.contains(&7));
    }

    #[test]
    fn test_fourth_and_fifth_rank() {
        assert_eq!(evaluate(&[1, 2, 3, 4, 40, 41], &DRAW).unwrap().rank, WinningRank::Fourth);
        assert_eq!(evaluate(&[1, 2, 3, 4, 7, 41], &DRAW).unwrap().rank, WinningRank::Fourth);
        assert_eq!(evaluate(&[1, 2, 3, 40, 41, 42], &DRAW).unwrap().rank, WinningRank::Fifth);
        assert_eq!(evaluate(&[1, 2, 3, 7, 41, 42], &DRAW).unwrap().rank, WinningRank::Fifth);
    }

    #[test]
    fn test_no_prize() {
        let result = evaluate(&[10, 11, 12, 13, 14, 15], &DRAW).unwrap();
        assert_eq!(result.rank, WinningRank::None);
        assert_eq!(result.message, "낙첨");
        assert!(result.matched_numbers.is_empty());
    }

    #[test]
    fn test_bonus_only_is_no_prize() {
        let result = evaluate(&[7, 10, 11, 12, 13, 14], &DRAW).unwrap();
        assert_eq!(result.rank, WinningRank::None);
        assert_eq!(result.matched_numbers, vec![7]);
    }

    #[test]
    fn test_two_main_plus_bonus_is_no_prize() {
        let result = evaluate(&[1, 2, 7, 40, 41, 42], &DRAW).unwrap();
        assert_eq!(result.rank, WinningRank::None);
        assert_eq!(result.matched_numbers, vec![1, 2, 7]);
    }

    #[test]
    fn test_pure() {
        let a = evaluate(&[1, 2, 3, 40, 41, 7], &DRAW).unwrap();
        let b = evaluate(&[1, 2, 3, 40, 41, 7], &DRAW).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_sizes() {
        for len in [0usize, 1, 5, 7, 12] {
            let ticket: Vec<u8> = (1..=len as u8).collect();
            assert_eq!(
                evaluate(&ticket, &DRAW),
                Err(LottoError::InvalidInput { ticket: len, draw: 7 })
            );
        }
        for len in [0usize, 3, 6, 8] {
            let draw: Vec<u8> = (1..=len as u8).collect();
            assert_eq!(
                evaluate(&[1, 2, 3, 4, 5, 6], &draw),
                Err(LottoError::InvalidInput { ticket: 6, draw: len })
            );
        }
    }
}
