use crate::types::{AverageRating, SourceRating};

/// Mean of the found scores, rounded to one decimal with halves going away from zero
/// (`f64::round`), so a mean of 7.25 reports as 7.3.
///
/// Sources reporting the `-1` sentinel are left out; with none left the result is
/// `NoRating` rather than zero.
pub fn average_rating(ratings: &[SourceRating]) -> AverageRating {
    let found: Vec<f64> = ratings
        .iter()
        .map(|r| r.entry.score())
        .filter(|score| *score > 0.0)
        .collect();
    if found.is_empty() {
        return AverageRating::NoRating;
    }
    let mean = found.iter().sum::<f64>() / found.len() as f64;
    AverageRating::Score((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RatingEntry;

    fn ratings(scores: &[f64]) -> Vec<SourceRating> {
        scores
            .iter()
            .map(|&score| SourceRating {
                source: "Test".to_string(),
                entry: if score < 0.0 {
                    RatingEntry::NotFound
                } else {
                    RatingEntry::found(score.to_string(), score)
                },
            })
            .collect()
    }

    #[test]
    fn test_sentinels_are_excluded() {
        let avg = average_rating(&ratings(&[8.7, -1.0, 7.5, -1.0, 9.0, -1.0]));
        assert_eq!(avg, AverageRating::Score(8.4));
    }

    #[test]
    fn test_all_sentinels_is_no_rating() {
        let avg = average_rating(&ratings(&[-1.0; 6]));
        assert_eq!(avg, AverageRating::NoRating);
    }

    #[test]
    fn test_empty_is_no_rating() {
        assert_eq!(average_rating(&[]), AverageRating::NoRating);
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(
            average_rating(&ratings(&[7.25])),
            AverageRating::Score(7.3)
        );
        assert_eq!(
            average_rating(&ratings(&[7.0, 7.5])),
            AverageRating::Score(7.3)
        );
    }
}
