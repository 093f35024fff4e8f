//! Personality classification from a trait profile.
//!
//! Two ordered, first-match-wins tables: two-trait combination patterns
//! checked against the top three dominant traits, then a single-trait table
//! for the primary trait.

use super::PersonalityProfile;
use crate::graph::Trait;

/// Personality returned when no table entry applies.
pub const FALLBACK_PERSONALITY: &str = "The Unique Individual";

/// Single-trait personalities.
pub const BASIC_PERSONALITIES: [(Trait, &str); 9] = [
    (Trait::Boldness, "The Bold Trendsetter"),
    (Trait::Elegance, "The Timeless Classic"),
    (Trait::Minimalism, "The Modern Minimalist"),
    (Trait::ArtisticFlair, "The Creative Visionary"),
    (Trait::Whimsy, "The Playful Dreamer"),
    (Trait::ColorPlayfulness, "The Color Enthusiast"),
    (Trait::LuxuryLeaning, "The Luxury Connoisseur"),
    (Trait::Sophistication, "The Sophisticated Curator"),
    (Trait::Competence, "The Practical Professional"),
];

/// Two-trait personality patterns in priority order. Both traits must be
/// among the top three dominant traits.
pub const COMBINATION_PATTERNS: [([Trait; 2], &str); 8] = [
    ([Trait::Boldness, Trait::ArtisticFlair], "The Wild Maverick"),
    ([Trait::Elegance, Trait::LuxuryLeaning], "The Refined Luxurist"),
    ([Trait::Minimalism, Trait::Competence], "The Efficient Modernist"),
    ([Trait::Whimsy, Trait::ColorPlayfulness], "The Joyful Free Spirit"),
    ([Trait::Excitement, Trait::Ruggedness], "The Urban Adventurer"),
    ([Trait::Sophistication, Trait::Elegance], "The Polished Sophisticate"),
    ([Trait::Sincerity, Trait::Versatility], "The Everyday Authentic"),
    ([Trait::ArtisticFlair, Trait::Whimsy], "The Whimsical Artist"),
];

/// Maps trait profiles to named personality types.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalityClassifier;

impl PersonalityClassifier {
    /// Create a classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify a profile. Pure function of the profile's scores.
    pub fn classify(&self, profile: &PersonalityProfile) -> &'static str {
        let dominant = &profile.dominant_traits;
        if dominant.len() < 2 {
            return Self::basic(dominant.first().copied());
        }

        let top: &[Trait] = &dominant[..dominant.len().min(3)];
        COMBINATION_PATTERNS
            .iter()
            .find(|(required, _)| required.iter().all(|t| top.contains(t)))
            .map(|(_, name)| *name)
            .unwrap_or_else(|| Self::basic(dominant.first().copied()))
    }

    /// Single-trait personality for `primary`, or the fallback.
    pub fn basic(primary: Option<Trait>) -> &'static str {
        primary
            .and_then(|p| {
                BASIC_PERSONALITIES
                    .iter()
                    .find(|(t, _)| *t == p)
                    .map(|(_, name)| *name)
            })
            .unwrap_or(FALLBACK_PERSONALITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Scores;
    use crate::graph::TraitTaxonomy;

    fn classify(pairs: &[(Trait, f64)]) -> &'static str {
        let mut scores = Scores::new(&TraitTaxonomy::canonical());
        for (t, v) in pairs {
            scores.add(*t, *v);
        }
        PersonalityClassifier::new().classify(&PersonalityProfile::from_scores(&scores))
    }

    #[test]
    fn test_no_traits_is_fallback() {
        assert_eq!(classify(&[]), FALLBACK_PERSONALITY);
        assert_eq!(
            classify(&[(Trait::Boldness, -3.0), (Trait::Whimsy, 0.0)]),
            FALLBACK_PERSONALITY
        );
    }

    #[test]
    fn test_single_trait_uses_basic_table() {
        assert_eq!(classify(&[(Trait::Boldness, 10.0)]), "The Bold Trendsetter");
        assert_eq!(
            classify(&[(Trait::Competence, 1.0)]),
            "The Practical Professional"
        );
    }

    #[test]
    fn test_single_unmapped_trait_is_fallback() {
        for t in [
            Trait::Versatility,
            Trait::Sincerity,
            Trait::Excitement,
            Trait::Ruggedness,
        ] {
            assert_eq!(classify(&[(t, 4.0)]), FALLBACK_PERSONALITY);
        }
    }

    #[test]
    fn test_basic_table_has_nine_distinct_traits() {
        let traits: std::collections::HashSet<Trait> =
            BASIC_PERSONALITIES.iter().map(|(t, _)| *t).collect();
        assert_eq!(traits.len(), 9);
    }

    #[test]
    fn test_wild_maverick() {
        assert_eq!(
            classify(&[(Trait::Boldness, 5.0), (Trait::ArtisticFlair, 3.0)]),
            "The Wild Maverick"
        );
    }

    #[test]
    fn test_pattern_order_independent_of_rank() {
        // Elegance + Luxury Leaning in either rank order
        assert_eq!(
            classify(&[(Trait::LuxuryLeaning, 9.0), (Trait::Elegance, 2.0)]),
            "The Refined Luxurist"
        );
    }

    #[test]
    fn test_pattern_uses_third_trait() {
        assert_eq!(
            classify(&[
                (Trait::Excitement, 9.0),
                (Trait::Boldness, 8.0),
                (Trait::Ruggedness, 7.0),
            ]),
            "The Urban Adventurer"
        );
    }

    #[test]
    fn test_fourth_trait_is_not_considered() {
        assert_eq!(
            classify(&[
                (Trait::Whimsy, 9.0),
                (Trait::Boldness, 8.0),
                (Trait::Competence, 7.0),
                (Trait::ColorPlayfulness, 6.0),
            ]),
            "The Playful Dreamer"
        );
    }

    #[test]
    fn test_first_match_wins() {
        // Matches both Wild Maverick (1) and Whimsical Artist (8)
        assert_eq!(
            classify(&[
                (Trait::ArtisticFlair, 9.0),
                (Trait::Whimsy, 8.0),
                (Trait::Boldness, 7.0),
            ]),
            "The Wild Maverick"
        );
        // Matches both Refined Luxurist (2) and Polished Sophisticate (6)
        assert_eq!(
            classify(&[
                (Trait::Sophistication, 9.0),
                (Trait::Elegance, 8.0),
                (Trait::LuxuryLeaning, 7.0),
            ]),
            "The Refined Luxurist"
        );
    }

    #[test]
    fn test_no_pattern_falls_back_to_primary() {
        assert_eq!(
            classify(&[(Trait::Sophistication, 5.0), (Trait::Boldness, 3.0)]),
            "The Sophisticated Curator"
        );
        assert_eq!(
            classify(&[(Trait::Versatility, 5.0), (Trait::Boldness, 3.0)]),
            FALLBACK_PERSONALITY
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let pairs = [(Trait::Whimsy, 4.0), (Trait::ColorPlayfulness, 4.0)];
        assert_eq!(classify(&pairs), classify(&pairs));
        assert_eq!(classify(&pairs), "The Joyful Free Spirit");
    }
}
