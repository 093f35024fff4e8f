//! Trait score accumulation and dominant-trait ranking.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::graph::{Trait, TraitTaxonomy};

/// Number of dominant traits considered by routing and classification.
pub const DOMINANT_TRAIT_LIMIT: usize = 4;

/// Running trait scores in taxonomy declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scores {
    entries: Vec<(Trait, f64)>,
}

impl Scores {
    /// All-zero scores for every trait in the taxonomy.
    pub fn new(taxonomy: &TraitTaxonomy) -> Self {
        Self {
            entries: taxonomy.traits().iter().map(|t| (*t, 0.0)).collect(),
        }
    }

    /// Add each weight to its trait's running score.
    ///
    /// Keys that do not name a trait in this score set are skipped.
    pub fn apply_weights(&mut self, weights: &HashMap<String, f64>) {
        for (name, delta) in weights {
            let Ok(t) = name.parse::<Trait>() else {
                trace!(trait_name = %name, "Ignoring weight for unknown trait");
                continue;
            };
            match self.entries.iter_mut().find(|(known, _)| *known == t) {
                Some((_, score)) => *score += *delta,
                None => trace!(trait_name = %name, "Ignoring weight for undeclared trait"),
            }
        }
    }

    /// Add a delta to one trait. No-op for undeclared traits.
    pub fn add(&mut self, t: Trait, delta: f64) {
        if let Some((_, score)) = self.entries.iter_mut().find(|(known, _)| *known == t) {
            *score += delta;
        }
    }

    /// Current score for a trait, `None` if undeclared.
    pub fn get(&self, t: Trait) -> Option<f64> {
        self.entries
            .iter()
            .find(|(known, _)| *known == t)
            .map(|(_, score)| *score)
    }

    /// Sum of all trait scores.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, score)| score).sum()
    }

    /// Zero every score, keeping the declared traits.
    pub fn reset(&mut self) {
        for (_, score) in self.entries.iter_mut() {
            *score = 0.0;
        }
    }

    /// Traits with a strictly positive score, highest first, at most `limit`.
    ///
    /// Equal scores keep declaration order.
    pub fn dominant_traits(&self, limit: usize) -> Vec<Trait> {
        let mut positive: Vec<(Trait, f64)> = self
            .entries
            .iter()
            .copied()
            .filter(|(_, score)| *score > 0.0)
            .collect();
        // sort_by is stable, so ties stay in declaration order
        positive.sort_by(|a, b| b.1.total_cmp(&a.1));
        positive.into_iter().take(limit).map(|(t, _)| t).collect()
    }

    /// Iterate `(trait, score)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of scored traits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no traits are scored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Scores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (t, score) in &self.entries {
            map.serialize_entry(t.as_str(), score)?;
        }
        map.end()
    }
}

/// Snapshot of a session's scores with derived ranking.
///
/// Computed on demand; never cached across score changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityProfile {
    /// Sum of all trait scores.
    pub total_score: f64,
    /// Up to [`DOMINANT_TRAIT_LIMIT`] positive traits, highest first.
    pub dominant_traits: Vec<Trait>,
    /// Copy of the scores the profile was derived from.
    pub scores: Scores,
}

impl PersonalityProfile {
    /// Derive a profile from current scores.
    pub fn from_scores(scores: &Scores) -> Self {
        Self {
            total_score: scores.total(),
            dominant_traits: scores.dominant_traits(DOMINANT_TRAIT_LIMIT),
            scores: scores.clone(),
        }
    }

    /// Highest-ranked dominant trait.
    pub fn primary(&self) -> Option<Trait> {
        self.dominant_traits.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_new_scores_are_zero() {
        let scores = Scores::new(&TraitTaxonomy::canonical());
        assert_eq!(scores.len(), 13);
        assert!(scores.iter().all(|(_, s)| s == 0.0));
        assert_eq!(scores.total(), 0.0);
    }

    #[test]
    fn test_apply_weights_sums_per_trait() {
        let mut scores = Scores::new(&TraitTaxonomy::canonical());
        scores.apply_weights(&weights(&[("Boldness", 10.0), ("Elegance", -2.0)]));
        scores.apply_weights(&weights(&[("Whimsy", 4.0)]));
        scores.apply_weights(&weights(&[("Boldness", -3.5)]));

        assert_eq!(scores.get(Trait::Boldness), Some(6.5));
        assert_eq!(scores.get(Trait::Elegance), Some(-2.0));
        assert_eq!(scores.get(Trait::Whimsy), Some(4.0));
        assert_eq!(scores.total(), 8.5);
    }

    #[test]
    fn test_apply_weights_ignores_unknown_traits() {
        let mut scores = Scores::new(&TraitTaxonomy::canonical());
        let before = scores.clone();
        scores.apply_weights(&weights(&[("Sparkle", 99.0), ("", 1.0)]));
        assert_eq!(scores, before);
    }

    #[test]
    fn test_apply_weights_ignores_miscased_trait_names() {
        let mut scores = Scores::new(&TraitTaxonomy::canonical());
        let before = scores.clone();
        scores.apply_weights(&weights(&[("boldness", 7.0), (" ARTISTIC FLAIR ", 3.0)]));
        assert_eq!(scores, before);
        assert_eq!(scores.get(Trait::Boldness), Some(0.0));
    }

    #[test]
    fn test_apply_weights_ignores_undeclared_traits() {
        let mut scores = Scores::new(&TraitTaxonomy::from_traits([Trait::Boldness]));
        scores.apply_weights(&weights(&[("Elegance", 5.0), ("Boldness", 1.0)]));
        assert_eq!(scores.get(Trait::Elegance), None);
        assert_eq!(scores.get(Trait::Boldness), Some(1.0));
    }

    #[test]
    fn test_empty_weights_are_noop() {
        let mut scores = Scores::new(&TraitTaxonomy::canonical());
        scores.add(Trait::Sincerity, 2.0);
        let before = scores.clone();
        scores.apply_weights(&HashMap::new());
        assert_eq!(scores, before);
    }

    #[test]
    fn test_dominant_traits_positive_only_sorted_desc() {
        let mut scores = Scores::new(&TraitTaxonomy::canonical());
        scores.add(Trait::Boldness, 5.0);
        scores.add(Trait::ArtisticFlair, 3.0);
        scores.add(Trait::Elegance, -1.0);
        assert_eq!(
            scores.dominant_traits(DOMINANT_TRAIT_LIMIT),
            vec![Trait::Boldness, Trait::ArtisticFlair]
        );
    }

    #[test]
    fn test_dominant_traits_ties_follow_declaration_order() {
        let taxonomy = TraitTaxonomy::from_traits([
            Trait::Whimsy,
            Trait::Boldness,
            Trait::Competence,
            Trait::Elegance,
        ]);
        let mut scores = Scores::new(&taxonomy);
        scores.add(Trait::Elegance, 4.0);
        scores.add(Trait::Competence, 4.0);
        scores.add(Trait::Boldness, 4.0);
        scores.add(Trait::Whimsy, 1.0);
        assert_eq!(
            scores.dominant_traits(3),
            vec![Trait::Boldness, Trait::Competence, Trait::Elegance]
        );
    }

    #[test]
    fn test_dominant_traits_limit() {
        let mut scores = Scores::new(&TraitTaxonomy::canonical());
        for (i, t) in Trait::ALL.iter().enumerate() {
            scores.add(*t, (i + 1) as f64);
        }
        let dominant = scores.dominant_traits(DOMINANT_TRAIT_LIMIT);
        assert_eq!(
            dominant,
            vec![
                Trait::Ruggedness,
                Trait::Sophistication,
                Trait::Competence,
                Trait::Excitement
            ]
        );
    }

    #[test]
    fn test_reset_zeroes_scores() {
        let mut scores = Scores::new(&TraitTaxonomy::canonical());
        scores.add(Trait::Ruggedness, 12.0);
        scores.reset();
        assert_eq!(scores, Scores::new(&TraitTaxonomy::canonical()));
    }

    #[test]
    fn test_scores_serialize_as_ordered_object() {
        let taxonomy = TraitTaxonomy::from_traits([Trait::Whimsy, Trait::ArtisticFlair]);
        let mut scores = Scores::new(&taxonomy);
        scores.add(Trait::ArtisticFlair, 2.5);
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"{"Whimsy":0.0,"Artistic Flair":2.5}"#);
    }

    #[test]
    fn test_profile_from_scores() {
        let mut scores = Scores::new(&TraitTaxonomy::canonical());
        scores.add(Trait::Boldness, 30.0);
        scores.add(Trait::ArtisticFlair, 20.0);
        let profile = PersonalityProfile::from_scores(&scores);
        assert_eq!(profile.total_score, 50.0);
        assert_eq!(profile.primary(), Some(Trait::Boldness));
        assert_eq!(profile.dominant_traits.len(), 2);
    }
}
