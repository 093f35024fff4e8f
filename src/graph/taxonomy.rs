//! Trait taxonomy: the closed set of personality traits and archetypes.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A personality trait scored by the quiz.
///
/// Style traits describe aesthetic taste; the remaining five are the Aaker
/// brand-personality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    /// Statement pieces, standing out.
    Boldness,
    /// Refined, graceful taste.
    Elegance,
    /// Clean lines, nothing extra.
    Minimalism,
    /// Art-driven, expressive design.
    #[serde(rename = "Artistic Flair")]
    ArtisticFlair,
    /// Playful, quirky details.
    Whimsy,
    /// Bright and mixed colour palettes.
    #[serde(rename = "Color Playfulness")]
    ColorPlayfulness,
    /// Preference for premium materials and labels.
    #[serde(rename = "Luxury Leaning")]
    LuxuryLeaning,
    /// One bag for every occasion.
    Versatility,
    /// Honest, wholesome brands.
    Sincerity,
    /// Daring, spirited brands.
    Excitement,
    /// Reliable, capable brands.
    Competence,
    /// Upper-class, charming brands.
    Sophistication,
    /// Tough, outdoorsy brands.
    Ruggedness,
}

impl Trait {
    /// Style dimension traits in canonical order.
    pub const STYLE: [Trait; 8] = [
        Trait::Boldness,
        Trait::Elegance,
        Trait::Minimalism,
        Trait::ArtisticFlair,
        Trait::Whimsy,
        Trait::ColorPlayfulness,
        Trait::LuxuryLeaning,
        Trait::Versatility,
    ];

    /// Brand-personality dimension traits in canonical order.
    pub const AAKER: [Trait; 5] = [
        Trait::Sincerity,
        Trait::Excitement,
        Trait::Competence,
        Trait::Sophistication,
        Trait::Ruggedness,
    ];

    /// Every trait, style dimension first.
    pub const ALL: [Trait; 13] = [
        Trait::Boldness,
        Trait::Elegance,
        Trait::Minimalism,
        Trait::ArtisticFlair,
        Trait::Whimsy,
        Trait::ColorPlayfulness,
        Trait::LuxuryLeaning,
        Trait::Versatility,
        Trait::Sincerity,
        Trait::Excitement,
        Trait::Competence,
        Trait::Sophistication,
        Trait::Ruggedness,
    ];

    /// Get the trait's display name as used in quiz content.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trait::Boldness => "Boldness",
            Trait::Elegance => "Elegance",
            Trait::Minimalism => "Minimalism",
            Trait::ArtisticFlair => "Artistic Flair",
            Trait::Whimsy => "Whimsy",
            Trait::ColorPlayfulness => "Color Playfulness",
            Trait::LuxuryLeaning => "Luxury Leaning",
            Trait::Versatility => "Versatility",
            Trait::Sincerity => "Sincerity",
            Trait::Excitement => "Excitement",
            Trait::Competence => "Competence",
            Trait::Sophistication => "Sophistication",
            Trait::Ruggedness => "Ruggedness",
        }
    }
}

impl std::fmt::Display for Trait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Trait {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trait::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown trait: {}", s))
    }
}

/// Trait archetypes used for adaptive branching, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Bold, adventurous profile.
    Wild,
    /// Refined, luxurious profile.
    Elegant,
    /// Artistic, playful profile.
    Creative,
    /// Understated, practical profile.
    Minimalist,
}

impl Archetype {
    /// All archetypes in priority order.
    pub const ALL: [Archetype; 4] = [
        Archetype::Wild,
        Archetype::Elegant,
        Archetype::Creative,
        Archetype::Minimalist,
    ];

    /// Get the archetype name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Wild => "wild",
            Archetype::Elegant => "elegant",
            Archetype::Creative => "creative",
            Archetype::Minimalist => "minimalist",
        }
    }

    /// Node ID suffix used by conventional alternate-path nodes (`Q4_WILD`).
    pub fn node_suffix(&self) -> &'static str {
        match self {
            Archetype::Wild => "WILD",
            Archetype::Elegant => "ELEGANT",
            Archetype::Creative => "CREATIVE",
            Archetype::Minimalist => "MINIMALIST",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Archetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wild" => Ok(Archetype::Wild),
            "elegant" => Ok(Archetype::Elegant),
            "creative" => Ok(Archetype::Creative),
            "minimalist" => Ok(Archetype::Minimalist),
            _ => Err(format!("Unknown archetype: {}", s)),
        }
    }
}

/// Trait names declared by a quiz document, grouped by dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dimensions {
    /// Style trait names.
    #[serde(default)]
    pub style: Vec<String>,
    /// Brand-personality trait names.
    #[serde(default)]
    pub aaker: Vec<String>,
}

/// The ordered set of traits a quiz scores.
///
/// Declaration order is the tie-break key wherever traits with equal scores
/// are ranked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitTaxonomy {
    order: Vec<Trait>,
}

impl TraitTaxonomy {
    /// Canonical taxonomy: every trait, style dimension first.
    pub fn canonical() -> Self {
        Self {
            order: Trait::ALL.to_vec(),
        }
    }

    /// Build from an explicit trait order. Duplicates keep their first position.
    pub fn from_traits(traits: impl IntoIterator<Item = Trait>) -> Self {
        let mut order = Vec::new();
        for t in traits {
            if !order.contains(&t) {
                order.push(t);
            }
        }
        Self { order }
    }

    /// Build from declared dimensions (style then aaker).
    ///
    /// Unknown names are dropped. Falls back to the canonical taxonomy when
    /// nothing usable is declared.
    pub fn from_dimensions(dimensions: &Dimensions) -> Self {
        let parsed = dimensions
            .style
            .iter()
            .chain(dimensions.aaker.iter())
            .filter_map(|name| match name.parse::<Trait>() {
                Ok(t) => Some(t),
                Err(_) => {
                    warn!(trait_name = %name, "Dropping undeclared trait from taxonomy");
                    None
                }
            });

        let taxonomy = Self::from_traits(parsed);
        if taxonomy.is_empty() {
            Self::canonical()
        } else {
            taxonomy
        }
    }

    /// Traits in declaration order.
    pub fn traits(&self) -> &[Trait] {
        &self.order
    }

    /// Whether the taxonomy declares this trait.
    pub fn contains(&self, t: Trait) -> bool {
        self.order.contains(&t)
    }

    /// Resolve a trait name to a declared trait.
    pub fn resolve(&self, name: &str) -> Option<Trait> {
        name.parse::<Trait>().ok().filter(|t| self.contains(*t))
    }

    /// Number of declared traits.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no traits are declared.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for TraitTaxonomy {
    fn default() -> Self {
        Self::canonical()
    }
}
