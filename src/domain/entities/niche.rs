//! Niche configuration: search keywords, affiliate offers, and soft CTAs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An affiliate offer promoted inside posts for a niche.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    pub url: String,
}

/// A content niche: the keywords used to find source videos and the
/// promotional material woven into generated posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Niche {
    /// Normalized key, e.g. `weight_loss`.
    pub key: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub soft_ctas: Vec<String>,
}

impl Niche {
    /// Human-readable niche name: `weight_loss` → `Weight Loss`.
    pub fn display_name(&self) -> String {
        self.key
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Normalizes an incoming niche key: lowercase, quotes stripped, spaces
/// replaced with underscores.
pub fn normalize_niche_key(key: &str) -> String {
    key.to_lowercase()
        .replace(['"', '\''], "")
        .replace(' ', "_")
}

/// The set of configured niches, addressable by normalized key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NicheCatalog {
    niches: HashMap<String, Niche>,
}

impl NicheCatalog {
    /// Builds a catalog from a list of niches, keyed by their normalized keys.
    pub fn new(niches: impl IntoIterator<Item = Niche>) -> Self {
        let niches = niches
            .into_iter()
            .map(|mut n| {
                n.key = normalize_niche_key(&n.key);
                (n.key.clone(), n)
            })
            .collect();
        Self { niches }
    }

    /// The built-in catalog matching the default deployment.
    pub fn builtin() -> Self {
        Self::new([Niche {
            key: "weight_loss".to_string(),
            keywords: [
                "weight loss tips",
                "fat loss",
                "metabolism",
                "calorie deficit",
                "lose weight fast",
                "healthy weight loss",
                "belly fat",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            offers: vec![
                Offer {
                    name: "Ikaria Lean Belly Juice".to_string(),
                    url: "https://hop.clickbank.net/?affiliate=YOURID&vendor=ikaria".to_string(),
                },
                Offer {
                    name: "Java Burn".to_string(),
                    url: "https://hop.clickbank.net/?affiliate=YOURID&vendor=javaburn".to_string(),
                },
            ],
            soft_ctas: [
                "Curious how others are accelerating fat loss without extreme diets?",
                "Want a gentle nudge to keep today's momentum going?",
                "Prefer a simple add-on to your current routine rather than a total overhaul?",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }])
    }

    /// Looks up a niche, normalizing the key first.
    pub fn get(&self, key: &str) -> Option<&Niche> {
        self.niches.get(&normalize_niche_key(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Niche> {
        self.niches.values()
    }

    pub fn is_empty(&self) -> bool {
        self.niches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.niches.len()
    }
}
