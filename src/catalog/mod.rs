//! Bilingual labels offered by the search forms.
//!
//! The tables are built once on first use and never mutated afterwards.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::models::SearchCriteria;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    French,
}

/// Which form control a label belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    City,
    Category,
    HouseType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub kind: LabelKind,
    pub english: &'static str,
    pub french: &'static str,
}

impl CatalogEntry {
    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.english,
            Language::French => self.french,
        }
    }

    fn matches(&self, label: &str) -> bool {
        let wanted = label.trim().to_lowercase();
        self.english.to_lowercase() == wanted || self.french.to_lowercase() == wanted
    }
}

const CITIES: &[(&str, &str)] = &[
    ("Montreal", "Montréal"),
    ("Laval", "Laval"),
    ("Longueuil", "Longueuil"),
    ("Brossard", "Brossard"),
    ("Terrebonne", "Terrebonne"),
    ("Repentigny", "Repentigny"),
    ("Blainville", "Blainville"),
    ("Boisbriand", "Boisbriand"),
    ("Mirabel", "Mirabel"),
    ("Saint-Jerome", "Saint-Jérôme"),
    ("Quebec City", "Québec"),
    ("Gatineau", "Gatineau"),
    ("Sherbrooke", "Sherbrooke"),
    ("Trois-Rivieres", "Trois-Rivières"),
];

const CATEGORIES: &[(&str, &str)] = &[
    ("House", "Maison"),
    ("Condo", "Condo"),
    ("Plex", "Plex"),
    ("Cottage", "Chalet"),
    ("Land", "Terrain"),
    ("Commercial", "Commercial"),
];

const HOUSE_TYPES: &[(&str, &str)] = &[
    ("Bungalow", "Plain-pied"),
    ("Two-storey", "À étages"),
    ("Split-level", "Paliers multiples"),
    ("Townhouse", "Maison de ville"),
    ("Semi-detached", "Jumelé"),
    ("Detached", "Détaché"),
    ("Mobile home", "Maison mobile"),
];

/// Read-only label tables
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Process-wide catalog of the labels shipped with the forms
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let tables = [
                (LabelKind::City, CITIES),
                (LabelKind::Category, CATEGORIES),
                (LabelKind::HouseType, HOUSE_TYPES),
            ];
            let entries = tables
                .into_iter()
                .flat_map(|(kind, rows)| {
                    rows.iter().map(move |&(english, french)| CatalogEntry {
                        kind,
                        english,
                        french,
                    })
                })
                .collect();
            Catalog { entries }
        })
    }

    /// Find the entry carrying `label` in either language, ignoring case
    pub fn lookup(&self, kind: LabelKind, label: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind && entry.matches(label))
    }

    pub fn translate(&self, kind: LabelKind, label: &str, language: Language) -> Option<&'static str> {
        self.lookup(kind, label).map(|entry| entry.label(language))
    }

    /// Labels of one kind in display order
    pub fn labels(&self, kind: LabelKind, language: Language) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.label(language))
            .collect()
    }

    /// Rewrite the criteria's labels into `language`. Unknown labels are
    /// kept as given.
    pub fn localize(&self, criteria: &SearchCriteria, language: Language) -> SearchCriteria {
        let convert = |kind: LabelKind, values: &[String]| -> Vec<String> {
            values
                .iter()
                .map(|value| {
                    self.translate(kind, value, language)
                        .map_or_else(|| value.clone(), str::to_string)
                })
                .collect()
        };

        SearchCriteria {
            cities: convert(LabelKind::City, &criteria.cities),
            categories: convert(LabelKind::Category, &criteria.categories),
            house_types: convert(LabelKind::HouseType, &criteria.house_types),
            ..criteria.clone()
        }
    }
}
