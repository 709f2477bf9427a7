//! Category rule table: ordered tag predicates for POI classification
//!
//! One table drives both sides of a recommendation request: each rule's
//! selectors are rendered into the source query, and the same selectors
//! classify the returned records. Rules are evaluated top-down and the
//! first match wins, so table order encodes priority among overlapping
//! categories. Adding a category is a new table row, not a new branch.

use crate::models::PoiCategory;
use std::collections::HashMap;

/// How a selector matches a tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMatch {
    /// The key exists with any value
    Present,
    /// The key exists with exactly this value
    Equals(&'static str),
    /// The key exists with one of these values
    OneOf(&'static [&'static str]),
}

/// A single OSM tag predicate, e.g. `natural=hot_spring`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSelector {
    pub key: &'static str,
    pub value: TagMatch,
}

impl TagSelector {
    pub const fn equals(key: &'static str, value: &'static str) -> Self {
        Self { key, value: TagMatch::Equals(value) }
    }

    pub const fn present(key: &'static str) -> Self {
        Self { key, value: TagMatch::Present }
    }

    pub const fn one_of(key: &'static str, values: &'static [&'static str]) -> Self {
        Self { key, value: TagMatch::OneOf(values) }
    }

    /// Whether a record's tag map satisfies this selector.
    pub fn matches(&self, tags: &HashMap<String, String>) -> bool {
        match (&self.value, tags.get(self.key)) {
            (_, None) => false,
            (TagMatch::Present, Some(_)) => true,
            (TagMatch::Equals(want), Some(got)) => got == want,
            (TagMatch::OneOf(wanted), Some(got)) => wanted.iter().any(|w| got == w),
        }
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: PoiCategory,
    /// A record matches the rule when any selector matches
    pub selectors: &'static [TagSelector],
}

impl CategoryRule {
    pub fn matches(&self, tags: &HashMap<String, String>) -> bool {
        self.selectors.iter().any(|s| s.matches(tags))
    }
}

/// The rule table, highest priority first.
pub const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: PoiCategory::HotSpring,
        selectors: &[
            TagSelector::equals("natural", "hot_spring"),
            TagSelector::equals("bath:type", "onsen"),
            TagSelector::equals("amenity", "public_bath"),
        ],
    },
    CategoryRule {
        category: PoiCategory::Historic,
        selectors: &[TagSelector::present("historic")],
    },
    CategoryRule {
        category: PoiCategory::SkiResort,
        selectors: &[
            TagSelector::equals("landuse", "winter_sports"),
            TagSelector::equals("sport", "skiing"),
        ],
    },
    CategoryRule {
        category: PoiCategory::Leisure,
        selectors: &[TagSelector::one_of(
            "tourism",
            &["theme_park", "zoo", "aquarium", "attraction"],
        )],
    },
    CategoryRule {
        category: PoiCategory::Dining,
        selectors: &[
            TagSelector::one_of("amenity", &["restaurant", "cafe", "fast_food"]),
            TagSelector::equals("cuisine", "ramen"),
        ],
    },
    CategoryRule {
        category: PoiCategory::Lodging,
        selectors: &[TagSelector::one_of("tourism", &["hotel", "hostel", "guest_house"])],
    },
    CategoryRule {
        category: PoiCategory::Nightlife,
        selectors: &[TagSelector::one_of("amenity", &["bar", "pub", "nightclub"])],
    },
];

/// Classify a tag map against the table; `None` means the record matches
/// no rule and must be discarded.
pub fn classify(tags: &HashMap<String, String>) -> Option<PoiCategory> {
    RULES.iter().find(|rule| rule.matches(tags)).map(|rule| rule.category)
}

/// All selectors across the table, for building the source query.
pub fn query_selectors() -> Vec<TagSelector> {
    RULES.iter().flat_map(|rule| rule.selectors.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_classify_hot_spring() {
        assert_eq!(
            classify(&tags(&[("natural", "hot_spring"), ("name", "Kusatsu")])),
            Some(PoiCategory::HotSpring)
        );
        assert_eq!(
            classify(&tags(&[("amenity", "public_bath"), ("bath:type", "onsen")])),
            Some(PoiCategory::HotSpring)
        );
    }

    #[test]
    fn test_classify_ramen_as_dining() {
        assert_eq!(classify(&tags(&[("cuisine", "ramen")])), Some(PoiCategory::Dining));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // A castle that is also marketed as a theme park: Historic sits
        // above Leisure in the table, so Historic wins
        let overlapping = tags(&[("historic", "castle"), ("tourism", "theme_park")]);
        assert_eq!(classify(&overlapping), Some(PoiCategory::Historic));
    }

    #[test]
    fn test_onsen_outranks_dining() {
        let bath_with_cafe = tags(&[("bath:type", "onsen"), ("amenity", "cafe")]);
        assert_eq!(classify(&bath_with_cafe), Some(PoiCategory::HotSpring));
    }

    #[test]
    fn test_unmatched_tags_are_discarded() {
        assert_eq!(classify(&tags(&[("highway", "bus_stop")])), None);
        assert_eq!(classify(&HashMap::new()), None);
    }

    #[test]
    fn test_every_category_appears_once_in_table() {
        let mut seen = std::collections::HashSet::new();
        for rule in RULES {
            assert!(seen.insert(rule.category), "duplicate rule for {:?}", rule.category);
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_query_selectors_cover_all_rules() {
        let selectors = query_selectors();
        let total: usize = RULES.iter().map(|r| r.selectors.len()).sum();
        assert_eq!(selectors.len(), total);
    }
}
