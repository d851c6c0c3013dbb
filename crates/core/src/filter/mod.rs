//! Multi-criteria filtering of entity lists.
//!
//! A [`FilterSet`] is a declarative list of [`Criterion`] values, each pairing a key with a
//! [`Matcher`] over one or more fields of the entity. Applying the set to a slice together with a
//! [`Selection`] (key → selected value) keeps the items that satisfy every *active* criterion,
//! preserving their original order.
//!
//! A criterion is inactive when:
//! - its key is absent from the selection,
//! - the selected value equals the criterion's sentinel (`"all"` unless configured otherwise),
//! - it is a text criterion and the query is empty.
//!
//! Text matching lower-cases both sides and tests substring containment. There is no
//! locale-aware collation and no diacritic folding, so `"cardiologia"` does not match
//! `"Cardiología"`.

pub mod presets;
mod selection;

pub use presets::{
    appointment_filters, article_filters, doctor_filters, keys, AGE_BRACKETS, AVAILABLE,
};
pub use selection::Selection;

use crate::constants::DEFAULT_SENTINEL;

/// A string-bearing field of `T` that text search looks into.
pub enum Field<T> {
    /// A single string.
    Scalar(fn(&T) -> &str),
    /// A list of strings; matches if any element matches.
    List(fn(&T) -> &[String]),
}

/// A named half-open range `[min, max)` on an integer field. `None` leaves that side open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bucket {
    pub name: &'static str,
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl Bucket {
    pub fn contains(&self, value: u32) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value < max)
    }
}

/// How a criterion tests an item against the selected value.
pub enum Matcher<T> {
    /// Case-insensitive substring search across several fields (logical OR between fields).
    Text(Vec<Field<T>>),
    /// Exact equality with a scalar field.
    Equals(fn(&T) -> &str),
    /// The selected value must be an element of a list field.
    Member {
        field: fn(&T) -> &[String],
        ignore_case: bool,
    },
    /// A boolean field. `when_true` requires `true`, `when_false` requires `false`; any other
    /// value imposes no constraint.
    Flag {
        field: fn(&T) -> bool,
        when_true: &'static str,
        when_false: Option<&'static str>,
    },
    /// The field must fall in the bucket named by the selected value. Unknown names impose no
    /// constraint.
    Bucket {
        field: fn(&T) -> u32,
        buckets: &'static [Bucket],
    },
}

/// One independently selectable filter dimension.
pub struct Criterion<T> {
    key: &'static str,
    sentinel: String,
    matcher: Matcher<T>,
}

impl<T> Criterion<T> {
    /// Creates a criterion with the default `"all"` sentinel.
    pub fn new(key: &'static str, matcher: Matcher<T>) -> Self {
        Self {
            key,
            sentinel: DEFAULT_SENTINEL.to_string(),
            matcher,
        }
    }

    /// Replaces the sentinel value, e.g. with the display label `"Todas"`.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Returns `true` if `value` constrains the result.
    pub fn is_active(&self, value: &str) -> bool {
        if value == self.sentinel {
            return false;
        }
        !(matches!(self.matcher, Matcher::Text(_)) && value.is_empty())
    }

    /// Tests `item` against a selected value. Text criteria expect `value` already lower-cased.
    fn matches(&self, item: &T, value: &str) -> bool {
        match &self.matcher {
            Matcher::Text(fields) => fields.iter().any(|field| match field {
                Field::Scalar(get) => contains_folded(get(item), value),
                Field::List(get) => get(item).iter().any(|s| contains_folded(s, value)),
            }),
            Matcher::Equals(get) => get(item) == value,
            Matcher::Member { field, ignore_case } => field(item).iter().any(|s| {
                if *ignore_case {
                    s.to_lowercase() == value.to_lowercase()
                } else {
                    s == value
                }
            }),
            Matcher::Flag {
                field,
                when_true,
                when_false,
            } => {
                if value == *when_true {
                    field(item)
                } else if Some(value) == *when_false {
                    !field(item)
                } else {
                    true
                }
            }
            Matcher::Bucket { field, buckets } => buckets
                .iter()
                .find(|b| b.name == value)
                .map_or(true, |b| b.contains(field(item))),
        }
    }

    /// Normalises a selected value once per application rather than once per item.
    fn prepare(&self, value: &str) -> String {
        match self.matcher {
            Matcher::Text(_) => value.to_lowercase(),
            _ => value.to_string(),
        }
    }
}

fn contains_folded(haystack: &str, lowered_query: &str) -> bool {
    haystack.to_lowercase().contains(lowered_query)
}

/// A set of criteria combined with logical AND.
pub struct FilterSet<T> {
    criteria: Vec<Criterion<T>>,
}

impl<T> std::fmt::Debug for FilterSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl<T> Default for FilterSet<T> {
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }
}

impl<T> FilterSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a criterion. A later criterion with the same key shadows nothing; both apply.
    pub fn with(mut self, criterion: Criterion<T>) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.criteria.iter().map(Criterion::key)
    }

    pub fn criterion(&self, key: &str) -> Option<&Criterion<T>> {
        self.criteria.iter().find(|c| c.key == key)
    }

    /// A selection with every criterion set to its sentinel.
    pub fn inactive_selection(&self) -> Selection {
        self.criteria
            .iter()
            .map(|c| (c.key.to_string(), c.sentinel.clone()))
            .collect()
    }

    fn active<'s>(&'s self, selection: &Selection) -> Vec<(&'s Criterion<T>, String)> {
        for key in selection.keys() {
            if self.criterion(key).is_none() {
                tracing::warn!("ignoring unknown filter key: {}", key);
            }
        }

        self.criteria
            .iter()
            .filter_map(|c| {
                let value = selection.get(c.key)?;
                c.is_active(value).then(|| (c, c.prepare(value)))
            })
            .collect()
    }

    /// Returns `true` if `item` satisfies every active criterion.
    pub fn matches(&self, item: &T, selection: &Selection) -> bool {
        self.active(selection)
            .iter()
            .all(|(c, value)| c.matches(item, value))
    }

    /// Returns the items satisfying every active criterion, in their original order.
    ///
    /// The input is not modified; no match yields an empty vector.
    pub fn apply<'a>(&self, items: &'a [T], selection: &Selection) -> Vec<&'a T> {
        let active = self.active(selection);
        items
            .iter()
            .filter(|item| active.iter().all(|(c, value)| c.matches(item, value)))
            .collect()
    }

    /// Like [`FilterSet::apply`] but returns owned copies.
    pub fn apply_cloned(&self, items: &[T], selection: &Selection) -> Vec<T>
    where
        T: Clone,
    {
        self.apply(items, selection).into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        name: String,
        tags: Vec<String>,
        kind: String,
        active: bool,
        age: u32,
    }

    fn item(name: &str, tags: &[&str], kind: &str, active: bool, age: u32) -> Item {
        Item {
            name: name.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            kind: kind.into(),
            active,
            age,
        }
    }

    fn name(i: &Item) -> &str {
        &i.name
    }
    fn tags(i: &Item) -> &[String] {
        &i.tags
    }
    fn kind(i: &Item) -> &str {
        &i.kind
    }
    fn active(i: &Item) -> bool {
        i.active
    }
    fn age(i: &Item) -> u32 {
        i.age
    }

    fn items() -> Vec<Item> {
        vec![
            item("Alpha", &["Rojo", "azul"], "a", true, 10),
            item("Beta", &["verde"], "b", false, 30),
            item("Gamma", &["AZUL"], "a", false, 65),
            item("Delta", &[], "c", true, 45),
        ]
    }

    fn filters() -> FilterSet<Item> {
        FilterSet::new()
            .with(Criterion::new(
                "q",
                Matcher::Text(vec![Field::Scalar(name), Field::List(tags)]),
            ))
            .with(Criterion::new("kind", Matcher::Equals(kind)).with_sentinel("Todas"))
            .with(Criterion::new(
                "tag",
                Matcher::Member {
                    field: tags,
                    ignore_case: true,
                },
            ))
            .with(Criterion::new(
                "state",
                Matcher::Flag {
                    field: active,
                    when_true: "on",
                    when_false: Some("off"),
                },
            ))
            .with(Criterion::new(
                "age",
                Matcher::Bucket {
                    field: age,
                    buckets: AGE_BRACKETS,
                },
            ))
    }

    fn names(found: &[&Item]) -> Vec<String> {
        found.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_inactive_selection_is_identity() {
        let items = items();
        let set = filters();
        let found = set.apply(&items, &set.inactive_selection());
        assert_eq!(found.len(), items.len());
        assert!(found.iter().zip(&items).all(|(a, b)| std::ptr::eq(*a, b)));

        assert_eq!(set.apply(&items, &Selection::new()).len(), items.len());
    }

    #[test]
    fn test_text_matches_any_field_case_insensitively() {
        let items = items();
        let set = filters();
        let found = set.apply(&items, &Selection::new().with("q", "AZ"));
        assert_eq!(names(&found), ["Alpha", "Gamma"]);

        let found = set.apply(&items, &Selection::new().with("q", "elt"));
        assert_eq!(names(&found), ["Delta"]);
    }

    #[test]
    fn test_empty_text_query_is_inactive() {
        let items = items();
        let found = filters().apply(&items, &Selection::new().with("q", ""));
        assert_eq!(found.len(), items.len());
    }

    #[test]
    fn test_custom_sentinel_disables_criterion() {
        let items = items();
        let set = filters();

        let found = set.apply(&items, &Selection::new().with("kind", "Todas"));
        assert_eq!(found.len(), items.len());

        // "all" is not this criterion's sentinel, so it is a literal value that matches nothing.
        let found = set.apply(&items, &Selection::new().with("kind", "all"));
        assert!(found.is_empty());

        let found = set.apply(&items, &Selection::new().with("kind", "a"));
        assert_eq!(names(&found), ["Alpha", "Gamma"]);
    }

    #[test]
    fn test_member_and_flag_matchers() {
        let items = items();
        let set = filters();

        let found = set.apply(&items, &Selection::new().with("tag", "azul"));
        assert_eq!(names(&found), ["Alpha", "Gamma"]);

        let found = set.apply(&items, &Selection::new().with("state", "on"));
        assert_eq!(names(&found), ["Alpha", "Delta"]);

        let found = set.apply(&items, &Selection::new().with("state", "off"));
        assert_eq!(names(&found), ["Beta", "Gamma"]);

        let found = set.apply(&items, &Selection::new().with("state", "whenever"));
        assert_eq!(found.len(), items.len());
    }

    #[test]
    fn test_bucket_matcher_and_unknown_bucket() {
        let items = items();
        let set = filters();

        let found = set.apply(&items, &Selection::new().with("age", "senior"));
        assert_eq!(names(&found), ["Gamma"]);

        let found = set.apply(&items, &Selection::new().with("age", "adult"));
        assert_eq!(names(&found), ["Beta", "Delta"]);

        let found = set.apply(&items, &Selection::new().with("age", "toddler"));
        assert_eq!(found.len(), items.len());
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let items = items();
        let found = filters().apply(
            &items,
            &Selection::new().with("kind", "a").with("state", "on"),
        );
        assert_eq!(names(&found), ["Alpha"]);
    }

    #[test]
    fn test_result_is_order_preserving_subsequence() {
        let items = items();
        let set = filters();
        let selections = [
            Selection::new().with("q", "a"),
            Selection::new().with("state", "off"),
            Selection::new().with("age", "young").with("tag", "rojo"),
            Selection::new().with("q", "zzz"),
        ];

        for selection in &selections {
            let found = set.apply(&items, selection);
            let mut cursor = items.iter();
            for f in &found {
                assert!(
                    cursor.any(|i| std::ptr::eq(i, *f)),
                    "{selection:?} result is not a subsequence"
                );
            }
        }
    }

    #[test]
    fn test_sequential_application_equals_merge_for_disjoint_keys() {
        let items = items();
        let set = filters();
        let c1 = Selection::new().with("q", "a");
        let c2 = Selection::new().with("state", "off").with("age", "senior");

        let stepwise = set.apply_cloned(&set.apply_cloned(&items, &c1), &c2);
        let combined = set.apply_cloned(&items, &c1.clone().merge(c2.clone()));

        assert_eq!(stepwise, combined);
        assert_eq!(combined, vec![items[2].clone()]);
    }

    #[test]
    fn test_merge_on_shared_key_is_not_sequential_filtering() {
        let items = items();
        let set = filters();
        let c1 = Selection::new().with("age", "young");
        let c2 = Selection::new().with("age", "senior");

        let stepwise = set.apply_cloned(&set.apply_cloned(&items, &c1), &c2);
        let merged = set.apply_cloned(&items, &c1.merge(c2.clone()));

        assert!(stepwise.is_empty());
        assert_eq!(merged, set.apply_cloned(&items, &c2));
    }

    #[test]
    fn test_unknown_keys_are_ignored_and_input_is_untouched() {
        let items = items();
        let before = items.clone();
        let found = filters().apply(&items, &Selection::new().with("colour", "red"));
        assert_eq!(found.len(), items.len());
        assert_eq!(items, before);
    }

    #[test]
    fn test_no_diacritic_folding() {
        let items = vec![item("Cardiología", &[], "a", true, 1)];
        let set = filters();
        assert!(set
            .apply(&items, &Selection::new().with("q", "cardiologia"))
            .is_empty());
        assert_eq!(
            set.apply(&items, &Selection::new().with("q", "LOGÍA")).len(),
            1
        );
    }

    #[test]
    fn test_bucket_contains_is_half_open() {
        let adult = Bucket {
            name: "adult",
            min: Some(30),
            max: Some(60),
        };
        assert!(!adult.contains(29));
        assert!(adult.contains(30));
        assert!(adult.contains(59));
        assert!(!adult.contains(60));
    }
}
