// ── Filter composer ──
//
// Aggregates user-entered product predicates into one query description
// and republishes the complete state on every change. Does not fetch:
// wiring the filter to a collection reload is up to the caller.

use backoffice_api::Product;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// All list-narrowing predicates. Each empty field means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search over name, description and tags.
    pub search: String,
    pub category: Option<i64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Only items with stock left.
    pub in_stock: bool,
}

/// A single field edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Search(String),
    Category(Option<i64>),
    MinPrice(Option<f64>),
    MaxPrice(Option<f64>),
    InStock(bool),
}

impl FilterState {
    /// Returns `true` when no field constrains the list.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A copy of this state with `change` applied.
    pub fn with(&self, change: FilterChange) -> Self {
        let mut next = self.clone();
        match change {
            FilterChange::Search(search) => next.search = search,
            FilterChange::Category(category) => next.category = category,
            FilterChange::MinPrice(price) => next.min_price = price,
            FilterChange::MaxPrice(price) => next.max_price = price,
            FilterChange::InStock(in_stock) => next.in_stock = in_stock,
        }
        next
    }

    /// Query pairs for the product listing. Unconstrained fields are omitted.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            query.push(("search".to_owned(), search.to_owned()));
        }
        if let Some(category) = self.category {
            query.push(("category_id".to_owned(), category.to_string()));
        }
        if let Some(min) = self.min_price {
            query.push(("min_price".to_owned(), min.to_string()));
        }
        if let Some(max) = self.max_price {
            query.push(("max_price".to_owned(), max.to_string()));
        }
        if self.in_stock {
            query.push(("in_stock".to_owned(), "true".to_owned()));
        }
        query
    }

    /// Local evaluation against an already fetched product.
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() {
            let in_name = product.name.to_lowercase().contains(&search);
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&search));
            let in_tags = product
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&search));
            if !(in_name || in_description || in_tags) {
                return false;
            }
        }
        if self
            .category
            .is_some_and(|c| product.category_id != Some(c))
        {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        !(self.in_stock && product.stock <= 0)
    }
}

type Listener = Box<dyn Fn(&FilterState) + Send + Sync>;

/// Local reducer over [`FilterState`] with a change listener.
///
/// Every edit stores the new state and hands the listener the complete
/// state (never a diff). Panel visibility is tracked separately and never
/// notifies.
pub struct FilterComposer {
    state: FilterState,
    panel_open: bool,
    on_change: Listener,
}

impl FilterComposer {
    pub fn new(on_change: impl Fn(&FilterState) + Send + Sync + 'static) -> Self {
        Self {
            state: FilterState::default(),
            panel_open: false,
            on_change: Box::new(on_change),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Apply one field edit and notify.
    pub fn update(&mut self, change: FilterChange) -> &FilterState {
        trace!(?change, "filter field changed");
        self.state = self.state.with(change);
        (self.on_change)(&self.state);
        &self.state
    }

    /// Reset every field to empty and notify once.
    pub fn clear(&mut self) -> &FilterState {
        self.state = FilterState::default();
        (self.on_change)(&self.state);
        &self.state
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        self.panel_open
    }
}

impl std::fmt::Debug for FilterComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterComposer")
            .field("state", &self.state)
            .field("panel_open", &self.panel_open)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;

    fn recording() -> (FilterComposer, Arc<Mutex<Vec<FilterState>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let composer = FilterComposer::new(move |state| sink.lock().unwrap().push(state.clone()));
        (composer, seen)
    }

    fn product(price: f64, stock: i64) -> Product {
        Product {
            id: 1,
            name: "Desk Lamp".into(),
            description: Some("Warm LED light".into()),
            price,
            stock,
            category_id: Some(4),
            image_url: None,
            tags: vec!["lighting".into()],
        }
    }

    #[test]
    fn every_change_publishes_complete_state() {
        let (mut composer, seen) = recording();

        composer.update(FilterChange::Search("lamp".into()));
        composer.update(FilterChange::InStock(true));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[1],
            FilterState {
                search: "lamp".into(),
                in_stock: true,
                ..FilterState::default()
            }
        );
    }

    #[test]
    fn clear_resets_everything_and_notifies_once() {
        let (mut composer, seen) = recording();
        composer.update(FilterChange::Search("x".into()));
        composer.update(FilterChange::Category(Some(3)));
        composer.update(FilterChange::MinPrice(Some(10.0)));
        composer.update(FilterChange::MaxPrice(Some(20.0)));
        composer.update(FilterChange::InStock(true));

        let cleared = composer.clear().clone();

        assert_eq!(cleared, FilterState::default());
        assert!(cleared.is_empty());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen.last().unwrap(), &FilterState::default());
    }

    #[test]
    fn panel_toggle_does_not_notify() {
        let (mut composer, seen) = recording();
        assert!(composer.toggle_panel());
        assert!(!composer.toggle_panel());
        assert!(seen.lock().unwrap().is_empty());
        assert!(composer.state().is_empty());
    }

    #[test]
    fn query_omits_unconstrained_fields() {
        assert!(FilterState::default().to_query().is_empty());

        let state = FilterState {
            search: "  lamp ".into(),
            category: Some(4),
            max_price: Some(99.5),
            in_stock: true,
            ..FilterState::default()
        };
        assert_eq!(
            state.to_query(),
            vec![
                ("search".to_owned(), "lamp".to_owned()),
                ("category_id".to_owned(), "4".to_owned()),
                ("max_price".to_owned(), "99.5".to_owned()),
                ("in_stock".to_owned(), "true".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(FilterState::default().matches(&product(0.0, 0)));
    }

    #[test]
    fn matches_each_predicate() {
        let lamp = product(50.0, 0);

        let by_tag = FilterState::default().with(FilterChange::Search("LIGHT".into()));
        assert!(by_tag.matches(&lamp));

        let other_category = FilterState::default().with(FilterChange::Category(Some(9)));
        assert!(!other_category.matches(&lamp));

        let too_cheap = FilterState::default().with(FilterChange::MinPrice(Some(60.0)));
        assert!(!too_cheap.matches(&lamp));

        let in_range = FilterState::default()
            .with(FilterChange::MinPrice(Some(50.0)))
            .with(FilterChange::MaxPrice(Some(50.0)));
        assert!(in_range.matches(&lamp));

        let in_stock = FilterState::default().with(FilterChange::InStock(true));
        assert!(!in_stock.matches(&lamp));
        assert!(in_stock.matches(&product(50.0, 3)));
    }
}
