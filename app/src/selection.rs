use crate::menu::{MealId, MenuItem};
use crate::money::Price;

/// The meals a user has picked out during one browsing session, in order of
/// first selection. Membership is keyed by meal id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    items: Vec<MenuItem>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deselect the item if it is already present, select it otherwise.
    pub fn toggle(&mut self, item: MenuItem) {
        if let Some(pos) = self.items.iter().position(|m| m.id == item.id) {
            self.items.remove(pos);
        } else {
            self.items.push(item);
        }
    }

    /// Called by the presentation layer whenever the browsing screen regains
    /// focus, so selections never leak into a new session.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_selected(&self, id: MealId) -> bool {
        self.items.iter().any(|m| m.id == id)
    }

    pub fn total(&self) -> Price {
        self.items.iter().map(|m| m.price).sum()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn snapshot(&self) -> Vec<MenuItem> {
        self.items.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::menu::Catalog;

    fn meal(catalog: &Catalog, id: u32) -> MenuItem {
        catalog.find(MealId(id)).expect("catalog meal").clone()
    }

    #[test]
    fn toggling_twice_deselects() {
        let catalog = Catalog::standard();
        let mut selection = SelectionSet::new();

        selection.toggle(meal(&catalog, 1));
        assert!(selection.is_selected(MealId(1)));

        selection.toggle(meal(&catalog, 1));
        assert!(!selection.is_selected(MealId(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn holds_items_toggled_an_odd_number_of_times_in_first_selection_order() {
        let catalog = Catalog::standard();
        let mut selection = SelectionSet::new();

        selection.toggle(meal(&catalog, 3));
        selection.toggle(meal(&catalog, 1));
        selection.toggle(meal(&catalog, 2));
        selection.toggle(meal(&catalog, 1)); // even: drops out
        selection.toggle(meal(&catalog, 5));
        selection.toggle(meal(&catalog, 3)); // even
        selection.toggle(meal(&catalog, 3)); // odd again: re-added at the end

        let ids: Vec<MealId> = selection.items().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MealId(2), MealId(5), MealId(3)]);
    }

    #[test]
    fn total_is_the_exact_sum_of_prices() {
        let mut selection = SelectionSet::new();
        selection.toggle(MenuItem::new(
            10,
            "A",
            "",
            Price::from_pence(550),
            "a.png",
        ));
        selection.toggle(MenuItem::new(
            11,
            "B",
            "",
            Price::from_pence(325),
            "b.png",
        ));

        assert_eq!(selection.total(), Price::from_pence(875));
    }

    #[test]
    fn clear_empties_the_set() {
        let catalog = Catalog::standard();
        let mut selection = SelectionSet::new();
        selection.toggle(meal(&catalog, 1));
        selection.toggle(meal(&catalog, 2));

        selection.clear();

        assert!(selection.is_empty());
        assert_eq!(selection.total(), Price::ZERO);
    }
}
