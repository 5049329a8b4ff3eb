use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod models;

pub use self::models::{MealId, MenuItem};

use crate::money::Price;

/// The static menu, fully loaded at session start.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn standard() -> Self {
        let items = vec![
            MenuItem::new(
                1,
                "Classic Cheeseburger",
                "Beef patty, cheddar, pickles and burger sauce",
                Price::from_pence(850),
                "cheeseburger.png",
            ),
            MenuItem::new(
                2,
                "Margherita Pizza",
                "Tomato, mozzarella and basil on a stone-baked base",
                Price::from_pence(1095),
                "margherita.png",
            ),
            MenuItem::new(
                3,
                "Caesar Salad",
                "Baby gem, parmesan, croutons and anchovy dressing",
                Price::from_pence(725),
                "caesar-salad.png",
            ),
            MenuItem::new(
                4,
                "Spaghetti Carbonara",
                "Pancetta, egg yolk and pecorino",
                Price::from_pence(1150),
                "carbonara.png",
            ),
            MenuItem::new(
                5,
                "Fish and Chips",
                "Beer-battered haddock with thick-cut chips",
                Price::from_pence(975),
                "fish-and-chips.png",
            ),
            MenuItem::new(
                6,
                "Chicken Tikka Masala",
                "With pilau rice and naan",
                Price::from_pence(1240),
                "tikka-masala.png",
            ),
            MenuItem::new(
                7,
                "Veggie Burrito",
                "Black beans, rice, guacamole and salsa",
                Price::from_pence(895),
                "veggie-burrito.png",
            ),
            MenuItem::new(
                8,
                "Chocolate Brownie",
                "Warm, with vanilla ice cream",
                Price::from_pence(450),
                "brownie.png",
            ),
        ];
        Catalog { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: MealId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Maps image reference keys to renderable resources. Unknown keys resolve to
/// nothing; callers render without an image.
#[derive(Debug, Clone, Default)]
pub struct ImageDirectory {
    entries: HashMap<String, PathBuf>,
}

impl ImageDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<P: Into<PathBuf>>(&mut self, key: &str, path: P) {
        self.entries.insert(key.to_string(), path.into());
    }

    pub fn resolve(&self, item: &MenuItem) -> Option<&Path> {
        self.entries.get(item.image_key()).map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = Catalog::standard();
        for item in catalog.items() {
            let occurrences = catalog
                .items()
                .iter()
                .filter(|other| other.id == item.id)
                .count();
            assert_eq!(occurrences, 1, "duplicate id {}", item.id);
        }
    }

    #[test]
    fn finds_items_by_id() {
        let catalog = Catalog::standard();
        let item = catalog.find(MealId(2)).expect("meal 2");
        assert_eq!(item.name, "Margherita Pizza");
        assert_eq!(catalog.find(MealId(999)), None);
    }

    #[test]
    fn resolves_images_by_stripped_key() {
        let catalog = Catalog::standard();
        let item = catalog.find(MealId(1)).expect("meal 1");

        let mut images = ImageDirectory::new();
        images.insert("cheeseburger", "assets/images/cheeseburger.png");

        assert_eq!(
            images.resolve(item),
            Some(Path::new("assets/images/cheeseburger.png"))
        );
    }

    #[test]
    fn missing_image_resolves_to_none() {
        let catalog = Catalog::standard();
        let item = catalog.find(MealId(1)).expect("meal 1");

        let images = ImageDirectory::new();
        assert_eq!(images.resolve(item), None);
    }
}
