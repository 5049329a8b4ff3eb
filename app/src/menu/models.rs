use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Price;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MealId(pub u32);

impl fmt::Display for MealId {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}

/// One purchasable item on the menu. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MealId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
}

impl MenuItem {
    pub fn new(
        id: u32,
        name: &str,
        description: &str,
        price: Price,
        image: &str,
    ) -> Self {
        MenuItem {
            id: MealId(id),
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: image.to_string(),
        }
    }

    /// The resolver key for this item's image: the file name with any
    /// extension suffix stripped.
    pub fn image_key(&self) -> &str {
        match self.image.rfind('.') {
            Some(dot) => &self.image[..dot],
            None => &self.image,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn image_key_strips_the_extension() {
        let item = MenuItem::new(1, "Ribeye", "", Price::from_pence(1895), "ribeye.png");
        assert_eq!(item.image_key(), "ribeye");
    }

    #[test]
    fn image_key_passes_through_bare_names() {
        let item = MenuItem::new(1, "Ribeye", "", Price::from_pence(1895), "ribeye");
        assert_eq!(item.image_key(), "ribeye");
    }

    #[test]
    fn image_key_strips_only_the_last_suffix() {
        let item = MenuItem::new(1, "Ribeye", "", Price::from_pence(1895), "ribeye.v2.png");
        assert_eq!(item.image_key(), "ribeye.v2");
    }
}
