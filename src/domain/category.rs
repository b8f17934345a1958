use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::TypeConstraintError;

/// Closed set of listing categories.
///
/// The stored and displayed representation is the human readable label
/// returned by [`Category::as_str`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Vehicles,
    PropertyRentals,
    Apparel,
    Classifieds,
    Electronics,
    Entertainment,
    Family,
    FreeStuff,
    GardenAndOutdoor,
    Hobbies,
    HomeGoods,
    HomeImprovement,
    HomeSales,
    MusicalInstruments,
    OfficeSupplies,
    PetSupplies,
    SportingGoods,
    ToysAndGames,
    BuyAndSellGroups,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 19] = [
        Self::Vehicles,
        Self::PropertyRentals,
        Self::Apparel,
        Self::Classifieds,
        Self::Electronics,
        Self::Entertainment,
        Self::Family,
        Self::FreeStuff,
        Self::GardenAndOutdoor,
        Self::Hobbies,
        Self::HomeGoods,
        Self::HomeImprovement,
        Self::HomeSales,
        Self::MusicalInstruments,
        Self::OfficeSupplies,
        Self::PetSupplies,
        Self::SportingGoods,
        Self::ToysAndGames,
        Self::BuyAndSellGroups,
    ];

    /// String representation used in persistence and templates.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vehicles => "Vehicles",
            Self::PropertyRentals => "Property Rentals",
            Self::Apparel => "Apparel",
            Self::Classifieds => "Classifieds",
            Self::Electronics => "Electronics",
            Self::Entertainment => "Entertainment",
            Self::Family => "Family",
            Self::FreeStuff => "Free Stuff",
            Self::GardenAndOutdoor => "Garden & Outdoor",
            Self::Hobbies => "Hobbies",
            Self::HomeGoods => "Home Goods",
            Self::HomeImprovement => "Home Improvement",
            Self::HomeSales => "Home Sales",
            Self::MusicalInstruments => "Musical Instruments",
            Self::OfficeSupplies => "Office Supplies",
            Self::PetSupplies => "Pet Supplies",
            Self::SportingGoods => "Sporting Goods",
            Self::ToysAndGames => "Toys & Games",
            Self::BuyAndSellGroups => "Buy and sell groups",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("category: {value}")))
    }
}

impl TryFrom<String> for Category {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_for_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::try_from(category.as_str()).unwrap(), category);
        }
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 19);
    }

    #[test]
    fn rejects_unknown_and_differently_cased_labels() {
        assert!(Category::try_from("Boats").is_err());
        assert!(Category::try_from("vehicles").is_err());
        assert!(Category::try_from("All").is_err());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Category::GardenAndOutdoor).unwrap();
        assert_eq!(json, "\"Garden & Outdoor\"");
        let parsed: Category = serde_json::from_str("\"Toys & Games\"").unwrap();
        assert_eq!(parsed, Category::ToysAndGames);
    }
}
