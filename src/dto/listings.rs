use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::listing::Listing;
use crate::forms::listings::ALL_CATEGORIES;

pub const DEFAULT_LOCATION: &str = "Palo Alto, CA";
pub const DEFAULT_DESCRIPTION: &str = "Good condition. Pick up on campus!";

/// Listing prepared for the Tera templates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListingDto {
    pub id: String,
    pub title: String,
    /// Description as entered, empty when the seller left it blank.
    pub description: String,
    /// Description with the grid fallback applied.
    pub summary: String,
    pub price: String,
    pub category: String,
    pub seller_email: String,
    pub image_url: Option<String>,
    pub location: String,
    pub created_at: String,
}

impl From<Listing> for ListingDto {
    fn from(value: Listing) -> Self {
        let description = value
            .description
            .map(|d| d.into_inner())
            .unwrap_or_default();
        let summary = if description.is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            description.clone()
        };
        Self {
            id: value.id.into_inner(),
            title: value.title.into_inner(),
            description,
            summary,
            price: format_price(value.price.get()),
            category: value.category.to_string(),
            seller_email: value.seller_email.into_inner(),
            image_url: value.image_url.map(|url| url.into_inner()),
            location: value
                .location
                .map(|l| l.into_inner())
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            created_at: value.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Sidebar entry of the browse page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryLinkDto {
    pub name: &'static str,
    /// Filter value to link to; `None` for the "All" entry.
    pub category: Option<&'static str>,
    pub selected: bool,
}

/// Builds the sidebar entries: "All" first, then every category.
pub fn category_links(selected: Option<Category>) -> Vec<CategoryLinkDto> {
    let all = CategoryLinkDto {
        name: ALL_CATEGORIES,
        category: None,
        selected: selected.is_none(),
    };
    std::iter::once(all)
        .chain(Category::ALL.iter().map(|category| CategoryLinkDto {
            name: category.as_str(),
            category: Some(category.as_str()),
            selected: selected == Some(*category),
        }))
        .collect()
}

/// Formats a price as `$1,234` or `$1,234.50`.
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction == 0 {
        format!("${grouped}")
    } else {
        format!("${grouped}.{fraction:02}")
    }
}
