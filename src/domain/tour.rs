use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Baseline score displayed for a tour that has no reviews yet.
pub const DEFAULT_RATINGS_AVERAGE: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "difficulty", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tour {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub duration_days: i32,
    pub max_group_size: i32,
    pub difficulty: Difficulty,
    pub price: f64,
    pub price_discount: Option<f64>,
    pub summary: String,
    pub description: Option<String>,
    pub image_cover: String,
    /// Derived from the tour's reviews, written only by the rating recompute.
    pub ratings_average: f64,
    /// Derived from the tour's reviews, written only by the rating recompute.
    pub ratings_quantity: i32,
    pub secret: bool,
    pub start_dates: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a tour. The discount-below-price rule is
/// cross-field and enforced by the tours use case.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TourDraft {
    #[validate(length(min = 10, max = 40))]
    pub name: String,
    #[validate(range(min = 1))]
    pub duration_days: i32,
    #[validate(range(min = 1))]
    pub max_group_size: i32,
    pub difficulty: Difficulty,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub price_discount: Option<f64>,
    #[validate(length(min = 1))]
    pub summary: String,
    pub description: Option<String>,
    pub image_cover: String,
    #[serde(default)]
    pub start_dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub secret: bool,
}

impl Tour {
    pub fn new(draft: TourDraft) -> Self {
        let slug = slugify(&draft.name);
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            slug,
            duration_days: draft.duration_days,
            max_group_size: draft.max_group_size,
            difficulty: draft.difficulty,
            price: draft.price,
            price_discount: draft.price_discount,
            summary: draft.summary,
            description: draft.description,
            image_cover: draft.image_cover,
            ratings_average: DEFAULT_RATINGS_AVERAGE,
            ratings_quantity: 0,
            secret: draft.secret,
            start_dates: draft.start_dates,
            created_at: Utc::now(),
        }
    }
}

/// Lowercases the name and collapses every non-alphanumeric run into a single dash.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> TourDraft {
        TourDraft {
            name: name.to_string(),
            duration_days: 5,
            max_group_size: 10,
            difficulty: Difficulty::Medium,
            price: 497.0,
            price_discount: None,
            summary: "Exploring the jaw-dropping US east coast by foot".to_string(),
            description: None,
            image_cover: "tour-2-cover.jpg".to_string(),
            start_dates: vec![],
            secret: false,
        }
    }

    #[test]
    fn test_new_tour_defaults() {
        let tour = Tour::new(draft("The Sea Explorer"));

        assert_eq!(tour.slug, "the-sea-explorer");
        assert_eq!(tour.ratings_average, DEFAULT_RATINGS_AVERAGE);
        assert_eq!(tour.ratings_quantity, 0);
        assert!(!tour.secret);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("The Forest Hiker"), "the-forest-hiker");
        assert_eq!(slugify("  Tour --- of 2024! "), "tour-of-2024");
        assert_eq!(slugify("Über Tour"), "über-tour");
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft("The Sea Explorer").validate().is_ok());

        assert!(draft("Too short").validate().is_err());

        let mut d = draft("The Sea Explorer");
        d.duration_days = 0;
        assert!(d.validate().is_err());
    }
}
