use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub tour_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a review.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewDraft {
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(min = 10, max = 300))]
    pub text: String,
}

impl Review {
    pub fn new(tour_id: Uuid, user_id: Uuid, draft: ReviewDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            tour_id,
            user_id,
            rating: draft.rating,
            text: draft.text,
            created_at: Utc::now(),
        }
    }

    pub fn update(&mut self, rating: Option<i16>, text: Option<String>) {
        if let Some(r) = rating {
            self.rating = r;
        }
        if let Some(t) = text {
            self.text = t;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rating: i16) -> ReviewDraft {
        ReviewDraft {
            rating,
            text: "Absolutely loved every day of it".to_string(),
        }
    }

    #[test]
    fn test_review_creation() {
        let tour_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let review = Review::new(tour_id, user_id, draft(4));

        assert_eq!(review.tour_id, tour_id);
        assert_eq!(review.user_id, user_id);
        assert_eq!(review.rating, 4);
    }

    #[test]
    fn test_review_update() {
        let mut review = Review::new(Uuid::new_v4(), Uuid::new_v4(), draft(4));

        review.update(Some(2), None);
        assert_eq!(review.rating, 2);
        assert_eq!(review.text, "Absolutely loved every day of it");

        review.update(None, Some("Changed my mind after the refund".to_string()));
        assert_eq!(review.rating, 2);
        assert_eq!(review.text, "Changed my mind after the refund");
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft(1).validate().is_ok());
        assert!(draft(5).validate().is_ok());
        assert!(draft(0).validate().is_err());
        assert!(draft(6).validate().is_err());

        let d = ReviewDraft {
            rating: 3,
            text: "too short".to_string(),
        };
        assert!(d.validate().is_err());
    }
}
