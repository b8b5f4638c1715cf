use anyhow::{Error, anyhow};
use uuid::Uuid;
use validator::Validate;

use crate::domain::review::{Review, ReviewDraft};
use crate::domain::tour::DEFAULT_RATINGS_AVERAGE;
use crate::repository::errors::RepositoryError;
use crate::usecase::contracts::{ReviewRepository, TourRepository};

/// Rounds half away from zero at one decimal digit (4.666 -> 4.7, 4.25 -> 4.3).
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub struct ReviewsUseCase<Re, T>
where
    Re: ReviewRepository,
    T: TourRepository,
{
    review_repository: Re,
    tour_repository: T,
}

impl<Re, T> ReviewsUseCase<Re, T>
where
    Re: ReviewRepository,
    T: TourRepository,
{
    pub fn new(review_repository: Re, tour_repository: T) -> Self {
        Self {
            review_repository,
            tour_repository,
        }
    }

    #[tracing::instrument(skip(self, draft), fields(tour_id = %tour_id, user_id = %user_id, rating = draft.rating))]
    pub async fn create_review(
        &self,
        tour_id: Uuid,
        user_id: Uuid,
        draft: ReviewDraft,
    ) -> Result<Review, Error> {
        tracing::debug!("creating review");

        draft
            .validate()
            .map_err(|e| anyhow!("Invalid review: {e}"))?;

        // Verify tour exists
        self.tour_repository
            .find_by_id(tour_id)
            .await?
            .ok_or_else(|| anyhow!("Tour not found"))?;

        // A user may submit at most one review per tour. The unique index on
        // (tour_id, user_id) backstops this check under concurrency.
        if self
            .review_repository
            .find_by_tour_and_user(tour_id, user_id)
            .await?
            .is_some()
        {
            return Err(anyhow!("User has already reviewed this tour"));
        }

        let review = Review::new(tour_id, user_id, draft);
        match self.review_repository.create(&review).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate) => {
                return Err(anyhow!("User has already reviewed this tour"));
            }
            Err(e) => return Err(e.into()),
        }

        self.recompute_after_mutation(tour_id).await;

        tracing::info!(review_id = %review.id, tour_id = %tour_id, "review created successfully");
        Ok(review)
    }

    #[tracing::instrument(skip(self), fields(review_id = %review_id))]
    pub async fn update_review(
        &self,
        review_id: Uuid,
        rating: Option<i16>,
        text: Option<String>,
    ) -> Result<Review, Error> {
        tracing::debug!("updating review");

        if let Some(r) = rating {
            if !(1..=5).contains(&r) {
                return Err(anyhow!("Rating must be between 1 and 5"));
            }
        }
        if let Some(t) = &text {
            if t.len() < 10 || t.len() > 300 {
                return Err(anyhow!("Review text must be between 10 and 300 characters"));
            }
        }

        // Capture the owning tour id before mutating; the recompute below must
        // target the tour the review belonged to when the update was issued.
        let mut review = self
            .review_repository
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| anyhow!("Review not found"))?;
        let tour_id = review.tour_id;

        review.update(rating, text);
        self.review_repository.update(&review).await?;

        self.recompute_after_mutation(tour_id).await;

        tracing::info!(review_id = %review.id, tour_id = %tour_id, "review updated successfully");
        Ok(review)
    }

    #[tracing::instrument(skip(self), fields(review_id = %review_id))]
    pub async fn delete_review(&self, review_id: Uuid) -> Result<(), Error> {
        tracing::debug!("deleting review");

        // Capture the tour id first; it is unreachable once the row is gone.
        let review = self
            .review_repository
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| anyhow!("Review not found"))?;
        let tour_id = review.tour_id;

        self.review_repository.delete(review_id).await?;

        self.recompute_after_mutation(tour_id).await;

        tracing::info!(review_id = %review_id, tour_id = %tour_id, "review deleted successfully");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(tour_id = %tour_id))]
    pub async fn list_reviews(&self, tour_id: Uuid) -> Result<Vec<Review>, Error> {
        tracing::debug!("listing reviews for tour");

        let reviews = self.review_repository.find_by_tour_id(tour_id).await?;

        tracing::debug!(tour_id = %tour_id, count = reviews.len(), "retrieved reviews");
        Ok(reviews)
    }

    /// Rederives the tour's rating summary from its current set of reviews and
    /// persists both fields in one write. Idempotent. A tour that no longer
    /// exists makes this a no-op.
    #[tracing::instrument(skip(self), fields(tour_id = %tour_id))]
    pub async fn recompute_ratings(&self, tour_id: Uuid) -> Result<(), Error> {
        tracing::debug!("recomputing tour ratings");

        let (count, average) = self.review_repository.aggregate_for_tour(tour_id).await?;

        let (quantity, average) = match average {
            Some(avg) if count > 0 => (count as i32, round_to_tenth(avg)),
            // No reviews left: fall back to the default baseline score.
            _ => (0, DEFAULT_RATINGS_AVERAGE),
        };

        match self
            .tour_repository
            .update_rating_summary(tour_id, quantity, average)
            .await
        {
            Ok(()) => {
                tracing::info!(tour_id = %tour_id, quantity, average, "tour ratings recomputed");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                tracing::debug!(tour_id = %tour_id, "tour no longer exists, skipping rating summary write");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The review mutation is already durable at this point, so a failed
    /// recompute only leaves the aggregate stale until the next mutation.
    async fn recompute_after_mutation(&self, tour_id: Uuid) {
        if let Err(e) = self.recompute_ratings(tour_id).await {
            tracing::warn!(tour_id = %tour_id, error = %e, "rating recompute failed, aggregate left stale");
        }
    }
}
