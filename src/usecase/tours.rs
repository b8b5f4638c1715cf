use anyhow::{Error, anyhow};
use uuid::Uuid;
use validator::Validate;

use crate::domain::tour::{Tour, TourDraft};
use crate::usecase::contracts::TourRepository;

pub struct ToursUseCase<T>
where
    T: TourRepository,
{
    tour_repository: T,
}

impl<T> ToursUseCase<T>
where
    T: TourRepository,
{
    pub fn new(tour_repository: T) -> Self {
        Self { tour_repository }
    }

    #[tracing::instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_tour(&self, draft: TourDraft) -> Result<Tour, Error> {
        tracing::debug!("creating tour");

        draft.validate().map_err(|e| anyhow!("Invalid tour: {e}"))?;

        if let Some(discount) = draft.price_discount {
            if discount >= draft.price {
                return Err(anyhow!("Discount price must be below regular price"));
            }
        }

        let tour = Tour::new(draft);
        self.tour_repository.create(&tour).await?;

        tracing::info!(tour_id = %tour.id, slug = %tour.slug, "tour created successfully");
        Ok(tour)
    }

    #[tracing::instrument(skip(self), fields(tour_id = %tour_id))]
    pub async fn get_tour(&self, tour_id: Uuid) -> Result<Tour, Error> {
        tracing::debug!("getting tour");

        self.tour_repository
            .find_by_id(tour_id)
            .await?
            .ok_or_else(|| anyhow!("Tour not found"))
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_tours(&self) -> Result<Vec<Tour>, Error> {
        tracing::debug!("listing tours");

        let tours = self.tour_repository.list().await?;

        tracing::debug!(count = tours.len(), "retrieved tours");
        Ok(tours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tour::Difficulty;
    use crate::usecase::contracts::MockTourRepository;
    use mockall::predicate::eq;

    fn draft() -> TourDraft {
        TourDraft {
            name: "The Sea Explorer".to_string(),
            duration_days: 7,
            max_group_size: 15,
            difficulty: Difficulty::Medium,
            price: 497.0,
            price_discount: Some(447.0),
            summary: "Exploring the jaw-dropping US east coast by foot".to_string(),
            description: None,
            image_cover: "tour-2-cover.jpg".to_string(),
            start_dates: vec![],
            secret: false,
        }
    }

    #[tokio::test]
    async fn test_create_tour_success() {
        let mut tour_repo = MockTourRepository::new();

        tour_repo.expect_create().times(1).returning(|_| Ok(()));

        let usecase = ToursUseCase::new(tour_repo);
        let tour = usecase.create_tour(draft()).await.unwrap();

        assert_eq!(tour.slug, "the-sea-explorer");
        assert_eq!(tour.ratings_quantity, 0);
        assert_eq!(tour.ratings_average, 4.5);
    }

    #[tokio::test]
    async fn test_create_tour_rejects_invalid_draft() {
        let tour_repo = MockTourRepository::new();

        let mut bad = draft();
        bad.price_discount = Some(600.0);

        let usecase = ToursUseCase::new(tour_repo);
        let result = usecase.create_tour(bad).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_tour_not_found() {
        let mut tour_repo = MockTourRepository::new();
        let tour_id = Uuid::new_v4();

        tour_repo
            .expect_find_by_id()
            .with(eq(tour_id))
            .times(1)
            .returning(|_| Ok(None));

        let usecase = ToursUseCase::new(tour_repo);
        let result = usecase.get_tour(tour_id).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_list_tours() {
        let mut tour_repo = MockTourRepository::new();

        tour_repo.expect_list().times(1).returning(|| Ok(vec![]));

        let usecase = ToursUseCase::new(tour_repo);
        let tours = usecase.list_tours().await.unwrap();

        assert!(tours.is_empty());
    }
}
