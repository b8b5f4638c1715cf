use uuid::Uuid;

use crate::domain::review::Review;
use crate::domain::tour::Tour;
use crate::domain::user::User;
use crate::repository::errors::RepositoryError;

#[cfg_attr(test, mockall::automock)]
pub trait TourRepository: Send + Sync {
    async fn create(&self, tour: &Tour) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tour>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Tour>, RepositoryError>;
    /// Writes both derived rating fields in one statement. Fails with
    /// `RepositoryError::NotFound` when the tour no longer exists.
    async fn update_rating_summary(
        &self,
        id: Uuid,
        quantity: i32,
        average: f64,
    ) -> Result<(), RepositoryError>;
    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError>;
    async fn find_by_tour_id(&self, tour_id: Uuid) -> Result<Vec<Review>, RepositoryError>;
    async fn find_by_tour_and_user(
        &self,
        tour_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, RepositoryError>;
    async fn update(&self, review: &Review) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// Review count and mean rating for one tour, read in a single grouped query.
    async fn aggregate_for_tour(&self, tour_id: Uuid)
    -> Result<(i64, Option<f64>), RepositoryError>;
    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}
