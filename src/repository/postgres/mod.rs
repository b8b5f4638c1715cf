use sqlx::{PgPool, postgres::PgPoolOptions};
use uuid::Uuid;

use crate::{
    domain::review::Review,
    domain::tour::Tour,
    domain::user::User,
    repository::errors::RepositoryError,
    usecase::contracts::{ReviewRepository, TourRepository, UserRepository},
};

pub struct PostgresTourRepository {
    pool: PgPool,
}

impl PostgresTourRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TourRepository for PostgresTourRepository {
    #[tracing::instrument(skip(self, tour), fields(tour_id = %tour.id, slug = %tour.slug))]
    async fn create(&self, tour: &Tour) -> Result<(), RepositoryError> {
        tracing::debug!("creating tour");

        sqlx::query(
            r#"
            INSERT INTO tours (id, name, slug, duration_days, max_group_size, difficulty,
                               price, price_discount, summary, description, image_cover,
                               ratings_average, ratings_quantity, secret, start_dates, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(tour.id)
        .bind(&tour.name)
        .bind(&tour.slug)
        .bind(tour.duration_days)
        .bind(tour.max_group_size)
        .bind(tour.difficulty)
        .bind(tour.price)
        .bind(tour.price_discount)
        .bind(&tour.summary)
        .bind(&tour.description)
        .bind(&tour.image_cover)
        .bind(tour.ratings_average)
        .bind(tour.ratings_quantity)
        .bind(tour.secret)
        .bind(&tour.start_dates)
        .bind(tour.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(tour_id = %tour.id, "tour created successfully");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(tour_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tour>, RepositoryError> {
        tracing::debug!("finding tour by id");

        let tour = sqlx::query_as::<_, Tour>(
            r#"
            SELECT id, name, slug, duration_days, max_group_size, difficulty,
                   price, price_discount, summary, description, image_cover,
                   ratings_average, ratings_quantity, secret, start_dates, created_at
            FROM tours
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tour)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Tour>, RepositoryError> {
        tracing::debug!("listing tours");

        // Secret tours never show up in listings.
        let tours = sqlx::query_as::<_, Tour>(
            r#"
            SELECT id, name, slug, duration_days, max_group_size, difficulty,
                   price, price_discount, summary, description, image_cover,
                   ratings_average, ratings_quantity, secret, start_dates, created_at
            FROM tours
            WHERE secret = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = tours.len(), "found tours");
        Ok(tours)
    }

    #[tracing::instrument(skip(self), fields(tour_id = %id, quantity, average))]
    async fn update_rating_summary(
        &self,
        id: Uuid,
        quantity: i32,
        average: f64,
    ) -> Result<(), RepositoryError> {
        tracing::debug!("updating tour rating summary");

        let result = sqlx::query(
            r#"
            UPDATE tours
            SET ratings_quantity = $2, ratings_average = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(average)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::debug!(tour_id = %id, "tour rating summary updated successfully");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        tracing::debug!("deleting all tours");

        let result = sqlx::query("DELETE FROM tours").execute(&self.pool).await?;

        tracing::debug!(count = result.rows_affected(), "tours deleted");
        Ok(result.rows_affected())
    }
}

pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ReviewRepository for PostgresReviewRepository {
    #[tracing::instrument(skip(self, review), fields(review_id = %review.id, tour_id = %review.tour_id, user_id = %review.user_id))]
    async fn create(&self, review: &Review) -> Result<(), RepositoryError> {
        tracing::debug!("creating review");

        sqlx::query(
            r#"
            INSERT INTO reviews (id, tour_id, user_id, rating, text, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(review.id)
        .bind(review.tour_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(&review.text)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(review_id = %review.id, "review created successfully");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(review_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError> {
        tracing::debug!("finding review by id");

        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, tour_id, user_id, rating, text, created_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    #[tracing::instrument(skip(self), fields(tour_id = %tour_id))]
    async fn find_by_tour_id(&self, tour_id: Uuid) -> Result<Vec<Review>, RepositoryError> {
        tracing::debug!("finding reviews by tour_id");

        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, tour_id, user_id, rating, text, created_at
            FROM reviews
            WHERE tour_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(tour_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(tour_id = %tour_id, count = reviews.len(), "found reviews");
        Ok(reviews)
    }

    #[tracing::instrument(skip(self), fields(tour_id = %tour_id, user_id = %user_id))]
    async fn find_by_tour_and_user(
        &self,
        tour_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, RepositoryError> {
        tracing::debug!("finding review by tour and user");

        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, tour_id, user_id, rating, text, created_at
            FROM reviews
            WHERE tour_id = $1 AND user_id = $2
            "#,
        )
        .bind(tour_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    #[tracing::instrument(skip(self, review), fields(review_id = %review.id))]
    async fn update(&self, review: &Review) -> Result<(), RepositoryError> {
        tracing::debug!("updating review");

        let result = sqlx::query(
            r#"
            UPDATE reviews
            SET rating = $2, text = $3
            WHERE id = $1
            "#,
        )
        .bind(review.id)
        .bind(review.rating)
        .bind(&review.text)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::debug!(review_id = %review.id, "review updated successfully");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(review_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        tracing::debug!("deleting review");

        let result = sqlx::query(
            r#"
            DELETE FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::debug!(review_id = %id, "review deleted successfully");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(tour_id = %tour_id))]
    async fn aggregate_for_tour(
        &self,
        tour_id: Uuid,
    ) -> Result<(i64, Option<f64>), RepositoryError> {
        tracing::debug!("aggregating reviews for tour");

        let result: (i64, Option<f64>) = sqlx::query_as(
            r#"
            SELECT COUNT(*), AVG(rating::float8)
            FROM reviews
            WHERE tour_id = $1
            "#,
        )
        .bind(tour_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(tour_id = %tour_id, count = result.0, average = ?result.1, "review aggregate retrieved");
        Ok(result)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        tracing::debug!("deleting all reviews");

        let result = sqlx::query("DELETE FROM reviews")
            .execute(&self.pool)
            .await?;

        tracing::debug!(count = result.rows_affected(), "reviews deleted");
        Ok(result.rows_affected())
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        tracing::debug!("creating user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, photo, role, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.photo)
        .bind(user.role)
        .bind(user.active)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(user_id = %user.id, "user created successfully");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        tracing::debug!("finding user by id");

        // Deactivated accounts are invisible to lookups.
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, photo, role, active, created_at
            FROM users
            WHERE id = $1 AND active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        tracing::debug!("finding user by email");

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, photo, role, active, created_at
            FROM users
            WHERE email = $1 AND active = TRUE
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        tracing::debug!("deleting all users");

        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;

        tracing::debug!(count = result.rows_affected(), "users deleted");
        Ok(result.rows_affected())
    }
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
