use std::path::Path;

use tourbook::config::AppConfig;
use tourbook::repository::postgres::{
    PostgresReviewRepository, PostgresTourRepository, PostgresUserRepository, create_pool,
};
use tourbook::seed::load_dev_data;
use tourbook::telemetry;
use tourbook::usecase::contracts::{ReviewRepository, TourRepository, UserRepository};
use tourbook::usecase::reviews::ReviewsUseCase;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    telemetry::init(&config).expect("failed to initialize telemetry");

    tracing::info!("starting the seed tool");

    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .expect("failed to create database pool");
    tracing::info!("database pool created");

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("database migrations applied");

    let tour_repository = PostgresTourRepository::new(pool.clone());
    let review_repository = PostgresReviewRepository::new(pool.clone());
    let user_repository = PostgresUserRepository::new(pool);

    match std::env::args().nth(1).as_deref() {
        Some("--import") => {
            import(&config, tour_repository, review_repository, user_repository).await?
        }
        Some("--delete") => delete(&tour_repository, &review_repository, &user_repository).await?,
        _ => {
            eprintln!("usage: seed --import | --delete");
            std::process::exit(2);
        }
    }

    if config.telemetry_enabled {
        telemetry::shutdown();
    }

    Ok(())
}

async fn import(
    config: &AppConfig,
    tour_repository: PostgresTourRepository,
    review_repository: PostgresReviewRepository,
    user_repository: PostgresUserRepository,
) -> anyhow::Result<()> {
    let data = load_dev_data(Path::new(&config.dev_data_dir))?;

    for user in &data.users {
        user_repository.create(user).await?;
    }
    for tour in &data.tours {
        tour_repository.create(tour).await?;
    }
    for review in &data.reviews {
        review_repository.create(review).await?;
    }

    // Fixtures carry no rating summaries; derive them from the imported reviews.
    let reviews_usecase = ReviewsUseCase::new(review_repository, tour_repository);
    for tour in &data.tours {
        reviews_usecase.recompute_ratings(tour.id).await?;
    }

    tracing::info!(
        tours = data.tours.len(),
        users = data.users.len(),
        reviews = data.reviews.len(),
        "data successfully loaded"
    );
    Ok(())
}

async fn delete(
    tour_repository: &PostgresTourRepository,
    review_repository: &PostgresReviewRepository,
    user_repository: &PostgresUserRepository,
) -> anyhow::Result<()> {
    let reviews = review_repository.delete_all().await?;
    let tours = tour_repository.delete_all().await?;
    let users = user_repository.delete_all().await?;

    tracing::info!(tours, users, reviews, "data successfully deleted");
    Ok(())
}
