//! Review writes and provider rating aggregation against a real database.

mod common;

use marketplace_core::rating::SubRatings;
use marketplace_db::models::review::ReviewFilter;
use marketplace_db::repositories::{
    CategoryRepo, ProviderRepo, ReviewRepo, ServiceRepo, SubcategoryRepo,
};
use sqlx::PgPool;

fn ratings(q: i32, p: i32, v: i32) -> SubRatings {
    SubRatings::new(q, p, v).unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_provider_has_zero_average(pool: PgPool) {
    let (_, provider) = common::provider(&pool, "fresh").await;
    assert_eq!(provider.avg_rating, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overall_rating_is_derived(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, provider) = common::provider(&pool, "bob").await;

    let review = ReviewRepo::create(&pool, client.id, provider.id, None, ratings(5, 4, 3), "Good")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(review.overall_rating, 4.0);
    assert_eq!(review.quality_rating, 5);
    assert_eq!(review.punctuality_rating, 4);
    assert_eq!(review.value_rating, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_average_tracks_every_review_write(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, provider) = common::provider(&pool, "bob").await;

    let writes = [(5, 5, 5), (1, 2, 3), (4, 4, 5), (2, 2, 2)];
    let mut overalls = Vec::new();

    for (q, p, v) in writes {
        let review = ReviewRepo::create(&pool, client.id, provider.id, None, ratings(q, p, v), "ok")
            .await
            .unwrap()
            .unwrap();
        overalls.push(review.overall_rating);

        let stored = ProviderRepo::find_by_id(&pool, provider.id)
            .await
            .unwrap()
            .unwrap();
        let expected = overalls.iter().sum::<f64>() / overalls.len() as f64;
        assert!(
            (stored.avg_rating - expected).abs() < 1e-9,
            "expected {expected}, got {}",
            stored.avg_rating
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reviews_of_other_providers_do_not_leak(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, first) = common::provider(&pool, "first").await;
    let (_, second) = common::provider(&pool, "second").await;

    ReviewRepo::create(&pool, client.id, first.id, None, ratings(5, 5, 5), "great")
        .await
        .unwrap();
    ReviewRepo::create(&pool, client.id, second.id, None, ratings(1, 1, 1), "poor")
        .await
        .unwrap();

    let first = ProviderRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    let second = ProviderRepo::find_by_id(&pool, second.id).await.unwrap().unwrap();
    assert_eq!(first.avg_rating, 5.0);
    assert_eq!(second.avg_rating, 1.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_provider_writes_nothing(pool: PgPool) {
    let client = common::client(&pool, "alice").await;

    let result = ReviewRepo::create(&pool, client.id, 999_999, None, ratings(3, 3, 3), "hm")
        .await
        .unwrap();
    assert!(result.is_none());

    let total = ReviewRepo::count(&pool, &ReviewFilter::default()).await.unwrap();
    assert_eq!(total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_rating_rejected_by_schema(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, provider) = common::provider(&pool, "bob").await;

    let result = sqlx::query(
        "INSERT INTO reviews (client_id, provider_id, quality_rating, punctuality_rating,
                              value_rating, overall_rating, comment)
         VALUES ($1, $2, 6, 3, 3, 4.0, 'x')",
    )
    .bind(client.id)
    .bind(provider.id)
    .execute(&pool)
    .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_reviews_keep_average_consistent(pool: PgPool) {
    let (_, provider) = common::provider(&pool, "busy").await;
    let mut clients = Vec::new();
    for i in 0..8 {
        clients.push(common::client(&pool, &format!("client{i}")).await);
    }

    let mut handles = Vec::new();
    for (i, client) in clients.iter().enumerate() {
        let pool = pool.clone();
        let client_id = client.id;
        let provider_id = provider.id;
        let score = (i % 5) as i32 + 1;
        handles.push(tokio::spawn(async move {
            let sub = ratings(score, score, score);
            ReviewRepo::create(&pool, client_id, provider_id, None, sub, "c")
                .await
                .unwrap()
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let expected: f64 = sqlx::query_scalar(
        "SELECT AVG(overall_rating) FROM reviews WHERE provider_id = $1",
    )
    .bind(provider.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    let stored = ProviderRepo::find_by_id(&pool, provider.id).await.unwrap().unwrap();
    assert!((stored.avg_rating - expected).abs() < 1e-9);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_average_computed_on_read(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, provider) = common::provider(&pool, "bob").await;
    let (_, subcategory_id) = common::taxonomy(&pool, "Plumbing").await;
    let service_id = common::service(&pool, provider.id, subcategory_id, "Leak repair").await;

    ReviewRepo::create(&pool, client.id, provider.id, Some(service_id), ratings(4, 4, 4), "a")
        .await
        .unwrap();
    ReviewRepo::create(&pool, client.id, provider.id, Some(service_id), ratings(2, 2, 2), "b")
        .await
        .unwrap();
    ReviewRepo::create(&pool, client.id, provider.id, None, ratings(5, 5, 5), "c")
        .await
        .unwrap();

    let service = ServiceRepo::find_by_id(&pool, service_id).await.unwrap().unwrap();
    assert_eq!(service.avg_rating, 3.0);
}

async fn stored_average(pool: &PgPool, provider_id: i64) -> f64 {
    ProviderRepo::find_by_id(pool, provider_id)
        .await
        .unwrap()
        .unwrap()
        .avg_rating
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_service_refreshes_average(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, provider) = common::provider(&pool, "bob").await;
    let (_, subcategory_id) = common::taxonomy(&pool, "Plumbing").await;
    let service_id = common::service(&pool, provider.id, subcategory_id, "Leak repair").await;

    ReviewRepo::create(&pool, client.id, provider.id, Some(service_id), ratings(1, 1, 1), "bad")
        .await
        .unwrap();
    ReviewRepo::create(&pool, client.id, provider.id, None, ratings(5, 5, 5), "great")
        .await
        .unwrap();
    assert_eq!(stored_average(&pool, provider.id).await, 3.0);

    assert!(ServiceRepo::delete(&pool, service_id).await.unwrap());

    let remaining = ReviewRepo::count(
        &pool,
        &ReviewFilter {
            provider: Some(provider.id),
            service: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(remaining, 1);
    assert_eq!(stored_average(&pool, provider.id).await, 5.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_only_reviewed_service_resets_average(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, provider) = common::provider(&pool, "bob").await;
    let (_, subcategory_id) = common::taxonomy(&pool, "Plumbing").await;
    let service_id = common::service(&pool, provider.id, subcategory_id, "Leak repair").await;

    ReviewRepo::create(&pool, client.id, provider.id, Some(service_id), ratings(4, 4, 4), "ok")
        .await
        .unwrap();

    ServiceRepo::delete(&pool, service_id).await.unwrap();
    assert_eq!(stored_average(&pool, provider.id).await, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_subcategory_refreshes_every_affected_provider(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, first) = common::provider(&pool, "first").await;
    let (_, second) = common::provider(&pool, "second").await;
    let (_, subcategory_id) = common::taxonomy(&pool, "Plumbing").await;
    let first_service = common::service(&pool, first.id, subcategory_id, "Pipes").await;
    let second_service = common::service(&pool, second.id, subcategory_id, "Drains").await;

    ReviewRepo::create(&pool, client.id, first.id, Some(first_service), ratings(2, 2, 2), "a")
        .await
        .unwrap();
    ReviewRepo::create(&pool, client.id, first.id, None, ratings(4, 4, 4), "b")
        .await
        .unwrap();
    ReviewRepo::create(&pool, client.id, second.id, Some(second_service), ratings(5, 5, 5), "c")
        .await
        .unwrap();

    assert!(SubcategoryRepo::delete(&pool, subcategory_id).await.unwrap());

    assert_eq!(stored_average(&pool, first.id).await, 4.0);
    assert_eq!(stored_average(&pool, second.id).await, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_category_refreshes_average(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, provider) = common::provider(&pool, "bob").await;
    let (category_id, subcategory_id) = common::taxonomy(&pool, "Plumbing").await;
    let (_, other_subcategory) = common::taxonomy(&pool, "Electrical").await;
    let doomed = common::service(&pool, provider.id, subcategory_id, "Pipes").await;
    let kept = common::service(&pool, provider.id, other_subcategory, "Wiring").await;

    ReviewRepo::create(&pool, client.id, provider.id, Some(doomed), ratings(1, 1, 1), "a")
        .await
        .unwrap();
    ReviewRepo::create(&pool, client.id, provider.id, Some(kept), ratings(3, 3, 3), "b")
        .await
        .unwrap();

    assert!(CategoryRepo::delete(&pool, category_id).await.unwrap());

    assert_eq!(stored_average(&pool, provider.id).await, 3.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_missing_service_reports_false(pool: PgPool) {
    assert!(!ServiceRepo::delete(&pool, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_is_newest_first(pool: PgPool) {
    let client = common::client(&pool, "alice").await;
    let (_, provider) = common::provider(&pool, "bob").await;

    let first = ReviewRepo::create(&pool, client.id, provider.id, None, ratings(3, 3, 3), "1")
        .await
        .unwrap()
        .unwrap();
    let second = ReviewRepo::create(&pool, client.id, provider.id, None, ratings(4, 4, 4), "2")
        .await
        .unwrap()
        .unwrap();

    let filter = ReviewFilter {
        provider: Some(provider.id),
        service: None,
    };
    let listed = ReviewRepo::list(&pool, &filter, 10, 0).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}
