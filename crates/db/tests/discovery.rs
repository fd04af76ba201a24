//! Taxonomy filters and the proximity prefilter against a real database.

mod common;

use marketplace_core::geo::{rank_nearby, BoundingBox, DistanceMode, GeoPoint};
use marketplace_db::models::provider::ProviderFilter;
use marketplace_db::repositories::ProviderRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_by_category_is_distinct(pool: PgPool) {
    let (category_id, subcategory_id) = common::taxonomy(&pool, "Cleaning").await;
    let (_, provider) = common::provider(&pool, "cleaner").await;
    common::service(&pool, provider.id, subcategory_id, "Windows").await;
    common::service(&pool, provider.id, subcategory_id, "Floors").await;

    let listed = ProviderRepo::list_by_category(&pool, category_id, 10, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, provider.id);
    assert_eq!(listed[0].services_count, 2);

    let count = ProviderRepo::count_by_category(&pool, category_id).await.unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_by_subcategory_excludes_sibling_subcategories(pool: PgPool) {
    let (_, plumbing) = common::taxonomy(&pool, "Plumbing").await;
    let (_, painting) = common::taxonomy(&pool, "Painting").await;
    let (_, plumber) = common::provider(&pool, "plumber").await;
    let (_, painter) = common::provider(&pool, "painter").await;
    common::service(&pool, plumber.id, plumbing, "Pipes").await;
    common::service(&pool, painter.id, painting, "Walls").await;

    let listed = ProviderRepo::list_by_subcategory(&pool, plumbing, 10, 0)
        .await
        .unwrap();
    let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![plumber.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_category_yields_empty_page(pool: PgPool) {
    let listed = ProviderRepo::list_by_category(&pool, 424_242, 10, 0)
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_box_skips_unlocated_providers(pool: PgPool) {
    common::provider(&pool, "nowhere").await;
    let located = common::located_provider(&pool, "lisbon", 38.0, -9.0).await;

    let bbox = BoundingBox::around(GeoPoint::new(38.01, -9.0), 5.0);
    let found = ProviderRepo::locations_in_box(&pool, &bbox).await.unwrap();
    let ids: Vec<_> = found.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![located.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_half_km_box_excludes_provider(pool: PgPool) {
    common::located_provider(&pool, "lisbon", 38.0, -9.0).await;

    let bbox = BoundingBox::around(GeoPoint::new(38.01, -9.0), 0.5);
    let found = ProviderRepo::locations_in_box(&pool, &bbox).await.unwrap();
    assert!(found.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ranked_box_survivors_closest_first(pool: PgPool) {
    let far = common::located_provider(&pool, "far", 38.03, -9.0).await;
    let near = common::located_provider(&pool, "near", 38.005, -9.0).await;
    let mid = common::located_provider(&pool, "mid", 38.0, -9.015).await;

    let center = GeoPoint::new(38.0, -9.0);
    let bbox = BoundingBox::around(center, 10.0);
    let found = ProviderRepo::locations_in_box(&pool, &bbox).await.unwrap();

    let ranked = rank_nearby(
        center,
        10.0,
        DistanceMode::Planar,
        found.iter().map(|p| (p.id, p.point())),
    );
    let ids: Vec<_> = ranked.iter().map(|r| r.key).collect();
    assert_eq!(ids, vec![near.id, mid.id, far.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_company_name(pool: PgPool) {
    let (_, acme) = common::provider(&pool, "acme_owner").await;
    common::provider(&pool, "other").await;
    ProviderRepo::update(
        &pool,
        acme.id,
        &marketplace_db::models::provider::UpdateProvider {
            company_name: Some("Acme Repairs".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let filter = ProviderFilter {
        search: Some("repairs".to_string()),
        ..Default::default()
    };
    let listed = ProviderRepo::list(&pool, &filter, 10, 0).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].company_name, "Acme Repairs");
    assert_eq!(ProviderRepo::count(&pool, &filter).await.unwrap(), 1);
}
