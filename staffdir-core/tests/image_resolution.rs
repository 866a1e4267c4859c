mod common;

use std::{path::Path, sync::Arc};

use common::{HangingFetcher, StubFetcher, StubResponse, png_bytes, url};
use staffdir_core::{
    DirectoryError,
    infra::cache::{DiskImageCache, ImageCacheRoot},
    services::{ImageOrigin, ImageResolver, StoreFailurePolicy},
};
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

const PHOTO: &str =
    "https://s3.amazonaws.com/sq-mobile-interview/photos/16c00560/small.jpg";

fn cache_at(path: &Path) -> Arc<DiskImageCache> {
    Arc::new(DiskImageCache::new(ImageCacheRoot::new(path.to_path_buf())))
}

#[tokio::test]
async fn cache_hit_skips_the_network() {
    let dir = tempdir().unwrap();
    let cache = cache_at(&dir.path().join("images"));
    let png = png_bytes(2, 3, [255, 0, 0, 255]);
    cache.store(PHOTO, &png).await.unwrap();

    let fetcher = Arc::new(StubFetcher::new());
    let resolver = ImageResolver::new(cache, fetcher.clone());

    let resolved = resolver.resolve_image(&url(PHOTO)).await.unwrap();
    assert_eq!(resolved.origin, ImageOrigin::Cache);
    assert_eq!(resolved.bytes, png);
    assert_eq!((resolved.width(), resolved.height()), (2, 3));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn miss_fetches_and_populates_the_cache() {
    let dir = tempdir().unwrap();
    let cache = cache_at(&dir.path().join("images"));
    let png = png_bytes(4, 4, [0, 128, 255, 255]);
    let fetcher = Arc::new(
        StubFetcher::new()
            .respond(&url(PHOTO), StubResponse::Body(png.clone())),
    );
    let resolver = ImageResolver::new(cache.clone(), fetcher.clone());

    let resolved = resolver.resolve_image(&url(PHOTO)).await.unwrap();
    assert_eq!(resolved.origin, ImageOrigin::Network);
    assert_eq!(resolved.format, Some(image::ImageFormat::Png));
    assert_eq!(cache.lookup(PHOTO).await.unwrap(), png);

    let again = resolver.resolve_image(&url(PHOTO)).await.unwrap();
    assert_eq!(again.origin, ImageOrigin::Cache);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn undecodable_bytes_are_no_image_and_not_cached() {
    let dir = tempdir().unwrap();
    let cache = cache_at(&dir.path().join("images"));
    let fetcher = Arc::new(StubFetcher::new().respond(
        &url(PHOTO),
        StubResponse::Body(b"<html>not a photo</html>".to_vec()),
    ));
    let resolver = ImageResolver::new(cache.clone(), fetcher);

    let err = resolver.resolve_image(&url(PHOTO)).await.unwrap_err();
    assert!(matches!(err, DirectoryError::NoImage { .. }), "got {err:?}");
    assert!(cache.lookup(PHOTO).await.is_none());
}

#[tokio::test]
async fn no_data_is_surfaced_as_is() {
    let dir = tempdir().unwrap();
    let fetcher = Arc::new(
        StubFetcher::new().respond(&url(PHOTO), StubResponse::NoData),
    );
    let resolver =
        ImageResolver::new(cache_at(&dir.path().join("images")), fetcher);

    let err = resolver.resolve_image(&url(PHOTO)).await.unwrap_err();
    assert!(matches!(err, DirectoryError::NoData { .. }), "got {err:?}");
}

#[tokio::test]
async fn store_failure_fails_the_call_by_default() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let fetcher = Arc::new(StubFetcher::new().respond(
        &url(PHOTO),
        StubResponse::Body(png_bytes(1, 1, [0, 0, 0, 255])),
    ));
    let resolver =
        ImageResolver::new(cache_at(&blocker.join("images")), fetcher);

    let err = resolver.resolve_image(&url(PHOTO)).await.unwrap_err();
    assert!(err.is_filesystem(), "got {err:?}");
}

#[tokio::test]
async fn store_failure_can_be_logged_instead() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let fetcher = Arc::new(StubFetcher::new().respond(
        &url(PHOTO),
        StubResponse::Body(png_bytes(1, 1, [0, 0, 0, 255])),
    ));
    let resolver =
        ImageResolver::new(cache_at(&blocker.join("images")), fetcher)
            .with_store_failure(StoreFailurePolicy::LogAndReturn);

    let resolved = resolver.resolve_image(&url(PHOTO)).await.unwrap();
    assert_eq!(resolved.origin, ImageOrigin::Network);
}

#[tokio::test]
async fn corrupt_cache_entry_is_refetched_and_replaced() {
    let dir = tempdir().unwrap();
    let cache = cache_at(&dir.path().join("images"));
    cache.store(PHOTO, b"truncated").await.unwrap();

    let png = png_bytes(2, 2, [9, 9, 9, 255]);
    let fetcher = Arc::new(
        StubFetcher::new()
            .respond(&url(PHOTO), StubResponse::Body(png.clone())),
    );
    let resolver = ImageResolver::new(cache.clone(), fetcher.clone());

    let resolved = resolver.resolve_image(&url(PHOTO)).await.unwrap();
    assert_eq!(resolved.origin, ImageOrigin::Network);
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(cache.lookup(PHOTO).await.unwrap(), png);
}

#[tokio::test]
async fn distinct_locators_do_not_share_entries() {
    let dir = tempdir().unwrap();
    let cache = cache_at(&dir.path().join("images"));
    let a = "http://a.example/photo.png";
    let b = "http://b.example/photo.png";
    let fetcher = Arc::new(
        StubFetcher::new()
            .respond(
                &url(a),
                StubResponse::Body(png_bytes(1, 1, [1, 1, 1, 255])),
            )
            .respond(
                &url(b),
                StubResponse::Body(png_bytes(3, 1, [2, 2, 2, 255])),
            ),
    );
    let resolver = ImageResolver::new(cache, fetcher);

    let first = resolver.resolve_image(&url(a)).await.unwrap();
    let second = resolver.resolve_image(&url(b)).await.unwrap();
    assert_eq!(first.width(), 1);
    assert_eq!(second.width(), 3);
    assert_ne!(first.bytes, second.bytes);
}

#[tokio::test]
async fn concurrent_misses_for_one_locator_all_succeed() {
    let dir = tempdir().unwrap();
    let cache = cache_at(&dir.path().join("images"));
    let png = png_bytes(2, 2, [7, 7, 7, 255]);
    let fetcher = Arc::new(
        StubFetcher::new()
            .respond(&url(PHOTO), StubResponse::Body(png.clone())),
    );
    let resolver = ImageResolver::new(cache.clone(), fetcher);

    let target = url(PHOTO);
    let results = futures::future::join_all(
        (0..8).map(|_| resolver.resolve_image(&target)),
    )
    .await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(cache.lookup(PHOTO).await.unwrap(), png);
}

#[tokio::test]
async fn cancelled_resolution_returns_cancelled() {
    let dir = tempdir().unwrap();
    let resolver = ImageResolver::new(
        cache_at(&dir.path().join("images")),
        Arc::new(HangingFetcher),
    );
    let token = CancellationToken::new();
    token.cancel();

    let err = resolver
        .resolve_image_cancellable(&url(PHOTO), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Cancelled { .. }), "got {err:?}");
}

#[tokio::test]
async fn cancellation_interrupts_a_pending_fetch() {
    let dir = tempdir().unwrap();
    let resolver = ImageResolver::new(
        cache_at(&dir.path().join("images")),
        Arc::new(HangingFetcher),
    );
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = resolver
        .resolve_image_cancellable(&url(PHOTO), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Cancelled { .. }));
}
