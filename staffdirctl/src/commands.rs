use anyhow::{Context, bail};
use futures::future::join_all;
use staffdir_core::{
    config::StaffdirConfig,
    directory::{
        DirectoryRow, DirectorySession, DirectoryState, PhotoSlot, rows,
    },
    infra::cache::{DiskImageCache, derive_key},
    model::PhotoSize,
    services::{DirectoryServices, ImageResolver, ResolvedImage},
};
use url::Url;

pub async fn list(
    config: &StaffdirConfig,
    photos: bool,
    large: bool,
) -> anyhow::Result<()> {
    let services = DirectoryServices::from_config(config)
        .context("failed to build directory services")?;
    tracing::info!(
        selection = %config.selection,
        "loading employee directory"
    );

    let session = DirectorySession::new(services.employees.clone());
    let state = session.load_once().await;
    let list = match &state {
        DirectoryState::Loaded(list) => list,
        DirectoryState::Empty => {
            println!("{}", state.message().unwrap_or_default());
            return Ok(());
        }
        DirectoryState::Failed { message } => {
            bail!("could not load directory: {message}")
        }
        DirectoryState::Loading => bail!("directory is still loading"),
    };

    let size = if large { PhotoSize::Large } else { PhotoSize::Small };
    let rows = rows(list, size);
    if !photos {
        for row in &rows {
            println!("{}", row_line(row));
        }
        return Ok(());
    }

    let resolver = &services.images;
    let lines = join_all(rows.iter().map(|row| async move {
        let status = photo_status(resolver, &row.photo).await;
        format!("{}  {}", row_line(row), status)
    }))
    .await;
    for line in lines {
        println!("{line}");
    }

    let stats = resolver.cache().stats_snapshot();
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        writes = stats.writes,
        "photo cache summary"
    );
    Ok(())
}

pub async fn photo(config: &StaffdirConfig, url: &Url) -> anyhow::Result<()> {
    let services = DirectoryServices::from_config(config)
        .context("failed to build directory services")?;
    let resolved = services
        .images
        .resolve_image(url)
        .await
        .with_context(|| format!("failed to resolve {url}"))?;
    println!("{}", describe(&resolved));
    println!("{}", services.images.cache().path_for(url.as_str()).display());
    Ok(())
}

pub fn cache_key(config: &StaffdirConfig, url: &Url) -> anyhow::Result<()> {
    let root = config
        .cache
        .resolve_root()
        .context("failed to resolve the image cache directory")?;
    let cache = DiskImageCache::new(root);
    println!("{}", derive_key(url.as_str()));
    println!("{}", cache.path_for(url.as_str()).display());
    Ok(())
}

fn row_line(row: &DirectoryRow) -> String {
    format!("{} ({})", row.name, row.team)
}

async fn photo_status(resolver: &ImageResolver, slot: &PhotoSlot) -> String {
    match slot {
        PhotoSlot::Placeholder => "[placeholder]".to_string(),
        PhotoSlot::Remote(url) => match resolver.resolve_image(url).await {
            Ok(resolved) => format!("[{}]", describe(&resolved)),
            Err(err) => {
                tracing::warn!(%url, error = %err, "photo unavailable");
                "[placeholder]".to_string()
            }
        },
    }
}

fn describe(resolved: &ResolvedImage) -> String {
    let format = resolved
        .format
        .map(|format| format!("{format:?}").to_lowercase())
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "{}x{} {} from {}",
        resolved.width(),
        resolved.height(),
        format,
        resolved.origin
    )
}
