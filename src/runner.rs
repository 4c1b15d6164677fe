//! Runs a [`Task`] end to end: resolve roots, scan, sync.

use crate::catalog::CatalogClient;
use crate::context::{RunContext, Task};
use crate::scanner::{ScanMode, ScanWindow, TreeScanner};
use crate::sync::{CatalogSyncer, SyncReport};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Roots to scan: the context override, else the catalog's non-excluded library paths.
pub async fn resolve_roots(ctx: &RunContext, catalog: &dyn CatalogClient) -> Result<Vec<PathBuf>> {
    if !ctx.roots.is_empty() {
        return Ok(ctx.roots.clone());
    }

    let paths = catalog
        .stash_paths()
        .await
        .context("Failed to read library paths from the catalog")?;

    Ok(paths
        .into_iter()
        .filter(|p| !p.exclude_video)
        .map(|p| p.path)
        .collect())
}

/// Run the task described by `ctx` against `catalog`.
pub async fn run(ctx: &RunContext, catalog: &dyn CatalogClient) -> Result<SyncReport> {
    let roots = resolve_roots(ctx, catalog).await?;
    let scanner = TreeScanner::new(roots);
    let syncer = CatalogSyncer::new(catalog, ctx);

    let report = match ctx.task {
        Task::Movies { .. } => {
            let found = scanner.discover();
            let mut report = syncer.sync_movies(&found.movies).await;
            report.merge(syncer.sync_galleries(&found.galleries).await);
            report
        }
        Task::SceneCovers { scan, .. } => {
            info!("Using mode {:?}", ctx.task);
            let window = ScanWindow::last_days(ctx.recent_days);
            if scan == ScanMode::Recent {
                info!(
                    "Only covers modified since {} (scan started {})",
                    window.start(),
                    window.end()
                );
            }

            let mut matches = Vec::new();
            scanner.scan_covers(scan, &window, |dir, file| {
                matches.push((dir.to_path_buf(), dir.join(file)));
            });

            let mut report = SyncReport::default();
            for (dir, cover) in &matches {
                report.merge(syncer.sync_scene_cover(dir, cover).await);
            }
            report
        }
    };

    info!("Run complete: {}", report);
    Ok(report)
}
