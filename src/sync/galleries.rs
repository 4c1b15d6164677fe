use super::{CatalogSyncer, SyncReport};
use anyhow::{Context, Result};
use curator_common::{CatalogId, Gallery};
use tracing::{info, warn};

impl CatalogSyncer<'_> {
    /// Create or reuse each gallery, then add the images under its name in one batch.
    pub async fn sync_galleries(&self, galleries: &[Gallery]) -> SyncReport {
        let mut report = SyncReport::default();

        for gallery in galleries {
            if let Err(e) = self.sync_gallery(gallery, &mut report).await {
                warn!("Skipping gallery {}: {:#}", gallery.name, e);
                report.failed += 1;
            }
        }

        info!("Galleries synced: {}", report);
        report
    }

    async fn sync_gallery(&self, gallery: &Gallery, report: &mut SyncReport) -> Result<()> {
        let existing = self
            .catalog
            .find_galleries_by_title(&gallery.name)
            .await
            .with_context(|| format!("Failed to look up gallery {}", gallery.name))?;

        let gallery_id = match existing.into_iter().next() {
            Some(found) => {
                report.reused += 1;
                found.id
            }
            None if self.dry_run() => {
                info!("Would create gallery {}", gallery.name);
                report.created += 1;
                return Ok(());
            }
            None => {
                let label = format!("create gallery {}", gallery.name);
                let Some(id) = self
                    .write(&label, || self.catalog.create_gallery(&gallery.name))
                    .await
                else {
                    anyhow::bail!("gallery was not created");
                };
                info!("Created gallery {} with id {}", gallery.name, id);
                report.created += 1;
                id
            }
        };

        self.add_images(gallery, &gallery_id, report).await
    }

    async fn add_images(
        &self,
        gallery: &Gallery,
        gallery_id: &CatalogId,
        report: &mut SyncReport,
    ) -> Result<()> {
        let images = self
            .catalog
            .find_images_by_path(&gallery.name)
            .await
            .with_context(|| format!("Failed to find images for gallery {}", gallery.name))?;

        let mut to_add = Vec::new();
        for image in images {
            if image.in_gallery(gallery_id) {
                info!("Skipped updating for gallery with ID {}", image.id);
                report.skipped += 1;
            } else {
                to_add.push(image.id);
            }
        }

        if to_add.is_empty() {
            return Ok(());
        }

        if self.dry_run() {
            info!("Would add {} images to gallery {}", to_add.len(), gallery.name);
            report.linked += to_add.len();
            return Ok(());
        }

        let label = format!("add images to gallery {}", gallery_id);
        match self
            .write(&label, || self.catalog.add_gallery_images(gallery_id, &to_add))
            .await
        {
            Some(()) => {
                info!("Updated gallery and added {} images.", to_add.len());
                report.linked += to_add.len();
            }
            None => report.failed += 1,
        }

        Ok(())
    }
}
