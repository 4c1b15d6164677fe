use super::{CatalogSyncer, SyncReport};
use curator_common::encoding::file_to_data_uri;
use std::path::{Path, MAIN_SEPARATOR};
use tracing::{info, warn};

impl CatalogSyncer<'_> {
    /// Apply `cover_file` to every scene stored under `directory`.
    pub async fn sync_scene_cover(&self, directory: &Path, cover_file: &Path) -> SyncReport {
        let mut report = SyncReport::default();

        let cover = match file_to_data_uri(cover_file) {
            Ok(cover) => cover,
            Err(e) => {
                warn!("Could not encode {:?} as an image: {}", cover_file, e);
                report.failed += 1;
                return report;
            }
        };

        let fragment = directory_fragment(directory);
        let scenes = match self.catalog.find_scenes_by_path(&fragment).await {
            Ok(scenes) => scenes,
            Err(e) => {
                warn!("Failed to find scenes under {:?}: {}", directory, e);
                report.failed += 1;
                return report;
            }
        };

        let ids: Vec<&str> = scenes.iter().map(|s| s.id.as_str()).collect();
        info!("Found cover: {:?}|{}", ids, cover_file.display());

        for scene in &scenes {
            if self.dry_run() {
                info!("Would apply cover to scene {}", scene.id);
                continue;
            }

            let label = format!("update scene {}", scene.id);
            match self
                .write(&label, || self.catalog.set_scene_cover(&scene.id, &cover))
                .await
            {
                Some(()) => {
                    info!("Applied cover to scene {}", scene.id);
                    report.linked += 1;
                }
                None => report.failed += 1,
            }
        }

        report
    }
}

/// Path filter for scenes inside `directory`.
///
/// The trailing separator keeps `/media/Scene1` from matching `/media/Scene10`.
fn directory_fragment(directory: &Path) -> String {
    let mut fragment = directory.to_string_lossy().into_owned();
    if !fragment.ends_with(MAIN_SEPARATOR) {
        fragment.push(MAIN_SEPARATOR);
    }
    fragment
}
