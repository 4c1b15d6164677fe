use super::{CatalogSyncer, SyncReport};
use crate::catalog::{NewMovie, SceneMovie};
use anyhow::{Context, Result};
use curator_common::encoding::file_to_data_uri;
use curator_common::{CatalogId, Movie};
use tracing::{info, warn};

impl CatalogSyncer<'_> {
    /// Create or reuse each movie, then link every scene under its name.
    pub async fn sync_movies(&self, movies: &[Movie]) -> SyncReport {
        let mut report = SyncReport::default();

        for movie in movies {
            if let Err(e) = self.sync_movie(movie, &mut report).await {
                warn!("Skipping movie {}: {:#}", movie.name, e);
                report.failed += 1;
            }
        }

        info!("Movies synced: {}", report);
        report
    }

    async fn sync_movie(&self, movie: &Movie, report: &mut SyncReport) -> Result<()> {
        let existing = self
            .catalog
            .find_movies_by_name(&movie.name)
            .await
            .with_context(|| format!("Failed to look up movie {}", movie.name))?
            .into_iter()
            .find(|m| m.name.to_lowercase() == movie.name.to_lowercase());

        let movie_id = match existing {
            Some(found) => {
                report.reused += 1;
                found.id
            }
            None if self.dry_run() => {
                info!("Would create movie {}", movie);
                report.created += 1;
                return self.preview_scene_links(movie).await;
            }
            None => match self.create_movie(movie).await {
                Some(id) => {
                    info!("Created movie {} with id {}", movie.name, id);
                    report.created += 1;
                    id
                }
                None => anyhow::bail!("movie was not created"),
            },
        };

        self.link_scenes(movie, &movie_id, report).await
    }

    /// A cover that cannot be encoded is dropped; the movie is still created.
    async fn create_movie(&self, movie: &Movie) -> Option<CatalogId> {
        let front_image = movie
            .cover
            .as_ref()
            .and_then(|cover| match file_to_data_uri(cover) {
                Ok(uri) => Some(uri),
                Err(e) => {
                    warn!("Creating movie {} without cover {:?}: {}", movie.name, cover, e);
                    None
                }
            });
        let input = NewMovie {
            name: movie.name.clone(),
            front_image,
        };

        let label = format!("create movie {}", movie.name);
        self.write(&label, || self.catalog.create_movie(&input)).await
    }

    /// Link every scene whose path contains the movie name and is not linked yet.
    ///
    /// Existing associations of a scene are kept; the movie is appended.
    async fn link_scenes(
        &self,
        movie: &Movie,
        movie_id: &CatalogId,
        report: &mut SyncReport,
    ) -> Result<()> {
        let scenes = self
            .catalog
            .find_scenes_by_path(&movie.name)
            .await
            .with_context(|| format!("Failed to find scenes for movie {}", movie.name))?;

        for scene in scenes {
            if scene.has_movie(movie_id) {
                info!("Skipped updating for scene with ID {}", scene.id);
                report.skipped += 1;
                continue;
            }

            if self.dry_run() {
                info!("Would add scene {} to movie {}", scene.id, movie.name);
                report.linked += 1;
                continue;
            }

            let mut movies = scene.movies.clone();
            movies.push(SceneMovie {
                movie_id: movie_id.clone(),
                scene_index: None,
            });

            let label = format!("update scene {}", scene.id);
            match self
                .write(&label, || self.catalog.set_scene_movies(&scene.id, &movies))
                .await
            {
                Some(()) => report.linked += 1,
                None => report.failed += 1,
            }
        }

        Ok(())
    }

    async fn preview_scene_links(&self, movie: &Movie) -> Result<()> {
        let scenes = self
            .catalog
            .find_scenes_by_path(&movie.name)
            .await
            .with_context(|| format!("Failed to find scenes for movie {}", movie.name))?;
        info!("Would add {} scenes to new movie {}", scenes.len(), movie.name);
        Ok(())
    }
}
