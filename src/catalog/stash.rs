use super::{
    CatalogClient, CatalogError, Connection, GalleryRef, ImageRef, MovieRef, NewMovie,
    SceneMovie, SceneRef, StashPath,
};
use curator_common::CatalogId;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

const CONFIGURATION_QUERY: &str = "\
query Configuration {
  configuration { general { stashes { path excludeVideo } } }
}";

const FIND_MOVIES_QUERY: &str = "\
query FindMovies($name: String!) {
  findMovies(movie_filter: {name: {value: $name, modifier: EQUALS}}, filter: {per_page: -1}) {
    movies { id name }
  }
}";

const MOVIE_CREATE_MUTATION: &str = "\
mutation MovieCreate($input: MovieCreateInput!) {
  movieCreate(input: $input) { id }
}";

const FIND_SCENES_QUERY: &str = "\
query FindScenes($path: String!) {
  findScenes(scene_filter: {path: {value: $path, modifier: INCLUDES}}, filter: {per_page: -1}) {
    scenes { id movies { movie { id } scene_index } }
  }
}";

const SCENE_UPDATE_MUTATION: &str = "\
mutation SceneUpdate($input: SceneUpdateInput!) {
  sceneUpdate(input: $input) { id }
}";

const FIND_GALLERIES_QUERY: &str = "\
query FindGalleries($title: String!) {
  findGalleries(gallery_filter: {title: {value: $title, modifier: EQUALS}}, filter: {per_page: -1}) {
    galleries { id title }
  }
}";

const GALLERY_CREATE_MUTATION: &str = "\
mutation GalleryCreate($input: GalleryCreateInput!) {
  galleryCreate(input: $input) { id }
}";

const FIND_IMAGES_QUERY: &str = "\
query FindImages($path: String!) {
  findImages(image_filter: {path: {value: $path, modifier: INCLUDES}}, filter: {per_page: -1}) {
    images { id galleries { id } }
  }
}";

const ADD_GALLERY_IMAGES_MUTATION: &str = "\
mutation AddGalleryImages($input: GalleryAddInput!) {
  addGalleryImages(input: $input)
}";

// ---------------------------------------------------------------------------
// GraphQL response shapes (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ConfigurationData {
    configuration: ConfigurationResult,
}

#[derive(Debug, Deserialize)]
struct ConfigurationResult {
    general: GeneralConfig,
}

#[derive(Debug, Deserialize)]
struct GeneralConfig {
    stashes: Vec<StashPath>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindMoviesData {
    find_movies: MovieList,
}

#[derive(Debug, Deserialize)]
struct MovieList {
    movies: Vec<MovieRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindScenesData {
    find_scenes: SceneList,
}

#[derive(Debug, Deserialize)]
struct SceneList {
    scenes: Vec<RawScene>,
}

#[derive(Debug, Deserialize)]
struct RawScene {
    id: CatalogId,
    #[serde(default)]
    movies: Vec<RawSceneMovie>,
}

#[derive(Debug, Deserialize)]
struct RawSceneMovie {
    movie: IdOnly,
    scene_index: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindGalleriesData {
    find_galleries: GalleryList,
}

#[derive(Debug, Deserialize)]
struct GalleryList {
    galleries: Vec<GalleryRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindImagesData {
    find_images: ImageList,
}

#[derive(Debug, Deserialize)]
struct ImageList {
    images: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    id: CatalogId,
    #[serde(default)]
    galleries: Vec<IdOnly>,
}

#[derive(Debug, Deserialize)]
struct IdOnly {
    id: CatalogId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieCreateData {
    movie_create: IdOnly,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GalleryCreateData {
    gallery_create: IdOnly,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// GraphQL client for a Stash instance.
pub struct StashClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    cookie: Option<String>,
}

impl StashClient {
    pub fn new(connection: &Connection) -> Self {
        let client = Client::builder()
            .timeout(connection.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            endpoint: format!("{}/graphql", connection.url.trim_end_matches('/')),
            api_key: connection.api_key.clone(),
            cookie: connection
                .session_cookie
                .as_ref()
                .map(|c| format!("{}={}", c.name, c.value)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, CatalogError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(ref key) = self.api_key {
            request = request.header("ApiKey", key);
        }
        if let Some(ref cookie) = self.cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // GraphQL errors can come back with a 4xx/5xx status, keep their
            // classification so a locked database is still retryable.
            if let Ok(parsed) = serde_json::from_str::<GraphQlResponse<Value>>(&body) {
                if !parsed.errors.is_empty() {
                    return Err(CatalogError::from_messages(
                        parsed.errors.into_iter().map(|e| e.message),
                    ));
                }
            }
            return Err(CatalogError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GraphQlResponse<T> = serde_json::from_str(&body)
            .map_err(|e| CatalogError::Decode(format!("{}: {}", e, body)))?;

        if !parsed.errors.is_empty() {
            return Err(CatalogError::from_messages(
                parsed.errors.into_iter().map(|e| e.message),
            ));
        }

        parsed
            .data
            .ok_or_else(|| CatalogError::Decode("response has no data".to_string()))
    }
}

#[async_trait::async_trait]
impl CatalogClient for StashClient {
    async fn stash_paths(&self) -> Result<Vec<StashPath>, CatalogError> {
        let data: ConfigurationData = self.execute(CONFIGURATION_QUERY, json!({})).await?;
        Ok(data.configuration.general.stashes)
    }

    async fn find_movies_by_name(&self, name: &str) -> Result<Vec<MovieRef>, CatalogError> {
        let data: FindMoviesData = self
            .execute(FIND_MOVIES_QUERY, json!({ "name": name }))
            .await?;
        Ok(data.find_movies.movies)
    }

    async fn create_movie(&self, movie: &NewMovie) -> Result<CatalogId, CatalogError> {
        let data: MovieCreateData = self
            .execute(MOVIE_CREATE_MUTATION, json!({ "input": movie }))
            .await?;
        Ok(data.movie_create.id)
    }

    async fn find_scenes_by_path(&self, fragment: &str) -> Result<Vec<SceneRef>, CatalogError> {
        let data: FindScenesData = self
            .execute(FIND_SCENES_QUERY, json!({ "path": fragment }))
            .await?;

        Ok(data
            .find_scenes
            .scenes
            .into_iter()
            .map(|scene| SceneRef {
                id: scene.id,
                movies: scene
                    .movies
                    .into_iter()
                    .map(|m| SceneMovie {
                        movie_id: m.movie.id,
                        scene_index: m.scene_index,
                    })
                    .collect(),
            })
            .collect())
    }

    async fn set_scene_movies(
        &self,
        scene_id: &CatalogId,
        movies: &[SceneMovie],
    ) -> Result<(), CatalogError> {
        let _: Value = self
            .execute(
                SCENE_UPDATE_MUTATION,
                json!({ "input": { "id": scene_id, "movies": movies } }),
            )
            .await?;
        Ok(())
    }

    async fn set_scene_cover(
        &self,
        scene_id: &CatalogId,
        cover: &str,
    ) -> Result<(), CatalogError> {
        let _: Value = self
            .execute(
                SCENE_UPDATE_MUTATION,
                json!({ "input": { "id": scene_id, "cover_image": cover } }),
            )
            .await?;
        Ok(())
    }

    async fn find_galleries_by_title(&self, title: &str) -> Result<Vec<GalleryRef>, CatalogError> {
        let data: FindGalleriesData = self
            .execute(FIND_GALLERIES_QUERY, json!({ "title": title }))
            .await?;
        Ok(data.find_galleries.galleries)
    }

    async fn create_gallery(&self, title: &str) -> Result<CatalogId, CatalogError> {
        let data: GalleryCreateData = self
            .execute(GALLERY_CREATE_MUTATION, json!({ "input": { "title": title } }))
            .await?;
        Ok(data.gallery_create.id)
    }

    async fn find_images_by_path(&self, fragment: &str) -> Result<Vec<ImageRef>, CatalogError> {
        let data: FindImagesData = self
            .execute(FIND_IMAGES_QUERY, json!({ "path": fragment }))
            .await?;

        Ok(data
            .find_images
            .images
            .into_iter()
            .map(|image| ImageRef {
                id: image.id,
                gallery_ids: image.galleries.into_iter().map(|g| g.id).collect(),
            })
            .collect())
    }

    async fn add_gallery_images(
        &self,
        gallery_id: &CatalogId,
        image_ids: &[CatalogId],
    ) -> Result<(), CatalogError> {
        let _: Value = self
            .execute(
                ADD_GALLERY_IMAGES_MUTATION,
                json!({ "input": { "gallery_id": gallery_id, "image_ids": image_ids } }),
            )
            .await?;
        Ok(())
    }
}
