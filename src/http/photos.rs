//! Demo photo API declared with route groups.
//!
//! The same photo routes are declared once and docked twice: scoped under
//! `v1/photos` and mounted under `v2`.

use std::sync::{Arc, RwLock};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::dock::Link;
use crate::group::RouteGroup;
use crate::http::request::{access_log, request_id};
use crate::http::server::AppState;

/// Route group whose handlers run against [`AppState`].
pub type AppGroup = RouteGroup<Link<AppState>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPhoto {
    pub title: String,
}

/// In-memory photo storage shared by all handlers.
#[derive(Debug, Clone, Default)]
pub struct PhotoStore {
    photos: Arc<RwLock<Vec<Photo>>>,
}

impl PhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Vec<Photo> {
        self.photos.read().expect("photo store lock poisoned").clone()
    }

    pub fn get(&self, id: u64) -> Option<Photo> {
        self.photos
            .read()
            .expect("photo store lock poisoned")
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn insert(&self, title: impl Into<String>) -> Photo {
        let mut photos = self.photos.write().expect("photo store lock poisoned");
        let photo = Photo {
            id: photos.last().map_or(1, |p| p.id + 1),
            title: title.into(),
        };
        photos.push(photo.clone());
        photo
    }
}

async fn list_photos(State(state): State<AppState>) -> Json<Vec<Photo>> {
    Json(state.photos.list())
}

async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Photo>, StatusCode> {
    state.photos.get(id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_photo(
    State(state): State<AppState>,
    Json(new): Json<NewPhoto>,
) -> (StatusCode, Json<Photo>) {
    let photo = state.photos.insert(new.title);
    tracing::debug!(id = photo.id, "Photo created");
    (StatusCode::CREATED, Json(photo))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn declare_photos(photos: &mut AppGroup) {
    photos
        .get("", [Link::endpoint(list_photos)])
        .get("/:id", [Link::endpoint(get_photo)])
        .post("", [Link::endpoint(create_photo)]);
}

/// Photo routes under the `photos` prefix.
pub fn photos_group() -> AppGroup {
    let mut photos = AppGroup::new("photos");
    declare_photos(&mut photos);
    photos
}

/// The whole demo API.
///
/// ```text
/// GET  /v1/health
/// GET  /v1/photos        POST /v1/photos      GET /v1/photos/:id
/// GET  /v2/photos        POST /v2/photos      GET /v2/photos/:id
/// ```
pub fn api_group() -> AppGroup {
    let mut v1 = AppGroup::new("v1");
    v1.get("/health", [Link::endpoint(health)]);
    v1.with_scope("photos", declare_photos);

    let mut api = AppGroup::with_middleware(
        "",
        [Link::middleware(request_id), Link::middleware(access_log)],
    );
    api.mount("", [&v1]);
    api.mount("v2", [&photos_group()]);
    api
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_assigns_ids() {
        let store = PhotoStore::new();
        assert_eq!(store.insert("a").id, 1);
        assert_eq!(store.insert("b").id, 2);
        assert_eq!(store.get(2).map(|p| p.title), Some("b".to_string()));
        assert_eq!(store.get(3), None);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_api_group_routes() {
        let lines: Vec<String> = api_group().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "GET /v1/health 3",
                "GET /v1/photos 3",
                "GET /v1/photos/:id 3",
                "POST /v1/photos 3",
                "GET /v2/photos 3",
                "GET /v2/photos/:id 3",
                "POST /v2/photos 3",
            ]
        );
    }

    #[test]
    fn test_photos_group_is_reusable() {
        let photos = photos_group();
        let mut a = AppGroup::new("a");
        let mut b = AppGroup::new("b");
        a.mount("", [&photos]);
        b.mount("x", [&photos]);
        assert_eq!(a.routes()[0].path, "/a/photos");
        assert_eq!(b.routes()[0].path, "/b/x/photos");
        assert_eq!(photos.len(), 3);
    }
}
