//! Resource routes: a (path, verb) dispatch table built from the resource list,
//! merged into one method router per path.

use crate::config::{Resource, RESOURCES};
use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::handlers::ResourceRouter;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::Method,
    routing::MethodRouter,
    Router,
};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    List,
    Create,
    Read,
    Update,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::List | Verb::Read => Method::GET,
            Verb::Create => Method::POST,
            Verb::Update => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RouteEntry {
    pub path: String,
    pub verb: Verb,
    pub resource: &'static Resource,
}

/// Collection routes plus `/:id` routes; delete only where the resource exposes it.
pub fn route_table(resources: &[&'static Resource]) -> Vec<RouteEntry> {
    let mut entries = Vec::new();
    for &resource in resources {
        let item = format!("{}/:id", resource.path);
        let mut push = |path: &str, verb| {
            entries.push(RouteEntry {
                path: path.to_string(),
                verb,
                resource,
            })
        };
        push(resource.path, Verb::List);
        push(resource.path, Verb::Create);
        push(&item, Verb::Read);
        push(&item, Verb::Update);
        if resource.deletable {
            push(&item, Verb::Delete);
        }
    }
    entries
}

fn attach(method_router: MethodRouter<AppState>, entry: &RouteEntry) -> MethodRouter<AppState> {
    let router = ResourceRouter::new(entry.resource);
    match entry.verb {
        Verb::List => method_router.get(move |State(state): State<AppState>| async move {
            router.list(state.store.as_ref()).await
        }),
        Verb::Create => method_router.post(
            move |State(state): State<AppState>, JsonObject(body): JsonObject| async move {
                router.create(state.store.as_ref(), body).await
            },
        ),
        Verb::Read => method_router.get(
            move |State(state): State<AppState>, Path(id): Path<String>| async move {
                let found = router.lookup(state.store.as_ref(), &id).await?;
                Ok::<_, AppError>(router.read(&found))
            },
        ),
        // The guard runs before the body is looked at, so an unknown id is a 404 even
        // when the body is malformed.
        Verb::Update => method_router.patch(
            move |State(state): State<AppState>,
                  Path(id): Path<String>,
                  body: Result<JsonObject, AppError>| async move {
                let found = router.lookup(state.store.as_ref(), &id).await?;
                let JsonObject(body) = body?;
                router.update(state.store.as_ref(), &found, body).await
            },
        ),
        Verb::Delete => method_router.delete(
            move |State(state): State<AppState>, Path(id): Path<String>| async move {
                let found = router.lookup(state.store.as_ref(), &id).await?;
                router.delete(state.store.as_ref(), &found).await
            },
        ),
    }
}

/// Routes for every resource in [`RESOURCES`].
pub fn entity_routes(state: AppState) -> Router {
    let mut by_path: BTreeMap<String, MethodRouter<AppState>> = BTreeMap::new();
    for entry in route_table(RESOURCES) {
        let method_router = by_path.remove(&entry.path).unwrap_or_else(MethodRouter::new);
        let method_router = attach(method_router, &entry);
        by_path.insert(entry.path, method_router);
    }
    by_path
        .into_iter()
        .fold(Router::new(), |app, (path, method_router)| app.route(&path, method_router))
        .with_state(state)
}
