//! HTTP-backed entity stores.
//!
//! `GET {base}/students` fills the collection, `GET {base}/students/{id}`
//! fetches one record. Non-2xx answers become `StoreError::Status`.

use async_trait::async_trait;
use classroom_model::Entity;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::EntityStore;
use crate::config::Config;
use crate::error::StoreError;

/// Minimal JSON API surface the stores need.
#[async_trait(?Send)]
pub trait ApiClient {
    /// GET a path relative to the API base and decode the body as JSON.
    async fn get_json(&self, path: &str) -> Result<Value, StoreError>;
}

/// `ApiClient` over reqwest (native or browser fetch).
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        // Url::join drops the last segment unless the base ends with '/'
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client: build_client(timeout)?,
            base,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(timeout: Duration) -> Result<reqwest::Client, StoreError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

// Browser fetch has no client-wide timeout
#[cfg(target_arch = "wasm32")]
fn build_client(_timeout: Duration) -> Result<reqwest::Client, StoreError> {
    Ok(reqwest::Client::new())
}

#[async_trait(?Send)]
impl ApiClient for ReqwestClient {
    async fn get_json(&self, path: &str) -> Result<Value, StoreError> {
        let url = self.base.join(path.trim_start_matches('/'))?;
        debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Entity store that caches what an `ApiClient` returns.
pub struct HttpEntityStore<E, C = ReqwestClient> {
    client: Rc<C>,
    items: RefCell<Vec<E>>,
}

impl<E: Entity, C: ApiClient> HttpEntityStore<E, C> {
    pub fn new(client: Rc<C>) -> Self {
        Self {
            client,
            items: RefCell::new(Vec::new()),
        }
    }

    fn upsert(&self, entity: E) {
        let mut items = self.items.borrow_mut();
        match items.iter_mut().find(|e| e.id() == entity.id()) {
            Some(existing) => *existing = entity,
            None => items.push(entity),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl<E: Entity, C: ApiClient + 'static> EntityStore for HttpEntityStore<E, C> {
    type Entity = E;

    fn len(&self) -> usize {
        self.items.borrow().len()
    }

    fn entities(&self) -> Vec<E> {
        self.items.borrow().clone()
    }

    fn get(&self, id: &str) -> Option<E> {
        self.items.borrow().iter().find(|e| e.id() == id).cloned()
    }

    async fn fetch_all(&self) -> Result<(), StoreError> {
        let value = self.client.get_json(E::KIND.collection()).await?;
        let items: Vec<E> = decode(value)?;
        info!(kind = %E::KIND, count = items.len(), "Fetched collection");
        *self.items.borrow_mut() = items;
        Ok(())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<E, StoreError> {
        if let Some(cached) = self.get(id) {
            return Ok(cached);
        }

        let path = format!("{}/{}", E::KIND.collection(), urlencoding::encode(id));
        let entity: E = decode(self.client.get_json(&path).await?)?;
        debug!(kind = %E::KIND, %id, "Fetched entity");
        self.upsert(entity.clone());
        Ok(entity)
    }
}
