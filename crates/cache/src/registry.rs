//! Ranked provider selection
//!
//! Caching backends and codecs are both [`Provider`]s. A [`Registry`] holds
//! the candidates of one kind, built explicitly at startup, and selects
//! the highest-ranked available one unless an id is pinned.

use crate::errors::{CacheError, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// An installable, ranked implementation
pub trait Provider: Send + Sync + Debug {
    /// Identifier used to pin this provider
    fn id(&self) -> &str;

    /// Higher ranks win
    fn rank(&self) -> i32;

    fn is_available(&self) -> bool {
        true
    }
}

/// Candidates of one kind
#[derive(Debug)]
pub struct Registry<P: ?Sized> {
    kind: &'static str,
    providers: Vec<Arc<P>>,
}

impl<P: ?Sized> Clone for Registry<P> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            providers: self.providers.clone(),
        }
    }
}

impl<P: Provider + ?Sized> Registry<P> {
    /// An empty registry; `kind` names its providers in errors
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            providers: Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Add `provider`, returning the one it replaces under the same id
    pub fn register(&mut self, provider: Arc<P>) -> Option<Arc<P>> {
        match self.providers.iter_mut().find(|p| p.id() == provider.id()) {
            Some(slot) => Some(std::mem::replace(slot, provider)),
            None => {
                self.providers.push(provider);
                None
            }
        }
    }

    #[must_use]
    pub fn with(mut self, provider: Arc<P>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Arc<P>> {
        self.providers.iter().find(|p| p.id() == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Providers by descending rank, registration order breaking ties
    pub fn ranked(&self) -> Vec<&Arc<P>> {
        let mut ranked: Vec<&Arc<P>> = self.providers.iter().collect();
        ranked.sort_by_key(|p| std::cmp::Reverse(p.rank()));
        ranked
    }

    /// The pinned provider, or else the highest-ranked available one
    pub fn select(&self, pinned: Option<&str>) -> Result<Arc<P>> {
        if let Some(id) = pinned {
            let provider = self.get(id).ok_or_else(|| CacheError::UnknownProvider {
                kind: self.kind,
                id: id.to_string(),
                available: self.ids(),
            })?;
            if !provider.is_available() {
                return Err(CacheError::configuration(format!(
                    "{} '{id}' is not available",
                    self.kind
                )));
            }
            return Ok(Arc::clone(provider));
        }

        self.ranked()
            .into_iter()
            .find(|p| p.is_available())
            .map(Arc::clone)
            .ok_or(CacheError::NoProviderAvailable { kind: self.kind })
    }
}
