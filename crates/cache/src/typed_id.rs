//! Typed cache identities
//!
//! A [`TypedId`] pairs the identity string of one cached operation with the
//! two conversions between the generic [`Envelope`] and the value the
//! operation returns. Building one is pure and cheap.
//!
//! Every caller-supplied part of an identity is percent-encoded, so the
//! separators `:`, `?`, `&`, `=`, `,`, `#` and `/` only ever appear
//! between parts and two distinct requests never share a string.

use crate::entry::Envelope;
use crate::traits::Cache;
use statdx_core::{DataSet, Flow, FlowRef, StructRef, Structure};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::time::Duration;
use urlencoding::encode;

/// Identity of a source: where it lives and how it answers
///
/// Two sources that may return different results must differ here,
/// whether by location, by languages or by a discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    kind: String,
    location: String,
    languages: Vec<String>,
    discriminators: BTreeMap<String, String>,
}

impl ResourceId {
    /// `kind` names the driver, `location` its endpoint or file path
    pub fn new(kind: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            location: location.into(),
            languages: Vec::new(),
            discriminators: BTreeMap::new(),
        }
    }

    /// Languages in preference order
    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// A driver-specific setting that changes results
    #[must_use]
    pub fn with_discriminator(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.discriminators.insert(name.into(), value.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", encode(&self.kind), encode(&self.location))?;
        let mut separator = '?';
        if !self.languages.is_empty() {
            let languages: Vec<_> = self.languages.iter().map(|l| encode(l)).collect();
            write!(f, "{separator}lang={}", languages.join(","))?;
            separator = '&';
        }
        for (name, value) in &self.discriminators {
            write!(f, "{separator}{}={}", encode(name), encode(value))?;
            separator = '&';
        }
        Ok(())
    }
}

/// `agency,id,version` with each part encoded
fn reference(agency: &str, id: &str, version: &str) -> String {
    format!("{},{},{}", encode(agency), encode(id), encode(version))
}

/// Identity string plus envelope conversions for one cached value type
pub struct TypedId<T> {
    key: String,
    to_view: fn(&Envelope) -> Option<T>,
    to_envelope: fn(T) -> Envelope,
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            to_view: self.to_view,
            to_envelope: self.to_envelope,
        }
    }
}

impl<T> fmt::Debug for TypedId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedId").field("key", &self.key).finish()
    }
}

impl<T> TypedId<T> {
    fn build(
        resource: &ResourceId,
        operation: &str,
        reference: Option<String>,
        to_view: fn(&Envelope) -> Option<T>,
        to_envelope: fn(T) -> Envelope,
    ) -> Self {
        let mut key = format!("cache:{resource}#{operation}");
        if let Some(reference) = reference {
            key.push('/');
            key.push_str(&reference);
        }
        Self {
            key,
            to_view,
            to_envelope,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn to_view(&self, envelope: &Envelope) -> Option<T> {
        (self.to_view)(envelope)
    }

    pub fn to_envelope(&self, value: T) -> Envelope {
        (self.to_envelope)(value)
    }

    /// The live cached value, if any
    pub fn peek(&self, cache: &dyn Cache) -> Option<T> {
        cache.get(&self.key).and_then(|entry| self.to_view(&entry.envelope))
    }

    pub fn put(&self, cache: &dyn Cache, value: T, ttl: Duration) {
        cache.put(&self.key, self.to_envelope(value), ttl);
    }
}

impl TypedId<Vec<Flow>> {
    pub fn flows(resource: &ResourceId) -> Self {
        Self::build(
            resource,
            "flows",
            None,
            |envelope| Some(envelope.flows.clone()),
            Envelope::of_flows,
        )
    }
}

impl TypedId<Flow> {
    pub fn flow(resource: &ResourceId, flow_ref: &FlowRef) -> Self {
        Self::build(
            resource,
            "flow",
            Some(reference(flow_ref.agency(), flow_ref.id(), flow_ref.version())),
            |envelope| envelope.flows.first().cloned(),
            |flow| Envelope::of_flows(vec![flow]),
        )
    }
}

impl TypedId<Structure> {
    pub fn structure(resource: &ResourceId, struct_ref: &StructRef) -> Self {
        Self::build(
            resource,
            "struct",
            Some(reference(struct_ref.agency(), struct_ref.id(), struct_ref.version())),
            |envelope| envelope.structures.first().cloned(),
            Envelope::of_structure,
        )
    }
}

impl TypedId<DataSet> {
    /// The containment slot of `category` for one flow
    pub fn data(resource: &ResourceId, category: &str, flow_ref: &FlowRef) -> Self {
        let operation = format!("data/{}", encode(category));
        Self::build(
            resource,
            &operation,
            Some(reference(flow_ref.agency(), flow_ref.id(), flow_ref.version())),
            |envelope| envelope.data_sets.first().cloned(),
            Envelope::of_data_set,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCache;
    use statdx_core::{DataQuery, Detail, Key, ManualClock};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn resource() -> ResourceId {
        ResourceId::new("rest", "https://data.example.org/service")
            .with_languages(["en", "fr"])
            .with_discriminator("dialect", "v21")
    }

    fn flow_ref() -> FlowRef {
        FlowRef::new("ECB", "EXR", "1.0")
    }

    #[test]
    fn test_identity_strings() {
        assert_eq!(
            resource().to_string(),
            "rest:https%3A%2F%2Fdata.example.org%2Fservice?lang=en,fr&dialect=v21"
        );
        assert_eq!(
            TypedId::flows(&resource()).key(),
            "cache:rest:https%3A%2F%2Fdata.example.org%2Fservice?lang=en,fr&dialect=v21#flows"
        );
        assert_eq!(
            TypedId::data(&resource(), "keys", &flow_ref()).key(),
            "cache:rest:https%3A%2F%2Fdata.example.org%2Fservice?lang=en,fr&dialect=v21#data/keys/ECB,EXR,1.0"
        );
    }

    #[test]
    fn test_reserved_characters_never_collide() {
        let with_query = ResourceId::new("rest", "https://h/s?lang=en");
        let with_language = ResourceId::new("rest", "https://h/s").with_languages(["en"]);
        assert_ne!(with_query.to_string(), with_language.to_string());

        let joined = ResourceId::new("rest", "https://h/s").with_discriminator("a", "1&b=2");
        let split = ResourceId::new("rest", "https://h/s")
            .with_discriminator("a", "1")
            .with_discriminator("b", "2");
        assert_ne!(joined.to_string(), split.to_string());

        let two_languages = ResourceId::new("rest", "https://h/s").with_languages(["en", "fr"]);
        let one_language = ResourceId::new("rest", "https://h/s").with_languages(["en,fr"]);
        assert_ne!(two_languages.to_string(), one_language.to_string());

        let kind_in_location = ResourceId::new("rest:x", "y");
        let location_only = ResourceId::new("rest", "x:y");
        assert_ne!(kind_in_location.to_string(), location_only.to_string());

        let fragment = ResourceId::new("file", "/data/a#flows");
        assert_ne!(
            TypedId::flows(&fragment).key(),
            TypedId::flows(&ResourceId::new("file", "/data/a")).key()
        );

        let comma_id = FlowRef::new("ECB", "EXR,1.0", "2.0");
        let comma_agency = FlowRef::new("ECB,EXR", "1.0", "2.0");
        assert_ne!(
            TypedId::flow(&resource(), &comma_id).key(),
            TypedId::flow(&resource(), &comma_agency).key()
        );
        assert_ne!(
            TypedId::data(&resource(), "keys/ECB,EXR,1.0", &flow_ref()).key(),
            TypedId::data(&resource(), "keys", &FlowRef::new("ECB", "EXR", "1.0/ECB,EXR,1.0")).key()
        );
    }

    #[test]
    fn test_identities_are_deterministic() {
        let a = TypedId::flow(&resource(), &flow_ref());
        let b = TypedId::flow(&resource(), &flow_ref());
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_distinct_requests_never_collide() {
        let other_lang = ResourceId::new("rest", "https://data.example.org/service").with_languages(["de"]);
        let other_location = ResourceId::new("file", "/data/exr.xml");
        let struct_ref = StructRef::new("ECB", "ECB_EXR1", "1.0");

        let keys: HashSet<String> = [
            TypedId::flows(&resource()).key().to_string(),
            TypedId::flows(&other_lang).key().to_string(),
            TypedId::flows(&other_location).key().to_string(),
            TypedId::flow(&resource(), &flow_ref()).key().to_string(),
            TypedId::flow(&resource(), &FlowRef::new("ECB", "EXR", "2.0")).key().to_string(),
            TypedId::structure(&resource(), &struct_ref).key().to_string(),
            TypedId::data(&resource(), "keys", &flow_ref()).key().to_string(),
            TypedId::data(&other_lang, "keys", &flow_ref()).key().to_string(),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn test_views_over_generic_envelope() {
        let data_set = DataSet::new(flow_ref(), DataQuery::new(Key::ALL, Detail::SeriesKeysOnly), vec![]);
        let id = TypedId::data(&resource(), "keys", &flow_ref());

        let envelope = id.to_envelope(data_set.clone());
        assert!(envelope.flows.is_empty());
        assert_eq!(id.to_view(&envelope), Some(data_set));

        let structure_id = TypedId::structure(&resource(), &StructRef::new("ECB", "ECB_EXR1", "1.0"));
        assert_eq!(structure_id.to_view(&envelope), None);
    }

    #[test]
    fn test_peek_and_put() {
        let cache = MemoryCache::new(Arc::new(ManualClock::at_epoch()));
        let id = TypedId::flows(&resource());
        assert_eq!(id.peek(&cache), None);

        id.put(&cache, vec![], Duration::from_secs(5));
        assert_eq!(id.peek(&cache), Some(vec![]));
    }
}
