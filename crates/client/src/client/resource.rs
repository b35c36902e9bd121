//! Generic resource engine.
//!
//! A resource kind is a zero-sized marker type implementing [`ResourceKind`]
//! plus the capability traits for the operations it supports. Everything
//! else (paths, dispatch, classification, wrapping) is written once here.
//!
//! ```rust,ignore
//! pub struct Notifications;
//!
//! impl ResourceKind for Notifications {
//!     const DESCRIPTOR: ResourceDescriptor = NOTIFICATION;
//! }
//!
//! impl Creatable for Notifications {}
//! ```

use std::fmt;
use std::marker::PhantomData;

use layer_core::api::{expect_collection, expect_resource};
use layer_core::resource::{
    build_path, kind_segment, merge_payload, qualified_id, short_id, Attributes, Operation,
    ResourceDescriptor,
};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use super::Client;
use crate::error::Result;

/// Declares a remote resource kind.
pub trait ResourceKind: Send + Sync + 'static {
    /// URL segment and parent scope of this kind.
    const DESCRIPTOR: ResourceDescriptor;

    /// Attributes merged under every create payload. Caller keys win.
    fn create_defaults() -> Map<String, Value> {
        Map::new()
    }
}

/// Kinds that support `create` (POST on the collection).
pub trait Creatable: ResourceKind {}

/// Kinds that support `list` (GET on the collection).
pub trait Listable: ResourceKind {}

/// Kinds that support `find` (GET on a member).
pub trait Findable: ResourceKind {}

/// Kinds that support `destroy` (DELETE on a member).
pub trait Destroyable: ResourceKind {}

/// Identifying attributes of the parent a child resource lives under.
///
/// Captured by value when the child is built; it never tracks later changes
/// to the parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentRef {
    attributes: Attributes,
}

impl ParentRef {
    /// Reference to a resource of kind `parent` by id.
    ///
    /// Short ids are expanded to `layer:///<plural>/<id>` so the stored id is
    /// always fully qualified. A qualified id of another kind is kept as is
    /// and fails with `MissingIdentifier` once a path is built from it.
    pub fn for_kind(parent: &ResourceDescriptor, id: &str) -> Self {
        let id = if kind_segment(id).is_some() {
            id.to_string()
        } else {
            qualified_id(parent.plural, id)
        };
        Self::from_id(id)
    }

    fn from_id(id: String) -> Self {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(id));
        Self {
            attributes: Attributes::new(map),
        }
    }

    /// Copies the identifying attributes (`id`, `url`) of a parent resource.
    ///
    /// Returns `None` if the parent has no id.
    pub fn from_attributes(parent: &Attributes) -> Option<Self> {
        parent.id()?;
        let map = ["id", "url"]
            .into_iter()
            .filter_map(|key| parent.get(key).map(|v| (key.to_string(), v.clone())))
            .collect();
        Some(Self {
            attributes: Attributes::new(map),
        })
    }

    /// Fully qualified parent id.
    pub fn id(&self) -> &str {
        self.attributes.id().unwrap_or_default()
    }

    /// Trailing segment of the parent id.
    pub fn uuid(&self) -> Option<&str> {
        short_id(self.id())
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Local envelope for one remote resource of kind `K`.
///
/// Immutable after construction. Holds a handle to the [`Client`] that
/// produced it so sub-resources can be reached (a conversation's messages).
pub struct Resource<K: ResourceKind> {
    attributes: Attributes,
    parent: Option<ParentRef>,
    client: Client,
    kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Resource<K> {
    /// Wraps attributes obtained elsewhere (a cache, a webhook payload).
    ///
    /// For child kinds the parent reference is read from the embedded parent
    /// object, e.g. `{"conversation": {"id": ...}}` on a message.
    pub fn new(attributes: Attributes, client: Client) -> Self {
        Self::with_parent(attributes, client, None)
    }

    pub(crate) fn with_parent(
        attributes: Attributes,
        client: Client,
        parent: Option<ParentRef>,
    ) -> Self {
        let parent = parent.or_else(|| embedded_parent::<K>(&attributes));
        Self {
            attributes,
            parent,
            client,
            kind: PhantomData,
        }
    }

    /// Raw attributes as returned by the server.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    /// Raw lookup for fields without a typed accessor.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Fully qualified id (`layer:///<plural>/<uuid>`), verbatim from the server.
    pub fn id(&self) -> Option<&str> {
        self.attributes.id()
    }

    /// Short id: the trailing segment of [`Resource::id`].
    pub fn uuid(&self) -> Option<&str> {
        self.attributes.uuid()
    }

    pub fn url(&self) -> Option<&str> {
        self.attributes.url()
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Relative path addressing this resource for `operation`.
    pub fn path(&self, operation: Operation) -> Result<String> {
        Ok(build_path(
            &K::DESCRIPTOR,
            self.parent.as_ref().map(ParentRef::id),
            operation,
            self.id(),
        )?)
    }

    /// Resource client for the same kind and scope as this resource.
    pub fn siblings(&self) -> ResourceClient<K> {
        ResourceClient::new(self.client.clone(), self.parent.clone())
    }

    /// Reference to this resource, for use as the scope of child kinds.
    pub fn as_parent(&self) -> Option<ParentRef> {
        ParentRef::from_attributes(&self.attributes)
    }
}

impl<K: Destroyable> Resource<K> {
    /// Deletes this resource on the server. The local value is left as is.
    pub async fn destroy(&self) -> Result<()> {
        self.siblings().destroy(self).await
    }
}

fn embedded_parent<K: ResourceKind>(attributes: &Attributes) -> Option<ParentRef> {
    let parent = K::DESCRIPTOR.parent?;
    attributes
        .reference_id(parent.singular)
        .map(|id| ParentRef::for_kind(parent, id))
}

impl<K: ResourceKind> Clone for Resource<K> {
    fn clone(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            parent: self.parent.clone(),
            client: self.client.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> fmt::Debug for Resource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &K::DESCRIPTOR.singular)
            .field("attributes", &self.attributes)
            .field("parent", &self.parent)
            .finish()
    }
}

impl<K: ResourceKind> Serialize for Resource<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}

/// Query parameters for listing a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Maximum number of results per page.
    pub page_size: Option<u32>,
    /// Return results after this id (pagination cursor).
    pub from_id: Option<String>,
    /// Server-side sort key, e.g. `created_at` or `last_message`.
    pub sort_by: Option<String>,
    /// Any other filter, sent verbatim.
    pub extra: Vec<(String, String)>,
}

impl ListParams {
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn from_id(mut self, from_id: impl Into<String>) -> Self {
        self.from_id = Some(from_id.into());
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Query pairs in a stable order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page_size) = self.page_size {
            query.push(("page_size".to_string(), page_size.to_string()));
        }
        if let Some(from_id) = &self.from_id {
            query.push(("from_id".to_string(), from_id.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            query.push(("sort_by".to_string(), sort_by.clone()));
        }
        query.extend(self.extra.iter().cloned());
        query
    }
}

/// CRUD access to one resource kind, optionally within a parent scope.
pub struct ResourceClient<K: ResourceKind> {
    client: Client,
    parent: Option<ParentRef>,
    kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> ResourceClient<K> {
    pub(crate) fn new(client: Client, parent: Option<ParentRef>) -> Self {
        Self {
            client,
            parent,
            kind: PhantomData,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Scope this client operates in, for child kinds.
    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn path(&self, operation: Operation, id: Option<&str>) -> Result<String> {
        Ok(build_path(
            &K::DESCRIPTOR,
            self.parent.as_ref().map(ParentRef::id),
            operation,
            id,
        )?)
    }

    fn wrap(&self, attributes: Attributes) -> Resource<K> {
        Resource::with_parent(attributes, self.client.clone(), self.parent.clone())
    }
}

impl<K: Creatable> ResourceClient<K> {
    /// Creates a resource from `payload` merged over the kind's defaults.
    pub async fn create(&self, payload: Map<String, Value>) -> Result<Resource<K>> {
        let path = self.path(Operation::Create, None)?;
        let body = merge_payload(&K::create_defaults(), &payload);
        let (status, body) = self
            .client
            .dispatch(
                Operation::Create.method(),
                path,
                Vec::new(),
                Some(Value::Object(body)),
            )
            .await?;
        let resource = self.wrap(expect_resource(status, body)?);
        tracing::debug!(kind = K::DESCRIPTOR.singular, id = resource.id(), "Created resource");
        Ok(resource)
    }
}

impl<K: Listable> ResourceClient<K> {
    /// Lists every resource in scope, in server order.
    pub async fn list(&self) -> Result<Vec<Resource<K>>> {
        self.list_with(&ListParams::default()).await
    }

    /// Lists resources in scope, filtered by `params`.
    pub async fn list_with(&self, params: &ListParams) -> Result<Vec<Resource<K>>> {
        let path = self.path(Operation::List, None)?;
        let (status, body) = self
            .client
            .dispatch(Operation::List.method(), path, params.to_query(), None)
            .await?;
        Ok(expect_collection(status, body)?
            .into_iter()
            .map(|attributes| self.wrap(attributes))
            .collect())
    }
}

impl<K: Findable> ResourceClient<K> {
    /// Fetches one resource by short or fully qualified id.
    ///
    /// A missing resource is an [`ApiError::NotFound`](crate::error::ApiError::NotFound).
    pub async fn find(&self, id: &str) -> Result<Resource<K>> {
        let path = self.path(Operation::Find, Some(id))?;
        let (status, body) = self
            .client
            .dispatch(Operation::Find.method(), path, Vec::new(), None)
            .await?;
        Ok(self.wrap(expect_resource(status, body)?))
    }
}

impl<K: Destroyable> ResourceClient<K> {
    /// Deletes `resource` on the server.
    ///
    /// Fails with `MissingIdentifier` before any request when the resource
    /// has no id (or, for child kinds, no parent id).
    pub async fn destroy(&self, resource: &Resource<K>) -> Result<()> {
        let parent = resource.parent().or(self.parent.as_ref());
        let path = build_path(
            &K::DESCRIPTOR,
            parent.map(ParentRef::id),
            Operation::Destroy,
            resource.id(),
        )?;
        self.client
            .dispatch(Operation::Destroy.method(), path, Vec::new(), None)
            .await?;
        tracing::debug!(kind = K::DESCRIPTOR.singular, id = resource.id(), "Destroyed resource");
        Ok(())
    }
}

impl<K: ResourceKind> Clone for ResourceClient<K> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone(), self.parent.clone())
    }
}

impl<K: ResourceKind> fmt::Debug for ResourceClient<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("kind", &K::DESCRIPTOR.plural)
            .field("parent", &self.parent)
            .finish()
    }
}

/// Converts a `json!` object literal into a payload map.
pub(crate) fn into_payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

/// `{"recipients": [...]}` merged over `content`; the explicit recipients win.
pub(crate) fn with_recipients(
    content: Map<String, Value>,
    recipients: &[String],
) -> Map<String, Value> {
    merge_payload(&content, &into_payload(json!({ "recipients": recipients })))
}
