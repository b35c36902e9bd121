/// Declarative description of a remote resource kind.
///
/// A descriptor carries everything the path builder needs to route a kind:
/// its URL segment and, for child kinds, the descriptor of the parent scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Singular name, also the attribute key a child uses to reference its parent.
    pub singular: &'static str,
    /// Plural URL segment (e.g. `"messages"`).
    pub plural: &'static str,
    /// Parent kind for nested resources.
    pub parent: Option<&'static ResourceDescriptor>,
}

impl ResourceDescriptor {
    /// Declares a top-level kind.
    pub const fn top_level(singular: &'static str, plural: &'static str) -> Self {
        Self {
            singular,
            plural,
            parent: None,
        }
    }

    /// Declares a kind nested under `parent`.
    pub const fn scoped(
        singular: &'static str,
        plural: &'static str,
        parent: &'static ResourceDescriptor,
    ) -> Self {
        Self {
            singular,
            plural,
            parent: Some(parent),
        }
    }

    /// Returns true if this kind lives under a parent scope.
    pub fn is_scoped(&self) -> bool {
        self.parent.is_some()
    }
}

pub const CONVERSATION: ResourceDescriptor =
    ResourceDescriptor::top_level("conversation", "conversations");

pub const MESSAGE: ResourceDescriptor =
    ResourceDescriptor::scoped("message", "messages", &CONVERSATION);

pub const ANNOUNCEMENT: ResourceDescriptor =
    ResourceDescriptor::top_level("announcement", "announcements");

pub const NOTIFICATION: ResourceDescriptor =
    ResourceDescriptor::top_level("notification", "notifications");
