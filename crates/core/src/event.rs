use crate::remote::DropGrant;
use std::fmt;
use std::sync::Arc;

/// The part of a drag event that concerns permissions.
///
/// A drop only carries a grant when the drag source offered content URIs
/// with grant flags set.
#[derive(Clone, Default)]
pub struct DragEvent {
    drop_grant: Option<Arc<dyn DropGrant>>,
}

impl DragEvent {
    pub fn with_grant(grant: Arc<dyn DropGrant>) -> Self {
        Self {
            drop_grant: Some(grant),
        }
    }

    pub fn without_grant() -> Self {
        Self { drop_grant: None }
    }

    pub fn drop_grant(&self) -> Option<&Arc<dyn DropGrant>> {
        self.drop_grant.as_ref()
    }
}

impl fmt::Debug for DragEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragEvent")
            .field("has_grant", &self.drop_grant.is_some())
            .finish()
    }
}
