//! Background media playlist and its rotation controller.

use std::sync::Arc;

use crate::error::ControllerError;

mod index;
mod rotator;

pub use index::{IndexSource, RandomIndex, ScriptedIndices};
pub use rotator::{MediaRotator, RotationOptions, Selection, DEFAULT_ROTATION_PERIOD};

/// Ordered, non-empty, immutable list of resource identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    items: Arc<[String]>,
}

impl Playlist {
    /// Fails with `InvalidArgument` when `items` is empty.
    pub fn new<I, S>(items: I) -> Result<Self, ControllerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(ControllerError::InvalidArgument(
                "playlist must contain at least one resource".to_string(),
            ));
        }
        Ok(Self {
            items: items.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    // Construction guarantees at least one item.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.items.iter().any(|item| item == resource)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}
