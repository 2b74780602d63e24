use thiserror::Error;

use crate::model::ids::ClipId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClipError {
    #[error("clip name cannot be empty")]
    EmptyName,
}

/// A playable clip together with the answer text shown for it.
///
/// The display name doubles as the answer: the player wins a question by
/// picking the option whose name belongs to the clip that is playing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipRef {
    id: ClipId,
    name: String,
}

impl ClipRef {
    /// Create a clip reference.
    ///
    /// # Errors
    ///
    /// Returns `ClipError::EmptyName` if the name is blank.
    pub fn new(id: ClipId, name: impl Into<String>) -> Result<Self, ClipError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ClipError::EmptyName);
        }
        Ok(Self { id, name })
    }

    #[must_use]
    pub fn id(&self) -> ClipId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ClipRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_names() {
        assert_eq!(
            ClipRef::new(ClipId::new(1), "  ").unwrap_err(),
            ClipError::EmptyName
        );
    }

    #[test]
    fn keeps_name_verbatim() {
        let clip = ClipRef::new(ClipId::new(1), " Blue Monday ").unwrap();
        assert_eq!(clip.name(), " Blue Monday ");
        assert_eq!(clip.id(), ClipId::new(1));
    }
}
