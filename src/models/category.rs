//! Category model
//!
//! Categories are user-defined labels for transactions. A category's type
//! says which transaction type it is normally offered for; nothing in the
//! core enforces that a transaction's category has a matching type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;
use crate::storage::Entity;

/// Maximum length of a category or payment method name
pub const MAX_NAME_LEN: usize = 50;

/// A transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier, assigned by the store
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Transaction type this category is offered for
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Optional icon (usually an emoji)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Optional display color, e.g. "#FF5733"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.icon {
            Some(icon) => write!(f, "{} {}", icon, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;
    type Input = NewCategory;
    type Patch = CategoryPatch;

    const ID_PREFIX: &'static str = CategoryId::PREFIX;

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn from_input(id: CategoryId, input: NewCategory) -> Self {
        Self {
            id,
            name: input.name,
            kind: input.kind,
            icon: input.icon,
            color: input.color,
        }
    }

    fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Input for creating a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub kind: TransactionType,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            name: name.into(),
            kind,
            icon: None,
            color: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), NameValidationError> {
        validate_name(&self.name)
    }
}

/// Partial update for a category; `icon` and `color` can be cleared with `Some(None)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub kind: Option<TransactionType>,
    pub icon: Option<Option<String>>,
    pub color: Option<Option<String>>,
}

impl CategoryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    pub fn validate(&self) -> Result<(), NameValidationError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

/// Shared name check for categories and payment methods
pub fn validate_name(name: &str) -> Result<(), NameValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameValidationError::Empty);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(NameValidationError::TooLong(len));
    }
    Ok(())
}

/// Validation errors for names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    Empty,
    TooLong(usize),
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Name cannot be empty"),
            Self::TooLong(len) => {
                write!(f, "Name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for NameValidationError {}
