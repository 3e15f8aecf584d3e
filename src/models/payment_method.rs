//! Payment method model
//!
//! Payment methods (card, cash, bank transfer, ...) carry no type restriction.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{validate_name, NameValidationError};
use super::ids::PaymentMethodId;
use crate::storage::Entity;

/// A way of paying or receiving money
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Unique identifier, assigned by the store
    pub id: PaymentMethodId,

    /// Display name
    pub name: String,

    /// Optional icon (usually an emoji)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.icon {
            Some(icon) => write!(f, "{} {}", icon, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Entity for PaymentMethod {
    type Id = PaymentMethodId;
    type Input = NewPaymentMethod;
    type Patch = PaymentMethodPatch;

    const ID_PREFIX: &'static str = PaymentMethodId::PREFIX;

    fn id(&self) -> &PaymentMethodId {
        &self.id
    }

    fn from_input(id: PaymentMethodId, input: NewPaymentMethod) -> Self {
        Self {
            id,
            name: input.name,
            icon: input.icon,
        }
    }

    fn apply(&mut self, patch: PaymentMethodPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
    }
}

/// Input for creating a payment method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentMethod {
    pub name: String,
    pub icon: Option<String>,
}

impl NewPaymentMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn validate(&self) -> Result<(), NameValidationError> {
        validate_name(&self.name)
    }
}

/// Partial update for a payment method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentMethodPatch {
    pub name: Option<String>,
    pub icon: Option<Option<String>>,
}

impl PaymentMethodPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn validate(&self) -> Result<(), NameValidationError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input() {
        let method = PaymentMethod::from_input(
            PaymentMethodId::from("payment-method-1-0"),
            NewPaymentMethod::new("신용카드").with_icon("💳"),
        );
        assert_eq!(method.name, "신용카드");
        assert_eq!(method.icon.as_deref(), Some("💳"));
        assert_eq!(method.to_string(), "💳 신용카드");
    }

    #[test]
    fn test_apply_patch() {
        let mut method = PaymentMethod::from_input(
            PaymentMethodId::from("p"),
            NewPaymentMethod::new("Cash"),
        );
        method.apply(PaymentMethodPatch::new().icon(Some("💵".into())));
        assert_eq!(method.name, "Cash");
        assert_eq!(method.icon.as_deref(), Some("💵"));
        assert_eq!(method.id.as_str(), "p");
    }

    #[test]
    fn test_validation() {
        assert!(NewPaymentMethod::new("Card").validate().is_ok());
        assert!(NewPaymentMethod::new("").validate().is_err());
        assert!(PaymentMethodPatch::new().validate().is_ok());
    }
}
