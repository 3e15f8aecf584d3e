//! Payment method service

use crate::audit::EntityType;
use crate::error::PocketResult;
use crate::models::{NewPaymentMethod, PaymentMethod, PaymentMethodId, PaymentMethodPatch};
use crate::storage::Storage;

/// Service for payment method management
pub struct PaymentMethodService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentMethodService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: NewPaymentMethod) -> PocketResult<PaymentMethod> {
        let method = self.storage.payment_methods.create(input)?;
        self.storage.payment_methods.save()?;

        self.storage.log_create(
            EntityType::PaymentMethod,
            method.id.to_string(),
            Some(method.name.clone()),
            &method,
        )?;

        Ok(method)
    }

    pub fn get_by_id(&self, id: &PaymentMethodId) -> PocketResult<Option<PaymentMethod>> {
        self.storage.payment_methods.get_by_id(id)
    }

    pub fn get_all(&self) -> PocketResult<Vec<PaymentMethod>> {
        self.storage.payment_methods.get_all()
    }

    /// Find a payment method by id, or failing that by case-insensitive name
    pub fn find(&self, identifier: &str) -> PocketResult<Option<PaymentMethod>> {
        if let Some(method) = self.get_by_id(&PaymentMethodId::from(identifier))? {
            return Ok(Some(method));
        }

        let wanted = identifier.trim().to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .find(|m| m.name.to_lowercase() == wanted))
    }

    pub fn update(
        &self,
        id: &PaymentMethodId,
        patch: PaymentMethodPatch,
    ) -> PocketResult<Option<PaymentMethod>> {
        let Some((before, after)) = self.storage.payment_methods.update_tracked(id, patch)? else {
            return Ok(None);
        };
        self.storage.payment_methods.save()?;

        let mut changes = Vec::new();
        if before.name != after.name {
            changes.push(format!("name: '{}' -> '{}'", before.name, after.name));
        }
        if before.icon != after.icon {
            changes.push("icon changed".to_string());
        }
        let diff = (!changes.is_empty()).then(|| changes.join(", "));

        self.storage.log_update(
            EntityType::PaymentMethod,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
            diff,
        )?;

        Ok(Some(after))
    }

    pub fn delete(&self, id: &PaymentMethodId) -> PocketResult<bool> {
        let Some(removed) = self.storage.payment_methods.remove(id)? else {
            return Ok(false);
        };
        self.storage.payment_methods.save()?;

        self.storage.log_delete(
            EntityType::PaymentMethod,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        )?;

        Ok(true)
    }

    pub fn clear(&self) -> PocketResult<()> {
        let removed = self.storage.payment_methods.count()?;
        self.storage.payment_methods.clear()?;
        self.storage.payment_methods.save()?;
        self.storage.log_clear(EntityType::PaymentMethod, removed)
    }
}
