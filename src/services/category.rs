//! Category service
//!
//! CRUD over the category store. Deleting a category leaves transactions that
//! reference it untouched; display code falls back to a placeholder label.

use crate::audit::EntityType;
use crate::error::PocketResult;
use crate::models::{Category, CategoryId, CategoryPatch, NewCategory, TransactionType};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: NewCategory) -> PocketResult<Category> {
        let category = self.storage.categories.create(input)?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    pub fn get_by_id(&self, id: &CategoryId) -> PocketResult<Option<Category>> {
        self.storage.categories.get_by_id(id)
    }

    pub fn get_all(&self) -> PocketResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Categories offered for one transaction type, in creation order
    pub fn get_by_type(&self, kind: TransactionType) -> PocketResult<Vec<Category>> {
        let mut categories = self.get_all()?;
        categories.retain(|c| c.kind == kind);
        Ok(categories)
    }

    /// Find a category by id, or failing that by case-insensitive name
    pub fn find(&self, identifier: &str) -> PocketResult<Option<Category>> {
        if let Some(category) = self.get_by_id(&CategoryId::from(identifier))? {
            return Ok(Some(category));
        }

        let wanted = identifier.trim().to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .find(|c| c.name.to_lowercase() == wanted))
    }

    pub fn update(&self, id: &CategoryId, patch: CategoryPatch) -> PocketResult<Option<Category>> {
        let Some((before, after)) = self.storage.categories.update_tracked(id, patch)? else {
            return Ok(None);
        };
        self.storage.categories.save()?;

        let mut changes = Vec::new();
        if before.name != after.name {
            changes.push(format!("name: '{}' -> '{}'", before.name, after.name));
        }
        if before.kind != after.kind {
            changes.push(format!("type: {} -> {}", before.kind, after.kind));
        }
        if before.icon != after.icon {
            changes.push("icon changed".to_string());
        }
        if before.color != after.color {
            changes.push("color changed".to_string());
        }
        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.log_update(
            EntityType::Category,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
            diff,
        )?;

        Ok(Some(after))
    }

    /// Remove a category; `true` iff it existed
    pub fn delete(&self, id: &CategoryId) -> PocketResult<bool> {
        let Some(removed) = self.storage.categories.remove(id)? else {
            return Ok(false);
        };
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        )?;

        Ok(true)
    }

    pub fn clear(&self) -> PocketResult<()> {
        let removed = self.storage.categories.count()?;
        self.storage.categories.clear()?;
        self.storage.categories.save()?;
        self.storage.log_clear(EntityType::Category, removed)
    }
}
