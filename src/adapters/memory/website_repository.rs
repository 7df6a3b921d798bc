//! In-memory implementation of WebsiteRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, WebsiteId};
use crate::domain::website::Website;
use crate::ports::WebsiteRepository;

#[derive(Default)]
pub struct InMemoryWebsiteRepository {
    websites: Mutex<HashMap<WebsiteId, Website>>,
}

impl InMemoryWebsiteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.websites.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn not_found(id: &WebsiteId) -> DomainError {
    DomainError::new(ErrorCode::WebsiteNotFound, format!("Website not found: {}", id))
}

#[async_trait]
impl WebsiteRepository for InMemoryWebsiteRepository {
    async fn save(&self, website: &Website) -> Result<(), DomainError> {
        let mut websites = self.websites.lock().unwrap();
        if websites.contains_key(website.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Website already exists: {}", website.id()),
            ));
        }
        websites.insert(*website.id(), website.clone());
        Ok(())
    }

    async fn update(&self, website: &Website) -> Result<(), DomainError> {
        let mut websites = self.websites.lock().unwrap();
        match websites.get_mut(website.id()) {
            Some(stored) => {
                *stored = website.clone();
                Ok(())
            }
            None => Err(not_found(website.id())),
        }
    }

    async fn find_by_id(&self, id: &WebsiteId) -> Result<Option<Website>, DomainError> {
        Ok(self.websites.lock().unwrap().get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Website>, DomainError> {
        let mut owned: Vec<Website> = self
            .websites
            .lock()
            .unwrap()
            .values()
            .filter(|w| w.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(owned)
    }

    async fn delete(&self, id: &WebsiteId) -> Result<(), DomainError> {
        self.websites
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
