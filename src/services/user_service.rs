use std::sync::Arc;

use tracing::info;

use super::ServiceError;
use crate::database::models::User;
use crate::database::{Datastore, DocumentQuery, Repository};

#[derive(Clone)]
pub struct UserService {
    users: Repository<User>,
}

impl UserService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self {
            users: Repository::new(store),
        }
    }

    /// Fetch the user for `sub`, creating it on first login. The flag is true when created.
    pub async fn ensure_user(&self, sub: &str) -> Result<(User, bool), ServiceError> {
        if let Some(user) = self.users.select_one(sub).await? {
            return Ok((user, false));
        }

        let user = User { id: sub.to_string() };
        self.users.save(&user).await?;
        info!(user_id = sub, "registered new user");
        Ok((user, true))
    }

    pub async fn get(&self, user_id: &str) -> Result<User, ServiceError> {
        self.users
            .select_one(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", user_id))
    }

    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.select_any(DocumentQuery::all()).await?)
    }
}
