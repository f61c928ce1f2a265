use std::sync::Arc;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use contactbook_core::entity::now_millis;
use contactbook_core::{DomainError, DomainResult, User};
use contactbook_events::{EventAction, UserEvent, UserProducer};
use contactbook_infra::{Database, UserRepository};

use crate::app::dto::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse};
use crate::app::validator::Validator;

use super::publish;

pub struct UserUseCase {
    db: Database,
    validator: Arc<Validator>,
    repository: UserRepository,
    producer: Option<Arc<UserProducer>>,
}

fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

impl UserUseCase {
    pub fn new(
        db: Database,
        validator: Arc<Validator>,
        repository: UserRepository,
        producer: Option<Arc<UserProducer>>,
    ) -> Self {
        Self {
            db,
            validator,
            repository,
            producer,
        }
    }

    pub fn create(&self, request: RegisterUserRequest) -> DomainResult<UserResponse> {
        self.validator.check(&request)?;

        let now = now_millis();
        let user = User {
            id: request.id,
            name: request.name,
            password_hash: hash_password(&request.password),
            token: None,
            created_at: now,
            updated_at: now,
        };
        self.repository
            .create(&self.db, user.clone())
            .inspect_err(|_| tracing::warn!(user_id = %user.id, "user already exists"))?;
        publish(self.producer.as_ref(), &UserEvent::from(&user), EventAction::Created);

        Ok(UserResponse::from_user(&user))
    }

    /// Checks credentials and issues a fresh session token.
    pub fn login(&self, request: LoginUserRequest) -> DomainResult<UserResponse> {
        self.validator.check(&request)?;

        let mut user = self
            .repository
            .find_by_id(&self.db, &request.id)
            .ok_or(DomainError::Unauthorized)?;
        if user.password_hash != hash_password(&request.password) {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(DomainError::Unauthorized);
        }

        let token = Uuid::new_v4().to_string();
        user.token = Some(token.clone());
        user.updated_at = now_millis();
        self.repository.save(&self.db, user.clone());
        publish(self.producer.as_ref(), &UserEvent::from(&user), EventAction::Updated);

        Ok(UserResponse::from_user(&user).with_token(token))
    }

    /// Resolves a session token to its user id.
    pub fn verify(&self, token: &str) -> DomainResult<String> {
        self.repository
            .find_by_token(&self.db, token)
            .map(|u| u.id)
            .ok_or(DomainError::Unauthorized)
    }

    pub fn current(&self, user_id: &str) -> DomainResult<UserResponse> {
        self.find(user_id).map(|u| UserResponse::from_user(&u))
    }

    pub fn update(&self, user_id: &str, request: UpdateUserRequest) -> DomainResult<UserResponse> {
        self.validator.check(&request)?;

        let mut user = self.find(user_id)?;
        if let Some(name) = request.name.filter(|n| !n.trim().is_empty()) {
            user.name = name;
        }
        if let Some(password) = request.password.filter(|p| !p.is_empty()) {
            user.password_hash = hash_password(&password);
        }
        user.updated_at = now_millis();
        self.repository.save(&self.db, user.clone());
        publish(self.producer.as_ref(), &UserEvent::from(&user), EventAction::Updated);

        Ok(UserResponse::from_user(&user))
    }

    pub fn logout(&self, user_id: &str) -> DomainResult<bool> {
        let mut user = self.find(user_id)?;
        user.token = None;
        user.updated_at = now_millis();
        self.repository.save(&self.db, user.clone());
        publish(self.producer.as_ref(), &UserEvent::from(&user), EventAction::Updated);

        Ok(true)
    }

    fn find(&self, user_id: &str) -> DomainResult<User> {
        self.repository
            .find_by_id(&self.db, user_id)
            .ok_or(DomainError::NotFound)
    }
}
