use contactbook_core::{DomainError, DomainResult, User};

use crate::database::Database;
use crate::store::ScopedStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn find_by_id(&self, db: &Database, id: &str) -> Option<User> {
        db.users().get(&(), &id.to_string())
    }

    pub fn find_by_token(&self, db: &Database, token: &str) -> Option<User> {
        db.users()
            .all()
            .into_iter()
            .find(|u| u.token.as_deref() == Some(token))
    }

    pub fn count_by_id(&self, db: &Database, id: &str) -> usize {
        usize::from(self.find_by_id(db, id).is_some())
    }

    /// Stores a new user; an existing id is a conflict and is left untouched.
    pub fn create(&self, db: &Database, user: User) -> DomainResult<()> {
        tracing::debug!(user_id = %user.id, "creating user");
        if db.users().insert_if_absent((), user.id.clone(), user) {
            Ok(())
        } else {
            Err(DomainError::conflict("user already exists"))
        }
    }

    pub fn save(&self, db: &Database, user: User) {
        tracing::debug!(user_id = %user.id, "saving user");
        db.users().upsert((), user.id.clone(), user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, token: Option<&str>) -> User {
        User {
            id: id.to_string(),
            name: id.to_uppercase(),
            password_hash: String::new(),
            token: token.map(str::to_string),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn finds_users_by_id_and_token() {
        let db = Database::new();
        let repo = UserRepository::new();
        repo.save(&db, user("alice", Some("t-1")));
        repo.save(&db, user("bob", None));

        assert_eq!(repo.find_by_id(&db, "bob").unwrap().name, "BOB");
        assert_eq!(repo.find_by_token(&db, "t-1").unwrap().id, "alice");
        assert!(repo.find_by_token(&db, "t-2").is_none());
        assert_eq!(repo.count_by_id(&db, "alice"), 1);
        assert_eq!(repo.count_by_id(&db, "carol"), 0);
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let db = Database::new();
        let repo = UserRepository::new();
        repo.create(&db, user("alice", None)).unwrap();

        let mut other = user("alice", Some("t-9"));
        other.name = "Impostor".to_string();
        assert!(matches!(repo.create(&db, other), Err(DomainError::Conflict(_))));
        assert_eq!(repo.find_by_id(&db, "alice").unwrap().name, "ALICE");
    }
}
