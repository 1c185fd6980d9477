use bcrypt::{hash, verify};

use crate::auth::AuthError;

/// bcrypt hashing with a configured cost. Work runs on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    pub async fn verify(&self, password: &str, hashed: &str) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let hashed = hashed.to_owned();
        tokio::task::spawn_blocking(move || verify(password, &hashed))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = PasswordHasher::new(4);
        let hashed = hasher.hash("Secret#123").await.unwrap();

        assert_ne!(hashed, "Secret#123");
        assert!(hasher.verify("Secret#123", &hashed).await.unwrap());
        assert!(!hasher.verify("Secret#124", &hashed).await.unwrap());
    }
}
