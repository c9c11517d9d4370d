use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    user_token_expires_in: i64,
    admin_token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, user_expires_in: i64, admin_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            user_token_expires_in: user_expires_in,
            admin_token_expires_in: admin_expires_in,
        }
    }

    /// Admin sessions are deliberately shorter-lived than customer ones.
    pub fn generate_token(&self, user_id: i64, email: &str, role: &str) -> AppResult<String> {
        let now = Utc::now();
        let expires_in = if role == ROLE_ADMIN {
            self.admin_token_expires_in
        } else {
            self.user_token_expires_in
        };
        let exp = now + Duration::seconds(expires_in);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", 3600, 600)
    }

    #[test]
    fn test_token_round_trip() {
        let svc = service();
        let token = svc.generate_token(42, "a@b.com", ROLE_CUSTOMER).unwrap();
        let claims = svc.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, ROLE_CUSTOMER);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_admin_token_expires_sooner() {
        let svc = service();
        let user = svc.generate_token(1, "u@b.com", ROLE_CUSTOMER).unwrap();
        let admin = svc.generate_token(2, "a@b.com", ROLE_ADMIN).unwrap();

        let user_claims = svc.verify_token(&user).unwrap();
        let admin_claims = svc.verify_token(&admin).unwrap();
        assert!(admin_claims.exp < user_claims.exp);
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = service().generate_token(1, "a@b.com", ROLE_ADMIN).unwrap();
        let other = JwtService::new("other-secret", 3600, 600);
        assert!(other.verify_token(&token).is_err());
    }
}
