//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para generación y verificación
//! de tokens de sesión.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::environment::EnvironmentConfig,
    models::user::UserRole,
    utils::errors::AppError,
};

/// Claims del JWT token
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,    // user_id
    pub role: UserRole, // perfil del usuario
    pub email: String,
    pub exp: usize,     // expiration timestamp
    pub iat: usize,     // issued at timestamp
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

/// Generar JWT token para un usuario
pub fn generate_token(
    user_id: Uuid,
    role: UserRole,
    email: &str,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.expiration as i64);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        role,
        email: email.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<JwtClaims>(
        token,
        &decoding_key,
        &Validation::default(),
    )
    .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Jwt("Header Authorization debe comenzar con 'Bearer '".to_string()));
    }

    let token = &auth_header[7..]; // Remover "Bearer "
    if token.is_empty() {
        return Err(AppError::Jwt("Token no puede estar vacío".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "secreto-de-prueba".to_string(),
            expiration: 28800,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = generate_token(user_id, UserRole::Supervisor, "ana@flota.test", &config)
            .expect("debe generar token");
        let claims = verify_token(&token, &config).expect("debe verificar token");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, UserRole::Supervisor);
        assert_eq!(claims.email, "ana@flota.test");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let config = test_config();
        let other = JwtConfig {
            secret: "otro-secreto".to_string(),
            expiration: 28800,
        };

        let token = generate_token(Uuid::new_v4(), UserRole::Requester, "x@flota.test", &config)
            .expect("debe generar token");

        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();

        let claims = JwtClaims {
            sub: Uuid::new_v4().to_string(),
            role: UserRole::Admin,
            email: "x@flota.test".to_string(),
            exp: (now - 3600) as usize,
            iat: (now - 7200) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_ref()),
        )
        .expect("debe codificar");

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
