use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Supabase session JWT claims — only what the session-presence check needs.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The Supabase auth user UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    pub email: Option<String>,
    /// Supabase role (e.g. "authenticated").
    pub role: Option<String>,
}

/// Validate a Supabase session JWT (HS256, signed with the project's JWT
/// secret) and return the decoded claims.
pub fn validate_session(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Token validation failed: {e}"))
}

/// Wrapper type to store the Supabase JWT secret in Actix app data.
#[derive(Clone)]
pub struct SessionSecret(pub String);

/// Extractor for write endpoints: requires a valid admin session token.
/// This is a session-presence check only — there is no finer-grained
/// authorization in this service.
pub struct AdminSession(pub Claims);

impl FromRequest for AdminSession {
    type Error = Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = (|| {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Missing Authorization header")
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;

            let secret = req
                .app_data::<web::Data<SessionSecret>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Session secret not configured")
                })?;

            let claims = validate_session(token, &secret.0)
                .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

            Ok(AdminSession(claims))
        })();
        std::future::ready(result)
    }
}
