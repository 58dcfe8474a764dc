use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid,
    pub realm_access: JwtClaimsRealmAccess,
}

#[derive(Deserialize)]
pub struct JwtClaimsRealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}
