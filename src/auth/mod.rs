mod dto;
mod middleware;
mod role;

pub mod util;

pub use dto::User;
pub use middleware::JwtAuthLayer;
pub use role::*;

use crate::error::Error;

///
/// Validates that caller has all required roles.
///
/// ### Errors
/// - [Error::MissingRole] when any of the roles is missing
///
pub fn require_all_roles(user: &User, roles: &[Role]) -> Result<(), Error> {
    for role in roles {
        let role = role.as_ref();
        let found_role = user.roles.iter().any(|user_role| user_role == role);
        if !found_role {
            return Err(Error::MissingRole(role.to_string()));
        }
    }

    Ok(())
}
