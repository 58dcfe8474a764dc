use std::{ops::Deref, sync::Arc};
use uuid::Uuid;

///
/// Authenticated caller of the request.
///
/// Inserted into request extensions by [JwtAuthLayer](crate::auth::JwtAuthLayer)
/// and extracted by handlers with `Extension<User>`.
///
/// All fields are stored in InnerUser behind an Arc,
/// so cloning is cheap. Fields are accessible thanks to Deref trait.
///
#[derive(Clone)]
pub struct User {
    inner: Arc<InnerUser>,
}

pub struct InnerUser {
    pub id: Uuid,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(id: Uuid, roles: Vec<String>) -> Self {
        Self {
            inner: Arc::new(InnerUser { id, roles }),
        }
    }
}

impl Deref for User {
    type Target = InnerUser;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
