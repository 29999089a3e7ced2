use serde::Serialize;
use uuid::Uuid;

use crate::domain::{PersonName, UserEmail};

/// Store-assigned identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullName {
    pub firstname: PersonName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<PersonName>,
}

/// A persisted user as returned by default reads.
///
/// There is deliberately no password hash on this type: the hash only ever
/// travels through `StoredCredentials`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub fullname: FullName,
    pub email: UserEmail,
    #[serde(rename = "socketId", skip_serializing_if = "Option::is_none")]
    pub socket_id: Option<String>,
}
