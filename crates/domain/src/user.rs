use derive_more::Deref;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CreateError, Name, ReadError};

#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync + 'static {
    async fn read_users(&self) -> Result<Vec<User>, ReadError>;
    async fn read_user(&self, id: UserID) -> Result<User, ReadError>;
    /// Records or refreshes the identity handed over by the auth provider.
    async fn upsert_user(&self, user: User) -> Result<User, CreateError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserID,
    pub name: Name,
    pub role: Role,
}

#[derive(
    Deref,
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_user_id_nil() {
        assert!(UserID::nil().is_nil());
        assert_eq!(UserID::nil(), UserID::default());
    }

    #[rstest]
    #[case(Role::User, "user")]
    #[case(Role::Admin, "admin")]
    fn test_role_string_round_trip(#[case] role: Role, #[case] string: &str) {
        assert_eq!(role.to_string(), string);
        assert_eq!(Role::from_str(string).unwrap(), role);
    }

    #[test]
    fn test_role_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }
}
