use liftlog_domain::{CreateError, Name, ReadError, Role, StorageError, User, UserID, UserRepository};
use sqlx::{Row, sqlite::SqliteRow};

use crate::{Database, db_err, parse_uuid};

impl UserRepository for Database {
    async fn read_users(&self) -> Result<Vec<User>, ReadError> {
        let rows = sqlx::query("SELECT id, name, role FROM users ORDER BY name")
            .fetch_all(self.pool())
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?)
    }

    async fn read_user(&self, id: UserID) -> Result<User, ReadError> {
        let row = sqlx::query("SELECT id, name, role FROM users WHERE id = ?")
            .bind((*id).to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(db_err)?;
        match row {
            Some(row) => Ok(row_to_user(&row)?),
            None => Err(ReadError::NotFound),
        }
    }

    async fn upsert_user(&self, user: User) -> Result<User, CreateError> {
        sqlx::query(
            "INSERT INTO users (id, name, role) VALUES (?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, role = excluded.role",
        )
        .bind((*user.id).to_string())
        .bind(user.name.as_ref())
        .bind(user.role.to_string())
        .execute(self.pool())
        .await
        .map_err(db_err)?;
        Ok(user)
    }
}

fn row_to_user(row: &SqliteRow) -> Result<User, StorageError> {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let role: String = row.get("role");
    Ok(User {
        id: parse_uuid(&id)?.into(),
        name: Name::new(&name).map_err(|e| StorageError::Other(Box::new(e)))?,
        role: role
            .parse::<Role>()
            .map_err(|e| StorageError::Other(Box::new(e)))?,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::tests::setup_db;

    use super::*;

    #[tokio::test]
    async fn test_upsert_and_read_user() {
        let (db, _dir) = setup_db().await;
        let user = User {
            id: 1.into(),
            name: Name::new("ada").unwrap(),
            role: Role::Admin,
        };
        db.upsert_user(user.clone()).await.unwrap();
        assert_eq!(db.read_user(user.id).await.unwrap(), user);

        // Re-registering the same id updates the profile in place.
        let renamed = User {
            name: Name::new("ada.l").unwrap(),
            ..user.clone()
        };
        db.upsert_user(renamed.clone()).await.unwrap();
        assert_eq!(db.read_users().await.unwrap(), vec![renamed]);
    }
}
