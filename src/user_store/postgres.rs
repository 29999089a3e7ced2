use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::{FullName, PersonName, User, UserEmail, UserId};
use crate::user_store::{
    NewUserRecord, StoreError, StoredCredentials, UserStore,
};

// SQLSTATE raised by PostgreSQL on a UNIQUE constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(
        name = "Saving new user details in the database",
        skip_all
    )]
    async fn create(&self, record: NewUserRecord) -> Result<User, StoreError> {
        let user_id = UserId::generate();
        sqlx::query(
            r#"
            INSERT INTO users (user_id, firstname, lastname, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id.into_inner())
        .bind(record.fullname.firstname.as_ref())
        .bind(record.fullname.lastname.as_ref().map(AsRef::<str>::as_ref))
        .bind(record.email.as_ref())
        .bind(record.password_hash.expose_secret())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateEmail
            } else {
                StoreError::UnexpectedError(
                    anyhow::Error::new(e)
                        .context("Failed to insert a new user in the database."),
                )
            }
        })?;

        Ok(User {
            id: user_id,
            fullname: record.fullname,
            email: record.email,
            socket_id: None,
        })
    }

    #[tracing::instrument(name = "Get user by email", skip_all)]
    async fn find_by_email(
        &self,
        email: &UserEmail,
    ) -> Result<Option<User>, anyhow::Error> {
        let row = sqlx::query(
            r#"
            SELECT user_id, firstname, lastname, email, socket_id
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to perform a query to retrieve a user.")?;

        row.as_ref().map(row_to_user).transpose()
    }

    #[tracing::instrument(name = "Get stored credentials", skip_all)]
    async fn find_credentials_by_email(
        &self,
        email: &UserEmail,
    ) -> Result<Option<StoredCredentials>, anyhow::Error> {
        let row = sqlx::query(
            r#"
            SELECT user_id, firstname, lastname, email, socket_id, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to perform a query to retrieve stored credentials.")?;

        match row {
            Some(row) => {
                let password_hash: String = row.try_get("password_hash")?;
                Ok(Some(StoredCredentials {
                    user: row_to_user(&row)?,
                    password_hash: Secret::new(password_hash),
                }))
            }
            None => Ok(None),
        }
    }
}

fn row_to_user(row: &PgRow) -> Result<User, anyhow::Error> {
    let user_id: Uuid = row.try_get("user_id")?;
    let firstname: String = row.try_get("firstname")?;
    let lastname: Option<String> = row.try_get("lastname")?;
    let email: String = row.try_get("email")?;
    let socket_id: Option<String> = row.try_get("socket_id")?;

    let email = UserEmail::parse(email)
        .map_err(anyhow::Error::msg)
        .context("A stored email address is invalid.")?;

    Ok(User {
        id: UserId::from(user_id),
        fullname: FullName {
            firstname: PersonName::from_stored(firstname),
            lastname: lastname.map(PersonName::from_stored),
        },
        email,
        socket_id,
    })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_error) => {
            db_error.code().as_deref() == Some(UNIQUE_VIOLATION)
        }
        _ => false,
    }
}
