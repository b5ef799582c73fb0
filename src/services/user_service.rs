use sqlx::PgPool;
use uuid::Uuid;

use crate::config::get_config;
use crate::dto::user_dto::{LoginPayload, RegisterPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::{Capability, User};
use crate::utils::{password, token};

const USER_COLUMNS: &str = "id, username, email, password_hash, bio, location, language, \
                            profile_picture, capabilities, created_at, updated_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .fetch_one(&self.pool)
        .await?;
        if taken {
            return Err(Error::Conflict(
                "Username or email is already taken".to_string(),
            ));
        }

        let password_hash = password::hash_password(&payload.password)?;
        let capabilities = vec![payload.user_type];

        let mut tx = self.pool.begin().await?;

        let insert = format!(
            "INSERT INTO users (username, email, password_hash, capabilities) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&insert)
            .bind(&payload.username)
            .bind(&payload.email)
            .bind(&password_hash)
            .bind(&capabilities)
            .fetch_one(&mut *tx)
            .await?;

        let profile_insert = match payload.user_type {
            Capability::Client => "INSERT INTO client_profiles (user_id) VALUES ($1)",
            Capability::Vendor => "INSERT INTO vendor_profiles (user_id) VALUES ($1)",
        };
        sqlx::query(profile_insert)
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<(String, User)> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&payload.username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid username or password".to_string()))?;

        if !password::verify_password(&payload.password, &user.password_hash)? {
            return Err(Error::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let config = get_config();
        let token = token::issue_token(
            user.id,
            &user.capabilities,
            &config.jwt_secret,
            config.token_ttl_hours,
        )?;
        Ok((token, user))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn update_profile(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User> {
        let update = format!(
            "UPDATE users SET \
                bio = COALESCE($2, bio), \
                location = COALESCE($3, location), \
                language = COALESCE($4, language), \
                profile_picture = COALESCE($5, profile_picture), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&update)
            .bind(id)
            .bind(payload.bio)
            .bind(payload.location)
            .bind(payload.language)
            .bind(payload.profile_picture)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }
}
