//! PostgreSQL user repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use uuid::Uuid;

use signup_core::domain::{NewUser, User, UserChanges};
use signup_core::error::RepoError;
use signup_core::ports::{CredentialHasher, UserRepository};

use super::entity::user::{self, Entity as UserEntity};
use crate::auth::hash_credential;

/// PostgreSQL user repository. Hashes credentials before they reach SQL.
pub struct PostgresUserRepository {
    db: DbConn,
    hasher: Arc<dyn CredentialHasher>,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { db, hasher }
    }

    #[cfg(test)]
    pub(crate) fn into_db(self) -> DbConn {
        self.db
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    if let Some(
        SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg),
    ) = err.sql_err()
    {
        return RepoError::Constraint(msg);
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let password_hash = hash_credential(&self.hasher, new_user.password).await?;

        // id and created_at stay NotSet so the column defaults fill them.
        let row = user::ActiveModel {
            name: Set(new_user.name),
            password_hash: Set(password_hash),
            image_path: Set(new_user.image_path),
            content: Set(new_user.content),
            ..Default::default()
        };

        let model = row.insert(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(user_id = %model.id, "Inserted user");

        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepoError> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        let rows = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, changes: UserChanges) -> Result<User, RepoError> {
        let mut rows = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(changes.name))
            .col_expr(user::Column::ImagePath, Expr::value(changes.image_path))
            .col_expr(user::Column::Content, Expr::value(changes.content))
            .filter(user::Column::Id.eq(changes.id))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.pop().map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
