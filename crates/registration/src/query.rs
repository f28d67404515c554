use inscription_db::table::Inscription;
use sea_query::{Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

use crate::EmailCipher;

#[derive(Debug, Default, PartialEq, FromRow)]
pub struct InscriptionRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: i64,
}

/// Inscription as exposed by the listing, e-mail in clear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InscriptionView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: i64,
}

#[derive(Clone)]
pub struct Query {
    pub pool: sqlx::SqlitePool,
    pub cipher: EmailCipher,
}

impl Query {
    pub fn new(pool: sqlx::SqlitePool, cipher: EmailCipher) -> Self {
        Self { pool, cipher }
    }

    /// All inscriptions, newest first.
    ///
    /// An e-mail that fails to decrypt is returned as stored.
    pub async fn list(&self) -> anyhow::Result<Vec<InscriptionView>> {
        let rows = self.rows().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let email = match self.cipher.decrypt(&row.email) {
                    Ok(email) => email,
                    Err(_) => {
                        tracing::warn!(id = %row.id, "stored email could not be decrypted");
                        row.email
                    }
                };

                InscriptionView {
                    id: row.id,
                    name: row.name,
                    email,
                    message: row.message,
                    created_at: row.created_at,
                }
            })
            .collect())
    }

    pub async fn rows(&self) -> anyhow::Result<Vec<InscriptionRow>> {
        let statement = sea_query::Query::select()
            .columns([
                Inscription::Id,
                Inscription::Name,
                Inscription::Email,
                Inscription::Message,
                Inscription::CreatedAt,
            ])
            .from(Inscription::Table)
            .order_by(Inscription::CreatedAt, Order::Desc)
            .order_by(Inscription::Id, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, InscriptionRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?)
    }
}
