use inscription_db::table::Inscription;
use inscription_shared::State;
use sea_query::SqliteQueryBuilder;
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{EmailCipher, RegisterInput};

#[derive(Clone)]
pub struct Command {
    pub state: State,
    pub cipher: EmailCipher,
}

impl Command {
    pub fn new(state: State, cipher: EmailCipher) -> Self {
        Self { state, cipher }
    }

    /// Validate, encrypt the e-mail and store a new inscription.
    ///
    /// Returns the id of the stored row.
    #[tracing::instrument(skip_all)]
    pub async fn register(&self, input: RegisterInput) -> inscription_shared::Result<String> {
        let registration = input.normalize()?;
        let id = Ulid::new().to_string();
        let created_at = OffsetDateTime::now_utc().unix_timestamp();

        let statement = sea_query::Query::insert()
            .into_table(Inscription::Table)
            .columns([
                Inscription::Id,
                Inscription::Name,
                Inscription::Email,
                Inscription::Message,
                Inscription::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                registration.name.into(),
                self.cipher.encrypt(&registration.email).into(),
                registration.message.into(),
                created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.state.write_db)
            .await?;

        tracing::info!(id = %id, "inscription stored");

        Ok(id)
    }
}
