use std::{path::PathBuf, str::FromStr};

use inscription_registration::{Command, EmailCipher, Query, RegisterInput};
use inscription_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    inscription_db::migrate(&pool).await?;

    Ok(State {
        read_db: pool.clone(),
        write_db: pool,
    })
}

#[allow(dead_code)]
pub fn setup_cipher() -> EmailCipher {
    EmailCipher::new(&EmailCipher::generate_key()).unwrap()
}

#[allow(dead_code)]
pub fn setup_command_query(state: &State) -> (Command, Query) {
    let cipher = setup_cipher();
    let command = Command::new(state.clone(), cipher.clone());
    let query = Query::new(state.read_db.clone(), cipher);

    (command, query)
}

#[allow(dead_code)]
pub async fn create_register(cmd: &Command, name: impl Into<String>) -> anyhow::Result<String> {
    let ids = create_register_all(cmd, vec![name]).await?;

    Ok(ids.first().unwrap().to_owned())
}

#[allow(dead_code)]
pub async fn create_register_all(
    cmd: &Command,
    names: impl IntoIterator<Item = impl Into<String>>,
) -> anyhow::Result<Vec<String>> {
    let mut ids = vec![];
    for name in names.into_iter() {
        let name = name.into();
        let id = cmd
            .register(RegisterInput::new(
                name.to_owned(),
                format!("{name}@Inscription.Localhost"),
                "my message",
            ))
            .await?;
        ids.push(id);
    }

    Ok(ids)
}
