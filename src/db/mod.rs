use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

const APP_NAME: &str = "quizgrade-server";

/// Collection names for the three stores, fixed at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collections {
    pub questions: String,
    pub quizzes: String,
    pub results: String,
}

impl Collections {
    pub fn from_config(config: &Config) -> Self {
        Self {
            questions: config.questions_collection.clone(),
            quizzes: config.quizzes_collection.clone(),
            results: config.results_collection.clone(),
        }
    }
}

/// Driver options for the configured deployment. Parsing only resolves the
/// connection string; nothing is dialed until the client is used.
pub async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;

    let timeout = Duration::from_secs(config.mongo_connect_timeout_secs);
    options.app_name = Some(APP_NAME.to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.max_pool_size = Some(config.mongo_max_pool_size);
    options.min_pool_size = Some(config.mongo_max_pool_size.min(2));
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);
    Ok(options)
}

/// Handle on the quiz database. Cloning is cheap; the driver pools connections.
#[derive(Clone)]
pub struct Database {
    inner: mongodb::Database,
    collections: Collections,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;
        let database = Self {
            inner: client.database(&config.mongo_db_name),
            collections: Collections::from_config(config),
        };
        database.health_check().await?;

        log::info!(
            "Connected to MongoDB database '{}' (pool {}, timeout {}s)",
            config.mongo_db_name,
            config.mongo_max_pool_size,
            config.mongo_connect_timeout_secs
        );
        Ok(database)
    }

    pub fn questions<T: Send + Sync>(&self) -> Collection<T> {
        self.inner.collection(&self.collections.questions)
    }

    pub fn quizzes<T: Send + Sync>(&self) -> Collection<T> {
        self.inner.collection(&self.collections.quizzes)
    }

    pub fn results<T: Send + Sync>(&self) -> Collection<T> {
        self.inner.collection(&self.collections.results)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.inner.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
