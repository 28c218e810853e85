use std::sync::Arc;

use configs::{AppConfig, Environment};
use sea_orm::DatabaseConnection;
use service::entry::{repository::SeaOrmEntryRepository, EntryService};

/// Shared by every handler. Cloning is cheap: the pool and service are
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub entries: Arc<EntryService<SeaOrmEntryRepository>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let repo = Arc::new(SeaOrmEntryRepository::new(db.clone()));
        Self { db, entries: Arc::new(EntryService::new(repo)), config: Arc::new(config) }
    }

    pub fn environment(&self) -> Environment { self.config.app.environment }

    pub fn page_size(&self) -> i64 { i64::from(self.config.app.page_size) }
}
