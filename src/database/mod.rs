use log::{error, info, warn};
use rocket::fairing::AdHoc;

use crate::error::ServerError;

mod records;

pub use records::{AnswerStat, Game};

pub type DatabasePool = sqlx::AnyPool;
pub type RecordId = i32;

/// The one database handle of the process. Disabled when no url is configured.
pub struct Database {
    pool: Option<DatabasePool>,
}

impl Database {
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    pub async fn connect(database_url: Option<&str>) -> Result<Self, ServerError> {
        let database_url = match database_url {
            Some(url) => url,
            None => {
                warn!("DATABASE_URL is not set, persistence is disabled");
                return Ok(Self::disabled());
            }
        };

        sqlx::any::install_default_drivers();
        let pool = DatabasePool::connect(database_url).await?;
        info!("connected to the database");

        Ok(Self { pool: Some(pool) })
    }

    pub fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            info!("closing the database pool");
            pool.close().await;
        }
    }
}

/// Connects on ignition and manages the resulting [`Database`].
pub fn connect_fairing(database_url: Option<String>) -> AdHoc {
    AdHoc::try_on_ignite("Database connection", |rocket| async move {
        match Database::connect(database_url.as_deref()).await {
            Ok(database) => Ok(rocket.manage(database)),
            Err(error) => {
                error!("{}", error);
                Err(rocket)
            }
        }
    })
}

pub fn shutdown_fairing() -> AdHoc {
    AdHoc::on_shutdown("Database shutdown", |rocket| {
        Box::pin(async move {
            if let Some(database) = rocket.state::<Database>() {
                database.close().await;
            }
        })
    })
}
