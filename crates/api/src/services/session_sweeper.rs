use std::time::Duration;

use infra::store::Store;
use tokio::time::{interval, Interval};
use tracing::{debug, error, info};

use crate::AppState;

/// Periodically deletes expired sessions.
pub struct SessionSweeper<S> {
    state: AppState<S>,
    interval: Interval,
}

impl<S: Store> SessionSweeper<S> {
    pub fn new(state: AppState<S>) -> Self {
        let period = Duration::from_secs(state.config().session_sweep_interval_secs);
        Self {
            state,
            interval: interval(period),
        }
    }

    pub async fn run(&mut self) {
        info!("Starting session sweeper");

        loop {
            self.interval.tick().await;

            if let Err(e) = self.sweep().await {
                error!("Error sweeping expired sessions: {}", e);
            }
        }
    }

    pub async fn sweep(&self) -> Result<u64, sqlx::Error> {
        let removed = self.state.store.delete_expired_sessions().await?;
        if removed > 0 {
            info!("Swept {} expired sessions", removed);
        } else {
            debug!("No expired sessions to sweep");
        }
        Ok(removed)
    }
}

pub fn spawn_session_sweeper<S: Store>(state: AppState<S>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut sweeper = SessionSweeper::new(state);
        sweeper.run().await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chrono::{Duration as ChronoDuration, Utc};
    use infra::models::Role;
    use infra::repos::CreateUser;
    use infra::store::{IdentityStore, MemoryStore};

    #[tokio::test]
    async fn sweep_removes_only_expired() {
        let store = MemoryStore::new();
        let user = store
            .create_user(CreateUser {
                username: "sweepme".to_string(),
                name: "Sweep".to_string(),
                password_hash: "x".to_string(),
                role: Role::User,
                email: None,
                phone_number: None,
                instagram: None,
            })
            .await
            .unwrap()
            .unwrap();
        store
            .create_session("old", user.id, Utc::now() - ChronoDuration::minutes(1))
            .await
            .unwrap();
        store
            .create_session("fresh", user.id, Utc::now() + ChronoDuration::hours(1))
            .await
            .unwrap();

        let sweeper = SessionSweeper::new(AppState::new(store.clone(), AppConfig::default()));
        assert_eq!(sweeper.sweep().await.unwrap(), 1);
        assert!(store.find_session_user("fresh").await.unwrap().is_some());
    }
}
