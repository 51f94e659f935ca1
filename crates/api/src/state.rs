use std::sync::Arc;

use infra::store::Store;

use crate::config::AppConfig;
use crate::domains::bookings::service::BookingService;
use crate::domains::fields::service::FieldService;
use crate::domains::users::service::UserService;

#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    config: Arc<AppConfig>,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn bookings(&self) -> BookingService<S> {
        BookingService::new(self.store.clone(), self.config.clone())
    }

    pub fn fields(&self) -> FieldService<S> {
        FieldService::new(self.store.clone())
    }

    pub fn users(&self) -> UserService<S> {
        UserService::new(self.store.clone(), self.config.clone())
    }
}
