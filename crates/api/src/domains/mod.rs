pub mod auth;
pub mod bookings;
pub mod fields;
pub mod users;

use serde::Deserialize;

use infra::pagination::LimitOffset;

/// `?limit=&offset=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> LimitOffset {
        LimitOffset::new(self.limit, self.offset)
    }
}
