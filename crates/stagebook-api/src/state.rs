//! Application state.
//!
//! One process-wide context object built at startup and injected into every
//! handler; there is no module-level mutable state anywhere.

use std::sync::Arc;

use sqlx::PgPool;
use stagebook_core::Config;
use stagebook_db::{BookingRepository, UserRepository};
use stagebook_storage::TempStore;

use crate::services::email::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub users: UserRepository,
    pub bookings: BookingRepository,
    pub temp_store: Arc<TempStore>,
    pub mailer: Mailer,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
