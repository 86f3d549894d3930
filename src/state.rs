use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::auth::AuthService;
use crate::config::Config;
use crate::repository::{AdminRepository, BookingRepository, CarRepository, ContactRepository};
use crate::service::{CatalogService, CatalogSync, DashboardService, InquiryService};

/// Services shared by every handler. All of them hold clones of the one pool
/// opened in `main`.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub sync: CatalogSync,
    pub inquiries: InquiryService,
    pub dashboard: DashboardService,
    pub auth: AuthService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let cars = CarRepository::new(pool.clone());
        let bookings = BookingRepository::new(pool.clone());
        let contacts = ContactRepository::new(pool.clone());
        let admins = AdminRepository::new(pool);

        Self {
            catalog: CatalogService::new(cars.clone()),
            sync: CatalogSync::new(cars.clone()),
            inquiries: InquiryService::new(bookings.clone(), contacts.clone()),
            dashboard: DashboardService::new(cars, bookings, contacts),
            auth: AuthService::new(admins, &config.jwt_secret, config.bcrypt_cost),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
