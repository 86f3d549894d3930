use crate::error::AppError;
use crate::models::DashboardStats;
use crate::repository::{BookingRepository, CarRepository, ContactRepository};

#[derive(Clone)]
pub struct DashboardService {
    cars: CarRepository,
    bookings: BookingRepository,
    contacts: ContactRepository,
}

impl DashboardService {
    pub fn new(cars: CarRepository, bookings: BookingRepository, contacts: ContactRepository) -> Self {
        Self {
            cars,
            bookings,
            contacts,
        }
    }

    /// The four counts are independent reads, issued together.
    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let (pending_bookings, new_contacts, total_bookings, active_cars) = tokio::try_join!(
            self.bookings.count_pending(),
            self.contacts.count_new(),
            self.bookings.count_all(),
            self.cars.count_active(),
        )?;

        Ok(DashboardStats {
            pending_bookings,
            new_contacts,
            total_bookings,
            active_cars,
        })
    }
}
