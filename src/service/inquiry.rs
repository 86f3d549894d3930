use chrono::Utc;
use validator::Validate;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Booking, Contact, NewBooking, NewContact, StatusUpdate};
use crate::repository::{BookingRepository, ContactRepository};

/// Test-drive bookings and contact messages coming from the public site.
#[derive(Clone)]
pub struct InquiryService {
    bookings: BookingRepository,
    contacts: ContactRepository,
}

impl InquiryService {
    pub fn new(bookings: BookingRepository, contacts: ContactRepository) -> Self {
        Self { bookings, contacts }
    }

    pub async fn submit_booking(&self, booking: NewBooking) -> Result<i64, AppError> {
        booking.validate()?;
        let id = self.bookings.create(&booking, Utc::now()).await?;
        tracing::info!(
            "{} Booking {} received for car {}",
            API_NAME,
            id,
            booking.car_id.as_deref().unwrap_or("-")
        );
        Ok(id)
    }

    pub async fn list_bookings(&self, limit: Option<i64>) -> Result<Vec<Booking>, AppError> {
        Ok(self.bookings.list(limit).await?)
    }

    pub async fn update_booking(&self, id: i64, update: StatusUpdate) -> Result<(), AppError> {
        self.bookings.update_status(id, &update).await?;
        tracing::info!("{} Booking {} updated", API_NAME, id);
        Ok(())
    }

    pub async fn submit_contact(&self, contact: NewContact) -> Result<i64, AppError> {
        contact.validate()?;
        let id = self.contacts.create(&contact, Utc::now()).await?;
        tracing::info!("{} Contact message {} received", API_NAME, id);
        Ok(id)
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, AppError> {
        Ok(self.contacts.list().await?)
    }

    pub async fn update_contact(&self, id: i64, update: StatusUpdate) -> Result<(), AppError> {
        self.contacts.update_status(id, &update).await?;
        tracing::info!("{} Contact {} updated", API_NAME, id);
        Ok(())
    }
}
