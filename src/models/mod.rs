pub mod admin;
pub mod car;
pub mod inquiry;

pub use admin::{Admin, AdminClaims, DashboardStats, LoginRequest, LoginResponse};
pub use car::{CarDraft, CarListing, CarPayload, CarRecord, CarRow, Scope, Specs, SyncRecord};
pub use inquiry::{Booking, Contact, ListQuery, NewBooking, NewContact, StatusUpdate};
