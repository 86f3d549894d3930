pub mod admin_repo;
pub mod booking_repo;
pub mod car_repo;
pub mod contact_repo;
pub mod errors;

pub use admin_repo::AdminRepository;
pub use booking_repo::BookingRepository;
pub use car_repo::CarRepository;
pub use contact_repo::ContactRepository;
pub use errors::StoreError;
