//! Common types used across the application.

pub mod ident;
pub mod notification;
pub mod procurement;
pub mod role;

pub use ident::is_valid_record_id;
pub use notification::NotificationKind;
pub use procurement::{PrItemType, PrStatus, PrType};
pub use role::UserRole;
