pub mod email;
pub mod ids;
pub mod interaction;
pub mod lead;
pub mod listing;
pub mod phone;
pub mod staff;

pub use email::normalize_email;
pub use ids::{InteractionId, LeadId, ListingId, StaffId};
pub use interaction::{Interaction, InteractionKind, BROCHURE_SOURCE, GENERAL_INQUIRY};
pub use lead::{Lead, LeadStatus, LeadTemperature};
pub use listing::{Listing, ListingStatus, PropertyType};
pub use phone::{ensure_normalized_phone, normalize_phone, MAX_PHONE_DIGITS, MIN_PHONE_DIGITS};
pub use staff::{Staff, StaffRole};
