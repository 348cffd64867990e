pub mod transition;
pub mod validation;
pub mod worklist;

pub use transition::{next_state, LeadEvent, LeadTransition};
pub use validation::{
    validate_name, validate_note, validate_page, validate_soon_days, MAX_NOTE_LEN, MAX_PAGE_SIZE,
    MAX_SOON_DAYS, MIN_NAME_LEN,
};
pub use worklist::{compute_follow_up_state, FollowUpState};
