pub mod account;
pub mod athlete_profile;

pub use account::{Account, Role};
pub use athlete_profile::{AthleteProfile, Level, ProfileWithOwner};
