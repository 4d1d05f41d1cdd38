pub mod fetch_user_profile;

pub use fetch_user_profile::FetchUserProfileService;
