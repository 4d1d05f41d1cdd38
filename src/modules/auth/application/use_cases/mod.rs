pub mod create_user;
pub mod fetch_profile;
pub mod login_user;
pub mod resend_verification;
pub mod verify_user_email;
