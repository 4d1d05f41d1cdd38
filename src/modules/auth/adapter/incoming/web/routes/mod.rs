pub mod dto;
mod profile;
mod resend_verification;
mod signin;
mod signup;
mod verify_email;

pub use dto::{UserProfile, UserSummary};
pub use profile::{profile_handler, ProfileResponse};
pub use resend_verification::{
    resend_verification_handler, ResendVerificationRequestDto, ResendVerificationResponse,
};
pub use signin::{signin_handler, SigninRequestDto, SigninResponse};
pub use signup::{signup_handler, SignupRequestDto, SignupResponse};
pub use verify_email::{verify_email_handler, VerifyEmailRequestDto, VerifyEmailResponse};

// `#[utoipa::path]` generates these alongside each handler
pub use profile::__path_profile_handler;
pub use resend_verification::__path_resend_verification_handler;
pub use signin::__path_signin_handler;
pub use signup::__path_signup_handler;
pub use verify_email::__path_verify_email_handler;

use actix_web::web;

/// Handlers mounted under `/api/auth`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(signup_handler)
        .service(signin_handler)
        .service(verify_email_handler)
        .service(resend_verification_handler)
        .service(profile_handler);
}
