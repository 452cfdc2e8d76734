// handlers/public/mod.rs - Pages and actions for signed-out users
//
// The guard sends signed-in users away from these pages, so handlers here
// never assume a session exists.

pub mod auth;
pub mod pages;

pub use auth::{sign_in, sign_up};
pub use pages::{forget_page, login_page, register_page};
