// handlers/public/pages.rs - GET /auth/login, /auth/register, /auth/forget

use serde::Serialize;

use crate::response::PageResponse;
use crate::routes;

#[derive(Debug, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AuthPage {
    pub title: &'static str,
    /// Endpoint the form posts to; `None` while the flow has no backend.
    pub action: Option<&'static str>,
    pub fields: Vec<&'static str>,
    pub links: Vec<Link>,
}

pub async fn login_page() -> PageResponse<AuthPage> {
    PageResponse::view(
        "auth/login",
        AuthPage {
            title: "Sign in to MMS",
            action: Some("/actions/sign-in"),
            fields: vec!["email", "password"],
            links: vec![
                Link {
                    label: "Forgot your password?",
                    href: routes::FORGET,
                },
                Link {
                    label: "Sign up",
                    href: routes::REGISTER,
                },
            ],
        },
    )
}

pub async fn register_page() -> PageResponse<AuthPage> {
    PageResponse::view(
        "auth/register",
        AuthPage {
            title: "Create an account",
            action: Some("/actions/sign-up"),
            fields: vec!["email", "username", "password"],
            links: vec![Link {
                label: "Sign in",
                href: routes::LOGIN,
            }],
        },
    )
}

pub async fn forget_page() -> PageResponse<AuthPage> {
    PageResponse::view(
        "auth/forget",
        AuthPage {
            title: "Forget Password?",
            action: None,
            fields: vec!["email"],
            links: vec![Link {
                label: "Back to sign in",
                href: routes::LOGIN,
            }],
        },
    )
}
