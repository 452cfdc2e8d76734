/// Browser-facing route table

/// Public pages, only meaningful while signed out
pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const FORGET: &str = "/auth/forget";

/// Team selection / creation flow, requires a token
pub const TEAM: &str = "/team";

/// Root of the app; resolved per request to the selected team's namespace
pub const DASHBOARD: &str = "/";

// Paths below are relative to a team namespace
pub const SETTING: &str = "/setting";
pub const SETTING_MEMBER: &str = "/setting/member";
pub const SETTING_NOTIFY: &str = "/setting/notify";
pub const SETTING_BILL: &str = "/setting/bill";
pub const SETTING_LOG: &str = "/setting/log";

/// Where an authenticated user lands
pub const SIGN_IN_ROUTE: &str = DASHBOARD;
/// Where an anonymous or expired session lands
pub const SIGN_OUT_ROUTE: &str = LOGIN;

pub const PUBLIC_ROUTES: [&str; 3] = [LOGIN, REGISTER, FORGET];
pub const PROTECTED_ROUTES: [&str; 1] = [TEAM];

/// `/{namespace}` followed by a namespace-relative path.
pub fn team_path(namespace: &str, relative: &str) -> String {
    let relative = relative.trim_end_matches('/');
    if relative.is_empty() {
        format!("/{}", namespace)
    } else if relative.starts_with('/') {
        format!("/{}{}", namespace, relative)
    } else {
        format!("/{}/{}", namespace, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_path_joins_namespace() {
        assert_eq!(team_path("acme", DASHBOARD), "/acme");
        assert_eq!(team_path("acme", SETTING_MEMBER), "/acme/setting/member");
        assert_eq!(team_path("acme", "setting"), "/acme/setting");
    }
}
