//! Route table and access requirements

use serde::{Deserialize, Serialize};

/// Route paths used by the navigation layer
pub const HOME: &str = "/";
pub const SIGN_IN: &str = "/signin";
pub const LOG_IN: &str = "/login";
pub const ONBOARDING: &str = "/onboarding";

/// Access requirements attached to a route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequirements {
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub requires_onboarding: bool,
    #[serde(default)]
    pub requires_guest: bool,
}

impl RouteRequirements {
    pub const NONE: Self = Self {
        requires_auth: false,
        requires_onboarding: false,
        requires_guest: false,
    };

    pub const AUTH: Self = Self {
        requires_auth: true,
        requires_onboarding: false,
        requires_guest: false,
    };

    pub const AUTH_ONBOARDED: Self = Self {
        requires_auth: true,
        requires_onboarding: true,
        requires_guest: false,
    };

    pub const GUEST: Self = Self {
        requires_auth: false,
        requires_onboarding: false,
        requires_guest: true,
    };
}

/// The application's four routes and their requirements
pub const ROUTES: &[(&str, RouteRequirements)] = &[
    (HOME, RouteRequirements::AUTH_ONBOARDED),
    (SIGN_IN, RouteRequirements::GUEST),
    (LOG_IN, RouteRequirements::GUEST),
    (ONBOARDING, RouteRequirements::AUTH),
];

/// Requirements for a path; unlisted paths carry none (always allowed)
pub fn requirements_for(path: &str) -> RouteRequirements {
    ROUTES
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, reqs)| *reqs)
        .unwrap_or(RouteRequirements::NONE)
}
