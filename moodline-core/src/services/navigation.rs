//! Navigation guard - decides route access from the current session

use serde::Serialize;

use crate::domain::route::{self, RouteRequirements, HOME, ONBOARDING, SIGN_IN};
use crate::domain::SessionSnapshot;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "target", rename_all = "camelCase")]
pub enum Verdict {
    Allow,
    RedirectTo(&'static str),
}

struct GuardRule {
    applies: fn(&RouteRequirements, &SessionSnapshot) -> bool,
    target: fn(&SessionSnapshot) -> &'static str,
}

/// Ordered rule table, first match wins. Later rules can assume the earlier
/// ones did not match, so the priority is fixed: authentication first, then
/// onboarding, then guest-only screens.
static RULES: &[GuardRule] = &[
    GuardRule {
        applies: |req, session| req.requires_auth && !session.is_authenticated,
        target: |_| SIGN_IN,
    },
    GuardRule {
        applies: |req, session| {
            req.requires_onboarding
                && session.is_authenticated
                && !session.has_completed_onboarding
        },
        target: |_| ONBOARDING,
    },
    GuardRule {
        applies: |req, session| req.requires_guest && session.is_authenticated,
        target: |session| {
            if session.has_completed_onboarding {
                HOME
            } else {
                ONBOARDING
            }
        },
    },
];

pub fn decide(requirements: &RouteRequirements, session: &SessionSnapshot) -> Verdict {
    for rule in RULES {
        if (rule.applies)(requirements, session) {
            return Verdict::RedirectTo((rule.target)(session));
        }
    }
    Verdict::Allow
}

/// Guard check by path, using the route table's requirements. Unlisted paths
/// carry no requirements and are always allowed.
pub fn decide_path(path: &str, session: &SessionSnapshot) -> Verdict {
    decide(&route::requirements_for(path), session)
}
