//! Pages, locations and the role guard.

mod page;
mod router;

pub use page::{Location, Page};
pub use router::{
    ACCESS_DENIED_NOTICE, GuardOutcome, LOGGED_OUT_NOTICE, Router, SESSION_EXPIRED_NOTICE,
    select_role,
};
