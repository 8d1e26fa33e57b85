pub use contact::{
    list_contacts,
    submit_contact,
    update_contact_status,
};
pub use dashboard::{
    dashboard_redirect,
    stats,
};
pub use envelope::Envelope;
pub use errors::{
    json_error_handler,
    query_error_handler,
    storage_failure,
    RouteError,
};
pub use health_check::health_check;
pub use login::{
    login,
    verify,
};
pub use newsletter::{
    list_subscribers,
    subscribe,
    unsubscribe,
};

mod contact;
mod dashboard;
mod envelope;
mod errors;
mod health_check;
mod listing;
mod login;
mod newsletter;
