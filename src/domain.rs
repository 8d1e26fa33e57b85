pub use contact::{
    Contact,
    ContactStatus,
    NewContact,
};
pub use errors::MalformedInput;
pub use pagination::{
    PageRequest,
    Pagination,
};
pub use subscriber::{
    Subscriber,
    SubscriberStatus,
};
pub use subscriber_email::SubscriberEmail;

mod contact;
mod errors;
mod pagination;
mod subscriber;
mod subscriber_email;
