mod helpers;
mod newsletter;
