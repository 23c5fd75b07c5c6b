mod config;
mod identity_store;
mod inbox;
mod router;
mod speech;
