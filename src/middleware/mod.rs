pub mod cors;
pub mod trusted_host;
