pub mod backends;
pub mod upstreams;
