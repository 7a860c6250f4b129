pub mod prelude;

pub mod response_cache;
