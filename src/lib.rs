pub mod api_client;
pub mod config;
pub mod http_client;
pub mod logging;
pub mod model;
pub mod paginate;
pub mod persist;
pub mod pipeline;
pub mod reshape;
pub mod tally;
