pub mod environments;
pub mod http;

pub use environments::{EnvironmentsApi, EnvironmentsClient};
pub use http::HttpClient;
