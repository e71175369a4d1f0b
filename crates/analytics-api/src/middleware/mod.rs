pub mod access_secret;
pub mod request_id;

pub use access_secret::{access_secret_middleware, AccessSecretState};
pub use request_id::request_id_middleware;
