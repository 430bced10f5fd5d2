pub mod http;
pub mod password;
pub mod token;
