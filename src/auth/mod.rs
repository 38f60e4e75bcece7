pub mod csrf;
pub mod directory;
pub mod middleware;
pub mod password;
pub mod session;
pub mod validate;
