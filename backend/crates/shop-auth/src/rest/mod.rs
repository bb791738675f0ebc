pub mod rest_identity_service;
pub mod session_file;
