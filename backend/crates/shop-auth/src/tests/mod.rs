mod auth_facade;
mod property_tests;

pub(crate) use fake_identity_service::{
    ADMIN_EMAIL, FakeIdentityService, PASSWORD, STAFF_EMAIL, USER_EMAIL,
};
