pub mod health;
pub mod interactions;
pub mod partners;
pub mod profiles;
