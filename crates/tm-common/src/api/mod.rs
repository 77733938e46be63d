//! Wire-level request and response types shared by the HTTP surface.

pub mod interaction;
pub mod profile;
pub mod rank;
