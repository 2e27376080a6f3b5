pub mod accommodations;
pub mod activities;
pub mod auth;
pub mod images;
pub mod locations;
pub mod provinces;
pub mod public_users;
pub mod vendors;
