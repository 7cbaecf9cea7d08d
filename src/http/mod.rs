pub mod auth;
pub mod fixtures;
pub mod friends;
pub mod health;
pub mod leagues;
pub mod news;
pub mod predictions;
pub mod rounds;
pub mod routes;
pub mod standings;
pub mod users;
