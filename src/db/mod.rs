pub mod fixture_repo;
pub mod friend_repo;
pub mod league_repo;
pub mod models;
pub mod news_repo;
pub mod prediction_repo;
pub mod round_repo;
pub mod standings_repo;
pub mod user_repo;
