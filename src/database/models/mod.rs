pub mod admin;
pub mod club;
pub mod injury;
pub mod matches;
pub mod message;
pub mod news;
pub mod player;

pub use admin::Admin;
pub use club::{Club, ClubSummary};
pub use injury::Injury;
pub use matches::{Match, MatchPoint};
pub use message::{LeaveRequest, PlayerNotification};
pub use news::FootballNews;
pub use player::Player;
