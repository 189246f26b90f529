//! Business logic services for the wine discovery server

pub mod matching;
pub mod menu;
pub mod quiz;

pub use matching::MatchingService;
pub use menu::MenuService;
pub use quiz::QuizService;
