pub mod board;
pub mod clock;
pub mod controller;
pub mod hints;
pub mod secret;
pub mod session;
pub mod state;
pub mod storage;
