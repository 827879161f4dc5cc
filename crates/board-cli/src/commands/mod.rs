pub mod alert;
pub mod ask;
pub mod board_pack;
pub mod brief;
pub mod dispatch;
pub mod parse;
pub mod scenario;
pub mod serve;
