pub mod check;
pub mod dispatch;
pub mod verify;

pub use dispatch::dispatch;
