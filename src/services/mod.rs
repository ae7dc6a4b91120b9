mod notification;
mod roster;

pub use notification::{Notification, NotificationKind};
pub use roster::RosterService;
