//! Telegram notifications

pub mod telegram;

pub use telegram::{Notification, TelegramNotifier};
