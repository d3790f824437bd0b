//! keys — display-форма ключей и префиксные бакеты.

pub mod codec;
pub mod prefix;

pub use codec::{decode_display_key, encode_display_key};
pub use prefix::bucket_label;
