pub mod chip;
pub mod error_notice;
pub mod loading_notice;

pub use chip::{Chip, ChipKind};
pub use error_notice::ErrorNotice;
pub use loading_notice::LoadingNotice;
