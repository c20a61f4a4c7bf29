pub mod daisy_ui;
pub mod header;
pub mod mon_link;
