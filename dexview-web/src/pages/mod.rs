pub mod biome;
pub mod dex_list;
pub mod drops;
pub mod mon;
pub mod not_found;
pub mod preset;
pub mod status;
