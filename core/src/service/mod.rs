pub mod dto;
pub mod pivot;
