pub mod columns;
pub mod enriched_frame;
pub mod error;
