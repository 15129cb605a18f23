pub mod correct;
pub mod mosaic;
pub mod pipeline;
pub mod stage;
