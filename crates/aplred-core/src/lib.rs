pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod metric;
pub mod pipeline;
pub mod strategy;
