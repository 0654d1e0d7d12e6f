pub mod consts;
pub mod model;
pub mod render;
pub mod search;
pub mod session;
