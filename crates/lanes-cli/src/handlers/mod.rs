pub mod replay;
pub mod seed;
pub mod window;
