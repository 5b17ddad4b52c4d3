pub mod app;
pub mod control;
pub mod core;
pub mod error;
pub mod io;
pub mod scene;
pub mod viewer;

pub use error::{Error, Result};
pub use viewer::ViewerSession;
