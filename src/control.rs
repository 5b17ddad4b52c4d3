pub mod controller;
pub mod framing;
pub mod gesture;
pub mod interaction;
