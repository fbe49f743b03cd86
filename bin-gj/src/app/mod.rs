mod app;
mod err;
mod input;

pub use app::App;
