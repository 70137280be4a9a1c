pub mod app;
pub mod link;
pub mod nav_bar;
pub mod status;
pub mod text_field;

pub use app::{App, AppProps};
pub use link::Link;
pub use nav_bar::NavBar;
pub use status::{status_of, Status};
pub use text_field::TextField;
