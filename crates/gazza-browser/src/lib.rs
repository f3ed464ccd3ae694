pub mod chrome_finder;
pub mod error;
pub mod launcher;
pub mod page;
pub mod profile;
pub mod session;

pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use launcher::ChromeLauncher;
pub use page::FormPage;
pub use profile::ProfileDir;
pub use session::BrowserSession;
