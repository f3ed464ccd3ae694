//! Form-filling engine: marketplace selector tables, the scripts that drive
//! page controls, and the orchestrator that walks a compile request through
//! a publishing form one field at a time.

pub mod driver;
pub mod error;
pub mod injector;
pub mod marketplace;
pub mod notify;
pub mod orchestrator;
pub mod outcome;
pub mod script;
pub mod selectors;

pub use driver::PageDriver;
pub use error::{Error, Result};
pub use injector::FillPolicy;
pub use marketplace::{Marketplace, MarketplaceProfile, profile_for};
pub use orchestrator::FormCompiler;
pub use outcome::{CompileReport, FieldOutcome, FieldReport};
