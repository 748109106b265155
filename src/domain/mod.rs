mod credit;
mod ledger;
mod money;
mod project;
mod user;

pub use credit::*;
pub use ledger::*;
pub use money::*;
pub use project::*;
pub use user::*;
