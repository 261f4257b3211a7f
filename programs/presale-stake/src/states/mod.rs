pub mod global_config;
pub use global_config::*;

pub mod bonus;
pub use bonus::*;

pub mod round_ledger;
pub use round_ledger::*;

pub mod user_stake_info;
pub use user_stake_info::*;
