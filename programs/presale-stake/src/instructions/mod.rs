pub mod initialise_configs;
pub use initialise_configs::*;

pub mod update_configs;
pub use update_configs::*;

pub mod buy_and_stake;
pub use buy_and_stake::*;

pub mod withdraw;
pub use withdraw::*;

pub mod views;
pub use views::*;
