//! CLI command implementations for sqlplace.
//!
//! Each module corresponds to a subcommand (`sqlplace <command>`).

pub mod bind;
pub mod init;
pub mod inspect;
