//! Roster: employees REST server and the pieces shared by its binaries.

pub mod server;
