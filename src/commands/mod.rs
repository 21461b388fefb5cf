pub mod add;
pub mod init;
pub mod run;

pub use add::*;
pub use init::*;
pub use run::*;
