pub mod init;
pub mod serve;
pub mod task;
pub mod week;
