pub mod init;
pub mod selftest;
pub mod update;
