pub mod calc;
pub mod grade;
pub mod init;
pub mod scale;
pub mod validate;
