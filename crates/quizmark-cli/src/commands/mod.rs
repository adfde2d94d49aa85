pub mod answer;
pub mod grade;
pub mod init;
pub mod validate;
