pub mod book;
pub mod discussion;
pub mod report;
pub mod request;
pub mod review;
pub mod user;
