pub mod admin_dashboard;
pub mod auth_form;
pub mod books_list;
pub mod connectivity_banner;
pub mod home_page;
pub mod migration_banner;
pub mod notice;
pub mod profile_page;
pub mod review_form;
pub mod reviews_list;
