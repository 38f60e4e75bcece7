pub mod note;
pub mod page_view;
pub mod response;
pub mod survey;
