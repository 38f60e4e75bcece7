use askama::Template;

use super::PageContext;
use crate::models::survey::Survey;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub ctx: PageContext,
    pub surveys: Vec<Survey>,
    pub views: i64,
}

#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessTemplate {
    pub ctx: PageContext,
}
