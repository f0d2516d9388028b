use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub start_date: String,
    pub rating: f32,
    pub reviews: u32,
    pub syllabus: Vec<String>,
    pub video: String,
}
