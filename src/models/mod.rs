pub mod diary;
pub mod todo;
pub mod vision;

pub use diary::{DiaryEntry, NewDiaryEntry, NewDiaryEntryRequest, UpdateDiaryEntryRequest};
pub use todo::{NewTodo, NewTodoRequest, Todo};
pub use vision::{NewVisionItem, UpdateVisionItemRequest, VisionItem};

pub const DEFAULT_MOOD: &str = "😊";
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";
