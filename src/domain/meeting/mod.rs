//! Meeting and upload-task entities

mod record;
mod task;

pub use record::{
    final_title, provisional_title, MeetingId, MeetingRecord, MeetingUpdate, NewMeeting,
};
pub use task::{NewTask, TaskId, TaskStatus, TaskUpdate, UploadTask, UPLOAD_TASK_KIND};
