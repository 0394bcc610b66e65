pub mod login;

pub use login::{professor_login, student_login};
