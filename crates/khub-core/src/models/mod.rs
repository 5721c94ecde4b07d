pub mod hub;
pub mod message;
pub mod upload;

pub use hub::Hub;
pub use message::{ChatReply, Message, Role, Transcript};
pub use upload::{DocumentKind, Upload, UploadReceipt};
