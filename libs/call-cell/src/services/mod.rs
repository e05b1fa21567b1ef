pub mod calls;
pub mod pipeline;
pub mod stats;

pub use calls::CallService;
pub use pipeline::PostCallService;
