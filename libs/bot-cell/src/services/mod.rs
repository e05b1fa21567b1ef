pub mod bot;
pub mod mapping;
pub mod openmic;

pub use bot::BotService;
pub use mapping::map_bot_response;
pub use openmic::OpenMicClient;
