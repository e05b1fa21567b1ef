// =====================================================================================
// BOT CELL - VOICE BOT LIFECYCLE
// =====================================================================================
//
// Manages the conversational bots that answer patient calls. Bots are
// registered on the OpenMic voice platform and mirrored into the record store,
// where their crisis keywords drive post-call analysis.
//
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{BotError, BotFallback, CreateBotRequest, OpenMicApiResponse, OpenMicBot};
pub use router::create_bot_router;
pub use services::{BotService, OpenMicClient};
