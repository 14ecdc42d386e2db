use std::sync::Arc;

use super::{config::BotConfig, giveaway::GiveawayManager};

#[derive(Clone)]
pub struct Handler {
    pub config: Arc<BotConfig>,
    pub giveaways: Arc<GiveawayManager>,
}
