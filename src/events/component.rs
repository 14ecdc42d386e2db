use serenity::{all::ComponentInteraction, prelude::Context as IncomingContext};

use crate::{
    commands::giveaway::interaction::giveaway_entry_handler,
    models::{command::InteractionContext, handler::Handler},
};

impl Handler {
    pub async fn on_component(&self, ctx: IncomingContext, interaction: ComponentInteraction) {
        let interaction_context = InteractionContext::new(ctx, &interaction);
        giveaway_entry_handler(self, interaction_context).await;
    }
}
