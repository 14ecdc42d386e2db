use serenity::{
    all::{CommandInteraction, ComponentInteraction, PartialGuild},
    builder::CreateCommand,
    prelude::Context as IncomingContext,
};

use super::{
    handler::Handler,
    response::{Response, ResponseResult},
};

pub struct CommandContext {
    pub ctx: IncomingContext,
    pub guild: PartialGuild,
}

pub struct FailedCommandContext {
    pub ctx: IncomingContext,
}

pub struct InteractionContext {
    pub ctx: IncomingContext,
    pub interaction: ComponentInteraction,
}

impl InteractionContext {
    pub fn new(ctx: IncomingContext, interaction: &ComponentInteraction) -> Self {
        InteractionContext {
            ctx,
            interaction: interaction.clone(),
        }
    }
}

#[async_trait::async_trait]
pub trait CommandContextReply {
    async fn reply(&self, cmd: &CommandInteraction, response: Response) -> ResponseResult;
}

#[async_trait::async_trait]
pub trait InteractionContextReply {
    async fn reply(&self, response: Response) -> ResponseResult;
}

#[async_trait::async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    fn register(&self) -> CreateCommand;
    async fn router(
        &self,
        handler: &Handler,
        ctx: &CommandContext,
        command: &CommandInteraction,
    ) -> ResponseResult;
}
