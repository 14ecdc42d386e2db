use serenity::{
    all::CommandInteraction,
    builder::{CreateInteractionResponse, CreateInteractionResponseMessage},
    http::Http,
};
use tracing::{debug, error};

use crate::models::{
    command::{
        CommandContext, CommandContextReply, FailedCommandContext, InteractionContext,
        InteractionContextReply,
    },
    response::{Response, ResponseError, ResponseResult},
};

fn create_message(response: Response) -> CreateInteractionResponseMessage {
    let mut reply = CreateInteractionResponseMessage::new();
    if let Some(content) = response.content {
        reply = reply.content(content);
    }
    if let Some(embeds) = response.embeds {
        reply = reply.embeds(embeds);
    }
    if let Some(allowed_mentions) = response.allowed_mentions {
        reply = reply.allowed_mentions(allowed_mentions);
    }
    if response.ephemeral {
        reply = reply.ephemeral(true);
    }
    reply
}

async fn reply_to_command(
    http: &Http,
    cmd: &CommandInteraction,
    response: Response,
) -> ResponseResult {
    let start = std::time::Instant::now();
    if let Err(err) = cmd
        .create_response(
            http,
            CreateInteractionResponse::Message(create_message(response)),
        )
        .await
    {
        error!("Attempted to create a response to a command, failed with error: {err}");
        return Err(ResponseError::Serenity(err));
    }

    debug!("Took {:?} to reply to a command", start.elapsed());
    Ok(())
}

#[async_trait::async_trait]
impl CommandContextReply for CommandContext {
    async fn reply(&self, cmd: &CommandInteraction, response: Response) -> ResponseResult {
        reply_to_command(&self.ctx.http, cmd, response).await
    }
}

#[async_trait::async_trait]
impl CommandContextReply for FailedCommandContext {
    async fn reply(&self, cmd: &CommandInteraction, response: Response) -> ResponseResult {
        reply_to_command(&self.ctx.http, cmd, response).await
    }
}

#[async_trait::async_trait]
impl InteractionContextReply for InteractionContext {
    async fn reply(&self, response: Response) -> ResponseResult {
        let start = std::time::Instant::now();
        if let Err(err) = self
            .interaction
            .create_response(
                &self.ctx.http,
                CreateInteractionResponse::Message(create_message(response)),
            )
            .await
        {
            error!("Attempted to respond to a button press, failed with error: {err}");
            return Err(ResponseError::Serenity(err));
        }

        debug!("Took {:?} to reply to an interaction", start.elapsed());
        Ok(())
    }
}

