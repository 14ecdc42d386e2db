use serenity::{
    all::{CommandInteraction, PartialGuild},
    builder::CreateEmbed,
    prelude::Context as IncomingContext,
};
use tracing::{debug, error};

use crate::{
    commands::get_command_list,
    models::{
        command::{CommandContext, CommandContextReply, FailedCommandContext},
        handler::Handler,
        response::{Response, ResponseError},
    },
};

fn error_response(err: &ResponseError) -> Response {
    match err {
        ResponseError::Execution(title, description) => {
            let mut embed = CreateEmbed::new().title(*title).color(0xff0000);
            if let Some(description) = description {
                embed = embed.description(description);
            }
            Response::new().embed(embed).ephemeral(true)
        }
        ResponseError::Giveaway(err) => Response::new()
            .embed(
                CreateEmbed::new()
                    .title(err.to_string())
                    .color(0xff0000),
            )
            .ephemeral(true),
        ResponseError::Serenity(_) => Response::new()
            .embed(
                CreateEmbed::new()
                    .title("Something went wrong")
                    .description("Discord rejected the request, please try again later.")
                    .color(0xff0000),
            )
            .ephemeral(true),
    }
}

impl Handler {
    pub async fn on_command(&self, ctx: IncomingContext, command: CommandInteraction) {
        let start = std::time::Instant::now();

        let Some(guild_id) = command.guild_id else {
            let fail_context = FailedCommandContext { ctx };
            if let Err(err) = fail_context
                .reply(
                    &command,
                    Response::private("Giveaways cannot be used outside of guilds"),
                )
                .await
            {
                error!("Failed to reply to command: {:?}", err);
            }
            return;
        };

        let cached_guild = guild_id
            .to_guild_cached(&ctx.cache)
            .map(|guild| PartialGuild::from(guild.clone()));
        let guild = match cached_guild {
            Some(guild) => guild,
            None => match guild_id.to_partial_guild(&ctx.http).await {
                Ok(guild) => guild,
                Err(err) => {
                    error!("Could not obtain guild {}: {:?}", guild_id, err);
                    let fail_context = FailedCommandContext { ctx };
                    if let Err(err) = fail_context
                        .reply(&command, Response::private("Could not obtain the guild"))
                        .await
                    {
                        error!("Failed to reply to command: {:?}", err);
                    }
                    return;
                }
            },
        };

        debug!("Took {:?} to get guild ID and guild", start.elapsed());

        let command_context = CommandContext { ctx, guild };

        for existing_command in get_command_list() {
            if existing_command.name() != command.data.name {
                continue;
            }
            if let Err(err) = existing_command
                .router(self, &command_context, &command)
                .await
            {
                debug!("Command {} failed: {}", command.data.name, err);
                if let Err(err) = command_context
                    .reply(&command, error_response(&err))
                    .await
                {
                    error!("Failed to reply to command: {:?}", err);
                }
            }
        }

        debug!("Took {:?} to handle a command", start.elapsed());
    }
}
